//! Reconnecting client state machine.
//!
//! One [`ReconnectingClient`] per page/preview session. It connects through
//! a [`Connector`], consumes protocol frames in arrival order, dispatches
//! them through the decision policy, and when the connection drops schedules
//! bounded-retry reconnection:
//!
//! ```text
//! CONNECTING ──open──► OPEN ──close──► RETRY_SCHEDULED ──timer──► CONNECTING
//!     │                                      │
//!     └──────── budget exhausted ────────────┴──────► GIVEN_UP (terminal)
//! ```
//!
//! A successful open refills the retry budget; exhausting it while the
//! connection stays down ends the session permanently (manual restart only).
//! Page unload flips a suppression flag: pending reconnect timers are
//! cancelled and reload actions become no-ops, without tearing the transport
//! down.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::{Notify, mpsc};
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::options::ClientOptions;
use crate::protocol::{self, Message};
use crate::transport::{Connector, Transport, WebSocketConnector};

use super::logger::ClientLogger;
use super::overlay::{LoggingSurface, Overlay, RenderSurface};
use super::policy::{self, Action, PolicyState};

// ============================================================================
// Constants
// ============================================================================

/// Base unit of the reconnect backoff curve.
const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Upper bound of the default jitter term.
const MAX_JITTER_MS: u64 = 100;

// ============================================================================
// Types
// ============================================================================

/// Source of the additive jitter term, injectable for deterministic tests.
pub type JitterSource = Arc<dyn Fn() -> Duration + Send + Sync>;

/// Derives jitter from the system clock's sub-second nanos, bounded under
/// [`MAX_JITTER_MS`].
fn default_jitter() -> Duration {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|since| since.subsec_nanos())
        .unwrap_or(0);
    Duration::from_millis(u64::from(nanos) % MAX_JITTER_MS)
}

// ============================================================================
// BackoffSchedule
// ============================================================================

/// Reconnect delay curve: `base * (max_retries - retries_remaining)^2 +
/// jitter`.
///
/// The growth is quadratic in the attempt number, not a power of two; the
/// curve is kept as-is for parity with the deployed behavior (see
/// DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffSchedule {
    /// Base unit multiplied by the squared attempt number.
    base: Duration,
    /// Total attempt budget the curve is anchored to.
    max_retries: u32,
}

impl BackoffSchedule {
    /// Creates a schedule for the given base unit and attempt budget.
    #[inline]
    #[must_use]
    pub const fn new(base: Duration, max_retries: u32) -> Self {
        Self { base, max_retries }
    }

    /// Computes the delay before the next attempt.
    ///
    /// `retries_remaining` is the budget left *before* this attempt is
    /// deducted; the first retry therefore waits only the jitter term.
    #[must_use]
    pub fn delay(&self, retries_remaining: u32, jitter: Duration) -> Duration {
        let attempt = self.max_retries.saturating_sub(retries_remaining);
        let factor = attempt.saturating_mul(attempt);
        self.base.saturating_mul(factor).saturating_add(jitter)
    }
}

// ============================================================================
// SessionEvent
// ============================================================================

/// Transport events funneled into the single consumer loop.
enum SessionEvent {
    /// The transport opened.
    Open,
    /// One raw frame arrived.
    Frame(String),
    /// The transport closed (errors normalize into this).
    Closed,
}

// ============================================================================
// UnloadHandle
// ============================================================================

/// Flags shared with [`UnloadHandle`]s.
struct Shared {
    unloading: AtomicBool,
    unload: Notify,
}

/// Handle for signalling page unload from outside the run loop.
///
/// Typically wired to the host's unload listener. Cheap to clone.
#[derive(Clone)]
pub struct UnloadHandle {
    shared: Arc<Shared>,
}

impl UnloadHandle {
    /// Marks the session as unloading: reload actions become no-ops and
    /// any pending reconnect timer is cancelled. The transport itself is
    /// left alone; the page is going away regardless.
    pub fn notify_unload(&self) {
        self.shared.unloading.store(true, Ordering::SeqCst);
        self.shared.unload.notify_one();
    }
}

// ============================================================================
// ReconnectingClient
// ============================================================================

/// Per-session live-update client.
///
/// # Example
///
/// ```ignore
/// use hotline::{ClientOptions, ReconnectingClient};
///
/// let url = url::Url::parse("ws://127.0.0.1:8080/live")?;
/// let client = ReconnectingClient::headless(url, ClientOptions::new());
/// client.run().await?;
/// ```
pub struct ReconnectingClient {
    url: Url,
    options: ClientOptions,
    connector: Box<dyn Connector>,
    surface: Arc<dyn RenderSurface>,
    overlay: Overlay,
    logger: ClientLogger,
    backoff_base: Duration,
    jitter: JitterSource,
    shared: Arc<Shared>,
}

// ============================================================================
// ReconnectingClient - Construction
// ============================================================================

impl ReconnectingClient {
    /// Creates a client over an explicit connector and render surface.
    #[must_use]
    pub fn new(
        url: Url,
        options: ClientOptions,
        connector: Box<dyn Connector>,
        surface: Arc<dyn RenderSurface>,
    ) -> Self {
        let logger = ClientLogger::new(options.log_level);
        Self {
            url,
            options,
            connector,
            surface,
            overlay: Overlay::new(),
            logger,
            backoff_base: DEFAULT_BACKOFF_BASE,
            jitter: Arc::new(default_jitter),
            shared: Arc::new(Shared {
                unloading: AtomicBool::new(false),
                unload: Notify::new(),
            }),
        }
    }

    /// Creates a WebSocket client whose actions surface as log lines.
    ///
    /// The headless shape: real transport, no UI.
    #[must_use]
    pub fn headless(url: Url, options: ClientOptions) -> Self {
        Self::new(
            url,
            options,
            Box::new(WebSocketConnector::new()),
            Arc::new(LoggingSurface),
        )
    }

    /// Overrides the backoff base unit.
    #[inline]
    #[must_use]
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Overrides the jitter source.
    #[must_use]
    pub fn with_jitter(
        mut self,
        jitter: impl Fn() -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.jitter = Arc::new(jitter);
        self
    }

    /// Returns a handle for signalling page unload.
    #[must_use]
    pub fn unload_handle(&self) -> UnloadHandle {
        UnloadHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Marks the session as unloading. See [`UnloadHandle::notify_unload`].
    pub fn notify_unload(&self) {
        self.unload_handle().notify_unload();
    }

    fn is_unloading(&self) -> bool {
        self.shared.unloading.load(Ordering::SeqCst)
    }
}

// ============================================================================
// ReconnectingClient - Run Loop
// ============================================================================

impl ReconnectingClient {
    /// Runs the session to completion.
    ///
    /// Returns `Ok(())` when the session ends normally: unload, or a final
    /// close with reconnection disabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RetriesExhausted`] when the bounded reconnect
    /// budget is spent while the connection stayed down. This is terminal;
    /// only an external restart (a manual page reload) recovers.
    pub async fn run(&self) -> Result<()> {
        let max_retries = self.options.reconnect.max_retries;
        let backoff = BackoffSchedule::new(self.backoff_base, max_retries);
        let mut state = PolicyState::new(&self.options);
        let mut retries_remaining = max_retries;

        loop {
            if self.is_unloading() {
                return Ok(());
            }

            match self.connector.connect(&self.url).await {
                Ok(transport) => {
                    self.drive_session(transport, &mut state, &mut retries_remaining, max_retries)
                        .await;
                }
                Err(e) => {
                    // A failed attempt counts as an immediate close.
                    self.logger.warn(&format!("connection attempt failed: {e}"));
                }
            }

            if self.is_unloading() {
                debug!("unloading; reconnect suppressed");
                return Ok(());
            }

            if !self.options.reconnect.is_enabled() {
                debug!("reconnect disabled; session over");
                return Ok(());
            }

            if retries_remaining == 0 {
                self.logger
                    .warn(&format!("ending reconnect after {max_retries} attempts"));
                return Err(Error::retries_exhausted(max_retries));
            }

            let delay = backoff.delay(retries_remaining, (self.jitter)());
            retries_remaining -= 1;
            debug!(
                delay_ms = delay.as_millis() as u64,
                retries_remaining, "reconnect scheduled"
            );

            tokio::select! {
                () = sleep(delay) => {}
                () = self.shared.unload.notified() => {
                    debug!("unload cancelled pending reconnect");
                    return Ok(());
                }
            }
        }
    }

    /// Consumes one transport's events until it closes.
    ///
    /// Hooks forward into a channel drained by this single consumer, which
    /// is what guarantees in-order, run-to-completion handling.
    async fn drive_session(
        &self,
        transport: Box<dyn Transport>,
        state: &mut PolicyState,
        retries_remaining: &mut u32,
        max_retries: u32,
    ) {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let open_tx = event_tx.clone();
        transport.on_open(Box::new(move || {
            let _ = open_tx.send(SessionEvent::Open);
        }));

        let message_tx = event_tx.clone();
        transport.on_message(Box::new(move |text| {
            let _ = message_tx.send(SessionEvent::Frame(text.to_string()));
        }));

        transport.on_close(Box::new(move || {
            let _ = event_tx.send(SessionEvent::Closed);
        }));

        while let Some(event) = event_rx.recv().await {
            match event {
                SessionEvent::Open => {
                    *retries_remaining = max_retries;
                    self.logger.info("connected");
                }
                SessionEvent::Frame(text) => self.handle_frame(&text, state),
                SessionEvent::Closed => {
                    debug!("transport closed");
                    break;
                }
            }
        }
    }
}

// ============================================================================
// ReconnectingClient - Message Handling
// ============================================================================

impl ReconnectingClient {
    /// Decodes one frame and runs it through the policy.
    ///
    /// Malformed frames are logged and dropped; they never end the session.
    fn handle_frame(&self, text: &str, state: &mut PolicyState) {
        let envelope = match protocol::decode(text) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "dropping malformed frame");
                return;
            }
        };

        let message = envelope.classify();
        self.log_message(&message);

        let actions =
            policy::decide(state, &self.options.overlay, &message, envelope.params.as_ref());
        for action in actions {
            self.apply(action);
        }
    }

    /// Session-level logging per message kind, gated by the client logger.
    fn log_message(&self, message: &Message) {
        match message {
            Message::Invalid => self.logger.info("rebuilding"),
            Message::StillOk => self.logger.info("nothing changed"),
            Message::Hash(hash) => self.logger.verbose(&format!("build hash {hash}")),
            Message::Warnings(warnings) => {
                for warning in warnings {
                    self.logger.warn(warning);
                }
            }
            Message::Errors(errors) => {
                for error in errors {
                    self.logger.error(error);
                }
            }
            Message::ProgressUpdate(progress) => self
                .logger
                .verbose(&format!("{}% - {}", progress.percent, progress.message)),
            Message::Close => self.logger.info("server is closing the channel"),
            Message::Unknown { kind, .. } => self
                .logger
                .verbose(&format!("ignoring unknown message type {kind}")),
            _ => {}
        }
    }

    /// Executes one decided action against the render surface.
    fn apply(&self, action: Action) {
        match action {
            Action::ShowOverlay { kind, message } => {
                self.overlay.show(&*self.surface, kind, &message);
            }
            Action::ClearOverlay => self.overlay.clear(&*self.surface),
            Action::Reload => {
                if self.is_unloading() {
                    debug!("reload suppressed during unload");
                } else {
                    self.surface.reload();
                }
            }
            Action::HotUpdate { hash } => {
                if self.is_unloading() {
                    debug!("hot update suppressed during unload");
                } else {
                    self.surface.apply_hot_update(&hash);
                }
            }
            Action::SetLogLevel(level) => self.logger.set_level(level),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::AtomicU32;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use proptest::prelude::*;

    use crate::client::overlay::OverlayKind;
    use crate::transport::memory::{self, MemoryPeer};

    fn test_url() -> Url {
        Url::parse("ws://127.0.0.1:0/live").expect("url")
    }

    fn frame(message: &Message) -> String {
        protocol::encode(message).expect("encode")
    }

    // ------------------------------------------------------------------
    // Test doubles
    // ------------------------------------------------------------------

    /// Records every surface call for assertions.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Mutex<Vec<SurfaceCall>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum SurfaceCall {
        Overlay(OverlayKind, String),
        Clear,
        Reload,
        Hot(String),
    }

    impl RecordingSurface {
        fn calls(&self) -> Vec<SurfaceCall> {
            self.calls.lock().clone()
        }

        fn count(&self, matcher: impl Fn(&SurfaceCall) -> bool) -> usize {
            self.calls.lock().iter().filter(|call| matcher(call)).count()
        }
    }

    impl RenderSurface for RecordingSurface {
        fn show_overlay(&self, kind: OverlayKind, message: &str) {
            self.calls
                .lock()
                .push(SurfaceCall::Overlay(kind, message.to_string()));
        }

        fn clear_overlay(&self) {
            self.calls.lock().push(SurfaceCall::Clear);
        }

        fn reload(&self) {
            self.calls.lock().push(SurfaceCall::Reload);
        }

        fn apply_hot_update(&self, hash: &str) {
            self.calls.lock().push(SurfaceCall::Hot(hash.to_string()));
        }
    }

    /// Connector whose every attempt is refused.
    #[derive(Default)]
    struct RefusingConnector {
        attempts: AtomicU32,
    }

    #[async_trait]
    impl Connector for Arc<RefusingConnector> {
        async fn connect(&self, _url: &Url) -> Result<Box<dyn Transport>> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(Error::connection("refused"))
        }
    }

    /// Connector producing transports that close before ever opening.
    #[derive(Default)]
    struct ClosingConnector {
        attempts: AtomicU32,
    }

    #[async_trait]
    impl Connector for Arc<ClosingConnector> {
        async fn connect(&self, _url: &Url) -> Result<Box<dyn Transport>> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let (transport, peer) = memory::pair();
            peer.close();
            Ok(Box::new(transport))
        }
    }

    /// Connector handing each connection's peer end to the test.
    struct HandoffConnector {
        peers: mpsc::UnboundedSender<MemoryPeer>,
    }

    impl HandoffConnector {
        fn new() -> (Self, mpsc::UnboundedReceiver<MemoryPeer>) {
            let (tx, rx) = mpsc::unbounded_channel();
            (Self { peers: tx }, rx)
        }
    }

    #[async_trait]
    impl Connector for HandoffConnector {
        async fn connect(&self, _url: &Url) -> Result<Box<dyn Transport>> {
            let (transport, peer) = memory::pair();
            self.peers
                .send(peer)
                .map_err(|_| Error::connection("test over"))?;
            Ok(Box::new(transport))
        }
    }

    fn fast_client(
        options: ClientOptions,
        connector: Box<dyn Connector>,
        surface: Arc<dyn RenderSurface>,
    ) -> ReconnectingClient {
        ReconnectingClient::new(test_url(), options, connector, surface)
            .with_backoff_base(Duration::from_millis(1))
            .with_jitter(|| Duration::ZERO)
    }

    // ------------------------------------------------------------------
    // Backoff curve
    // ------------------------------------------------------------------

    #[test]
    fn test_backoff_quadratic_curve() {
        let schedule = BackoffSchedule::new(Duration::from_secs(1), 10);

        // First retry waits only the jitter term.
        assert_eq!(schedule.delay(10, Duration::ZERO), Duration::ZERO);
        assert_eq!(schedule.delay(9, Duration::ZERO), Duration::from_secs(1));
        assert_eq!(schedule.delay(8, Duration::ZERO), Duration::from_secs(4));
        assert_eq!(schedule.delay(5, Duration::ZERO), Duration::from_secs(25));
        assert_eq!(
            schedule.delay(5, Duration::from_millis(70)),
            Duration::from_millis(25_070)
        );
    }

    proptest! {
        #[test]
        fn prop_backoff_monotonically_non_decreasing(
            base_ms in 1u64..2_000,
            max_retries in 1u32..64,
            jitter_ms in 0u64..100,
        ) {
            let schedule = BackoffSchedule::new(Duration::from_millis(base_ms), max_retries);
            let jitter = Duration::from_millis(jitter_ms);

            let mut last = Duration::ZERO;
            for remaining in (0..=max_retries).rev() {
                let delay = schedule.delay(remaining, jitter);
                prop_assert!(delay >= last, "delay shrank at remaining={remaining}");
                last = delay;
            }
        }
    }

    // ------------------------------------------------------------------
    // Retry budget
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_refused_attempts_exhaust_budget() {
        let connector = Arc::new(RefusingConnector::default());
        let surface = Arc::new(RecordingSurface::default());
        let client = fast_client(
            ClientOptions::new().with_reconnect(3),
            Box::new(Arc::clone(&connector)),
            surface,
        );

        let result = client.run().await;
        assert!(matches!(result, Err(Error::RetriesExhausted { attempts: 3 })));

        // Initial attempt plus exactly three scheduled reconnects.
        assert_eq!(connector.attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_ten_closes_schedule_exactly_ten_reconnects() {
        let connector = Arc::new(ClosingConnector::default());
        let surface = Arc::new(RecordingSurface::default());
        let client = fast_client(
            ClientOptions::new().with_reconnect(10),
            Box::new(Arc::clone(&connector)),
            surface,
        );

        let result = client.run().await;
        assert!(matches!(
            result,
            Err(Error::RetriesExhausted { attempts: 10 })
        ));
        assert_eq!(connector.attempts.load(Ordering::SeqCst), 11);

        // No timers remain; nothing further happens however long we wait.
        sleep(Duration::from_millis(20)).await;
        assert_eq!(connector.attempts.load(Ordering::SeqCst), 11);
    }

    #[tokio::test]
    async fn test_successful_open_refills_budget() {
        let (connector, mut peers) = HandoffConnector::new();
        let surface = Arc::new(RecordingSurface::default());
        let client = fast_client(
            ClientOptions::new().with_reconnect(2),
            Box::new(connector),
            surface,
        );
        let handle = client.unload_handle();

        let task = tokio::spawn(async move { client.run().await });

        // Five open/close cycles exceed a budget of 2 unless each open
        // refills it.
        for _ in 0..5 {
            let peer = peers.recv().await.expect("peer");
            peer.open();
            peer.close();
        }

        let peer = peers.recv().await.expect("still reconnecting");
        handle.notify_unload();
        peer.close();

        assert!(task.await.expect("join").is_ok());
    }

    #[tokio::test]
    async fn test_reconnect_disabled_ends_after_first_close() {
        let connector = Arc::new(ClosingConnector::default());
        let surface = Arc::new(RecordingSurface::default());
        let client = fast_client(
            ClientOptions::new().no_reconnect(),
            Box::new(Arc::clone(&connector)),
            surface,
        );

        assert!(client.run().await.is_ok());
        assert_eq!(connector.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unload_cancels_pending_reconnect() {
        let connector = Arc::new(RefusingConnector::default());
        let surface = Arc::new(RecordingSurface::default());
        let client = ReconnectingClient::new(
            test_url(),
            ClientOptions::new(),
            Box::new(Arc::clone(&connector)),
            surface,
        )
        // Long enough that only cancellation can finish the test quickly.
        .with_backoff_base(Duration::from_secs(60))
        .with_jitter(|| Duration::ZERO);

        let handle = client.unload_handle();
        let task = tokio::spawn(async move { client.run().await });

        // Let the first attempt fail and the timer start.
        sleep(Duration::from_millis(50)).await;
        handle.notify_unload();

        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("unload should cancel the timer")
            .expect("join");
        assert!(result.is_ok());
    }

    // ------------------------------------------------------------------
    // End-to-end scenarios over the in-memory transport
    // ------------------------------------------------------------------

    async fn run_scenario(frames: Vec<String>) -> (Vec<SurfaceCall>, Result<()>) {
        let (connector, mut peers) = HandoffConnector::new();
        let surface = Arc::new(RecordingSurface::default());
        let client = fast_client(
            ClientOptions::new().no_reconnect(),
            Box::new(connector),
            Arc::clone(&surface) as Arc<dyn RenderSurface>,
        );

        let task = tokio::spawn(async move { client.run().await });

        let peer = peers.recv().await.expect("peer");
        peer.open();
        for text in &frames {
            peer.push(text);
        }
        peer.close();

        let result = task.await.expect("join");
        (surface.calls(), result)
    }

    #[tokio::test]
    async fn test_errors_render_overlay_and_never_reload() {
        let (calls, result) = run_scenario(vec![frame(&Message::Errors(vec![
            "Module not found: foo".to_string(),
        ]))])
        .await;

        assert!(result.is_ok());
        assert_eq!(
            calls,
            vec![SurfaceCall::Overlay(
                OverlayKind::Error,
                "Module not found: foo".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_hash_then_ok_hot_updates_once() {
        let (calls, result) = run_scenario(vec![
            // First terminal status ends the initial phase without action.
            frame(&Message::Ok),
            frame(&Message::Hash("abc123".to_string())),
            frame(&Message::Ok),
        ])
        .await;

        assert!(result.is_ok());
        assert_eq!(
            calls
                .iter()
                .filter(|call| matches!(call, SurfaceCall::Hot(hash) if hash == "abc123"))
                .count(),
            1
        );
        assert!(!calls.contains(&SurfaceCall::Reload));
    }

    #[tokio::test]
    async fn test_invalid_then_ok_clears_overlay_after_errors() {
        let (calls, _) = run_scenario(vec![
            frame(&Message::Errors(vec!["boom".to_string()])),
            frame(&Message::Invalid),
            frame(&Message::Hash("h2".to_string())),
            frame(&Message::Ok),
        ])
        .await;

        // Overlay went up on the error and came down on invalid; the
        // clean build then hot-updates.
        assert_eq!(
            calls,
            vec![
                SurfaceCall::Overlay(OverlayKind::Error, "boom".to_string()),
                SurfaceCall::Clear,
                SurfaceCall::Hot("h2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_malformed_frames_are_dropped_not_fatal() {
        let (calls, result) = run_scenario(vec![
            "{{{ not json".to_string(),
            frame(&Message::Ok),
            frame(&Message::ContentChanged),
        ])
        .await;

        assert!(result.is_ok());
        assert!(calls.contains(&SurfaceCall::Reload));
    }

    #[tokio::test]
    async fn test_unload_suppresses_reload_actions() {
        let (connector, mut peers) = HandoffConnector::new();
        let surface = Arc::new(RecordingSurface::default());
        let client = fast_client(
            ClientOptions::new().no_reconnect(),
            Box::new(connector),
            Arc::clone(&surface) as Arc<dyn RenderSurface>,
        );
        let handle = client.unload_handle();

        let task = tokio::spawn(async move { client.run().await });

        let peer = peers.recv().await.expect("peer");
        peer.open();
        peer.push(&frame(&Message::Ok));
        handle.notify_unload();
        peer.push(&frame(&Message::ContentChanged));
        peer.close();

        assert!(task.await.expect("join").is_ok());
        assert_eq!(surface.count(|c| matches!(c, SurfaceCall::Reload)), 0);
    }
}
