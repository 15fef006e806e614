//! In-process channel-pair transport.
//!
//! Carries the protocol between a client and a server living in the same
//! process, with no socket underneath. Used to embed a preview client next
//! to the dev server and as the deterministic transport in tests: the peer
//! end scripts open/message/close events directly.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::{Error, Result};

use super::hooks::HookSet;
use super::{CloseHook, MessageHook, OpenHook, Transport};

// ============================================================================
// Pair Constructor
// ============================================================================

/// Creates a connected transport/peer pair.
///
/// The transport side goes to a [`ReconnectingClient`]; the peer side stays
/// with the driver (server or test), which feeds events and reads frames the
/// client sent.
///
/// The channel starts unopened: call [`MemoryPeer::open`] to fire the open
/// event, mirroring a real handshake completing.
///
/// [`ReconnectingClient`]: crate::client::ReconnectingClient
#[must_use]
pub fn pair() -> (MemoryTransport, MemoryPeer) {
    let hooks = Arc::new(HookSet::new());
    let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();

    (
        MemoryTransport {
            hooks: Arc::clone(&hooks),
            outgoing: outgoing_tx,
        },
        MemoryPeer {
            hooks,
            from_transport: outgoing_rx,
        },
    )
}

// ============================================================================
// MemoryTransport
// ============================================================================

/// Client half of an in-process channel pair.
pub struct MemoryTransport {
    hooks: Arc<HookSet>,
    outgoing: mpsc::UnboundedSender<String>,
}

impl Transport for MemoryTransport {
    fn on_open(&self, hook: OpenHook) {
        self.hooks.set_open(hook);
    }

    fn on_close(&self, hook: CloseHook) {
        self.hooks.set_close(hook);
    }

    fn on_message(&self, hook: MessageHook) {
        self.hooks.set_message(hook);
    }

    fn send(&self, text: &str) -> Result<()> {
        if self.hooks.is_closed() {
            return Err(Error::ConnectionClosed);
        }
        self.outgoing
            .send(text.to_string())
            .map_err(|_| Error::ConnectionClosed)
    }
}

// ============================================================================
// MemoryPeer
// ============================================================================

/// Driver half of an in-process channel pair.
///
/// Events pushed here surface on the transport's hooks exactly as a socket
/// event loop would deliver them.
pub struct MemoryPeer {
    hooks: Arc<HookSet>,
    from_transport: mpsc::UnboundedReceiver<String>,
}

impl MemoryPeer {
    /// Fires the open event, as if a handshake completed.
    pub fn open(&self) {
        self.hooks.fire_open();
    }

    /// Delivers one frame to the transport's message hook.
    pub fn push(&self, text: &str) {
        self.hooks.fire_message(text);
    }

    /// Fires the close event, as if the connection dropped.
    pub fn close(&self) {
        self.hooks.fire_close();
    }

    /// Receives the next frame the transport sent, waiting if none is
    /// queued. Returns `None` once the transport handle is dropped.
    pub async fn recv(&mut self) -> Option<String> {
        self.from_transport.recv().await
    }

    /// Receives the next already-queued frame without waiting.
    pub fn try_recv(&mut self) -> Option<String> {
        self.from_transport.try_recv().ok()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::Mutex;

    #[test]
    fn test_pair_delivers_in_order() {
        let (transport, peer) = pair();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        transport.on_message(Box::new(move |text| {
            sink.lock().push(text.to_string());
        }));

        peer.open();
        peer.push("one");
        peer.push("two");
        peer.push("three");

        assert_eq!(*seen.lock(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_send_reaches_peer() {
        let (transport, mut peer) = pair();
        peer.open();

        transport.send("frame-a").expect("send");
        transport.send("frame-b").expect("send");

        assert_eq!(peer.try_recv().as_deref(), Some("frame-a"));
        assert_eq!(peer.try_recv().as_deref(), Some("frame-b"));
        assert_eq!(peer.try_recv(), None);
    }

    #[test]
    fn test_send_after_close_fails() {
        let (transport, peer) = pair();
        peer.open();
        peer.close();

        assert!(matches!(
            transport.send("late"),
            Err(Error::ConnectionClosed)
        ));
    }

    #[test]
    fn test_recv_none_after_transport_dropped() {
        let (transport, mut peer) = pair();
        drop(transport);

        tokio_test::block_on(async {
            assert_eq!(peer.recv().await, None);
        });
    }
}
