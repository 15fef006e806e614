//! WebSocket endpoint for live-update clients.
//!
//! Accepts browser/preview connections, registers each with the shared
//! [`Broadcaster`], and pumps broadcast frames onto the socket until the
//! client goes away.
//!
//! # Connection Flow
//!
//! 1. Server binds (port 0 picks a free port) and starts the accept loop
//! 2. A client connects and is upgraded to WebSocket
//! 3. The connection is registered with the broadcaster
//! 4. The server pushes the configuration messages the client consumes
//!    (`log-level`, `hot`); configuration only, never past build events
//! 5. Build-lifecycle broadcasts flow until disconnect or shutdown

// ============================================================================
// Imports
// ============================================================================

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::options::ServerOptions;
use crate::protocol::{self, Message, Params};

use super::broadcaster::{Broadcaster, ClientConnection, ClientSink};

// ============================================================================
// Constants
// ============================================================================

/// Default bind address (localhost).
const DEFAULT_BIND_IP: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Accept poll interval, so the loop notices the shutdown flag.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// ChannelSink
// ============================================================================

/// Broadcaster-facing sink writing into a connection's outgoing queue.
struct ChannelSink {
    outgoing: mpsc::UnboundedSender<String>,
}

impl ClientSink for ChannelSink {
    fn send(&self, text: &str) -> Result<()> {
        self.outgoing
            .send(text.to_string())
            .map_err(|_| Error::ConnectionClosed)
    }
}

// ============================================================================
// SocketServer
// ============================================================================

/// WebSocket endpoint feeding connected clients from a [`Broadcaster`].
///
/// # Example
///
/// ```ignore
/// let broadcaster = Arc::new(Broadcaster::new());
/// let server = SocketServer::bind_local(0, Arc::clone(&broadcaster), options).await?;
/// println!("live updates at {}", server.ws_url());
/// ```
pub struct SocketServer {
    /// Port the endpoint is bound to.
    port: u16,

    /// Shared client set.
    broadcaster: Arc<Broadcaster>,

    /// Configuration pushed to clients on connect.
    options: ServerOptions,

    /// Shutdown flag polled by the accept loop.
    shutdown: AtomicBool,
}

// ============================================================================
// SocketServer - Constructor
// ============================================================================

impl SocketServer {
    /// Binds the endpoint on localhost and starts the accept loop.
    ///
    /// Use port 0 to let the OS assign a free port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if binding fails.
    pub async fn bind_local(
        port: u16,
        broadcaster: Arc<Broadcaster>,
        options: ServerOptions,
    ) -> Result<Arc<Self>> {
        Self::bind(DEFAULT_BIND_IP, port, broadcaster, options).await
    }

    /// Binds the endpoint on a specific address and starts the accept loop.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if binding fails.
    pub async fn bind(
        ip: IpAddr,
        port: u16,
        broadcaster: Arc<Broadcaster>,
        options: ServerOptions,
    ) -> Result<Arc<Self>> {
        let addr = SocketAddr::new(ip, port);
        let listener = TcpListener::bind(addr).await?;
        let actual_port = listener.local_addr()?.port();

        debug!(port = actual_port, "live-update endpoint bound");

        let server = Arc::new(Self {
            port: actual_port,
            broadcaster,
            options,
            shutdown: AtomicBool::new(false),
        });

        let accept_server = Arc::clone(&server);
        tokio::spawn(async move {
            accept_server.accept_loop(listener).await;
        });

        info!(port = actual_port, "live-update endpoint started");

        Ok(server)
    }
}

// ============================================================================
// SocketServer - Public API
// ============================================================================

impl SocketServer {
    /// Returns the WebSocket URL of this endpoint.
    ///
    /// Format: `ws://127.0.0.1:{port}`
    #[inline]
    #[must_use]
    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}", self.port)
    }

    /// Returns the port the endpoint is bound to.
    #[inline]
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Shuts the endpoint down gracefully.
    ///
    /// Clients get a `close` notice before the set is drained; dropping the
    /// sinks ends every per-connection pump.
    pub fn shutdown(&self) {
        info!("live-update endpoint shutting down");
        self.shutdown.store(true, Ordering::SeqCst);

        if let Err(e) = self.broadcaster.broadcast(&Message::Close) {
            warn!(error = %e, "close broadcast failed");
        }
        self.broadcaster.clear();
    }
}

// ============================================================================
// SocketServer - Accept Loop
// ============================================================================

impl SocketServer {
    /// Background task accepting new connections.
    async fn accept_loop(self: Arc<Self>, listener: TcpListener) {
        debug!("accept loop started");

        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                debug!("accept loop shutting down");
                break;
            }

            // Accept with timeout so the shutdown flag is polled.
            match timeout(ACCEPT_POLL_INTERVAL, listener.accept()).await {
                Ok(Ok((stream, addr))) => {
                    let server = Arc::clone(&self);
                    tokio::spawn(async move {
                        if let Err(e) = server.handle_connection(stream, addr).await {
                            warn!(error = %e, ?addr, "connection handling failed");
                        }
                    });
                }
                Ok(Err(e)) => {
                    error!(error = %e, "accept failed");
                }
                Err(_) => continue,
            }
        }

        debug!("accept loop terminated");
    }

    /// Upgrades and serves a single client connection.
    async fn handle_connection(&self, stream: TcpStream, addr: SocketAddr) -> Result<()> {
        debug!(?addr, "new TCP connection");

        let ws_stream = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| Error::connection(format!("WebSocket upgrade failed: {e}")))?;

        let (outgoing_tx, mut outgoing_rx) = mpsc::unbounded_channel();
        let connection = ClientConnection::new(Arc::new(ChannelSink {
            outgoing: outgoing_tx,
        }));
        let id = connection.id();

        // Initial configuration push, queued before any later broadcast can
        // reach this connection.
        for frame in self.config_frames()? {
            connection.send(&frame)?;
        }

        self.broadcaster.register(connection);
        info!(client = %id, ?addr, "client connected");

        let (mut ws_write, mut ws_read) = ws_stream.split();

        loop {
            tokio::select! {
                outbound = outgoing_rx.recv() => {
                    match outbound {
                        Some(text) => {
                            if let Err(e) = ws_write
                                .send(tokio_tungstenite::tungstenite::Message::Text(text.into()))
                                .await
                            {
                                warn!(client = %id, error = %e, "client write failed");
                                break;
                            }
                        }
                        // Sink dropped (shutdown drained the set).
                        None => {
                            let _ = ws_write.close().await;
                            break;
                        }
                    }
                }

                inbound = ws_read.next() => {
                    match inbound {
                        // The protocol is push-only; inbound text is ignored.
                        Some(Ok(tokio_tungstenite::tungstenite::Message::Text(_))) => {}

                        Some(Ok(tokio_tungstenite::tungstenite::Message::Close(_)))
                        | None => {
                            debug!(client = %id, "client closed");
                            break;
                        }

                        Some(Err(e)) => {
                            warn!(client = %id, error = %e, "client read failed");
                            break;
                        }

                        _ => {}
                    }
                }
            }
        }

        self.broadcaster.unregister(&id);
        info!(client = %id, "client disconnected");

        Ok(())
    }

    /// Serialized configuration frames pushed to a freshly connected
    /// client: `log-level` carrying the remaining options as params, then
    /// `hot` when hot updates are on.
    fn config_frames(&self) -> Result<Vec<String>> {
        let mut params = Params::new();
        params.insert(
            "liveReload".to_string(),
            serde_json::json!(self.options.live_reload),
        );
        params.insert(
            "overlay".to_string(),
            serde_json::to_value(self.options.overlay)?,
        );

        let log_level = Message::LogLevel(self.options.log_level)
            .envelope()
            .with_params(params);

        let mut frames = vec![serde_json::to_string(&log_level)?];
        if self.options.hot {
            frames.push(protocol::encode(&Message::Hot)?);
        }
        Ok(frames)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use url::Url;

    use crate::protocol::LogLevel;
    use crate::transport::{Transport, WebSocketTransport};

    async fn connected_client(
        server: &SocketServer,
    ) -> (WebSocketTransport, mpsc::UnboundedReceiver<Message>) {
        let url = Url::parse(&server.ws_url()).expect("url");
        let transport = WebSocketTransport::connect(&url).await.expect("connect");

        let (frames_tx, frames_rx) = mpsc::unbounded_channel();
        transport.on_message(Box::new(move |text| {
            let message = protocol::decode(text).expect("decode").classify();
            let _ = frames_tx.send(message);
        }));

        (transport, frames_rx)
    }

    #[tokio::test]
    async fn test_bind_random_port() {
        let broadcaster = Arc::new(Broadcaster::new());
        let server = SocketServer::bind_local(0, broadcaster, ServerOptions::new())
            .await
            .expect("bind");

        assert!(server.port() > 0);
        assert!(server.ws_url().starts_with("ws://127.0.0.1:"));
        server.shutdown();
    }

    #[tokio::test]
    async fn test_config_push_then_broadcast() {
        let broadcaster = Arc::new(Broadcaster::new());
        let server = SocketServer::bind_local(
            0,
            Arc::clone(&broadcaster),
            ServerOptions::new().with_log_level(LogLevel::Warn),
        )
        .await
        .expect("bind");

        let (_transport, mut frames) = connected_client(&server).await;

        // Configuration first: log-level, then hot (enabled by default).
        assert_eq!(frames.recv().await, Some(Message::LogLevel(LogLevel::Warn)));
        assert_eq!(frames.recv().await, Some(Message::Hot));

        // Registration completed before the config frames were queued, so
        // a broadcast now must arrive after them.
        broadcaster.broadcast(&Message::Invalid).expect("broadcast");
        assert_eq!(frames.recv().await, Some(Message::Invalid));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_hot_disabled_is_not_advertised() {
        let broadcaster = Arc::new(Broadcaster::new());
        let server = SocketServer::bind_local(
            0,
            Arc::clone(&broadcaster),
            ServerOptions::new().with_hot(false),
        )
        .await
        .expect("bind");

        let (_transport, mut frames) = connected_client(&server).await;
        assert_eq!(frames.recv().await, Some(Message::LogLevel(LogLevel::Info)));

        // Next frame is a broadcast, not a `hot` advertisement.
        broadcaster.broadcast(&Message::StillOk).expect("broadcast");
        assert_eq!(frames.recv().await, Some(Message::StillOk));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_shutdown_notifies_and_drains() {
        let broadcaster = Arc::new(Broadcaster::new());
        let server = SocketServer::bind_local(0, Arc::clone(&broadcaster), ServerOptions::new())
            .await
            .expect("bind");

        let (transport, mut frames) = connected_client(&server).await;
        assert_eq!(frames.recv().await, Some(Message::LogLevel(LogLevel::Info)));
        assert_eq!(frames.recv().await, Some(Message::Hot));

        let (closed_tx, closed_rx) = tokio::sync::oneshot::channel();
        let closed_tx = parking_lot::Mutex::new(Some(closed_tx));
        transport.on_close(Box::new(move || {
            if let Some(tx) = closed_tx.lock().take() {
                let _ = tx.send(());
            }
        }));

        server.shutdown();

        assert_eq!(frames.recv().await, Some(Message::Close));
        closed_rx.await.expect("transport close");
        assert!(broadcaster.is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_unregisters() {
        let broadcaster = Arc::new(Broadcaster::new());
        let server = SocketServer::bind_local(0, Arc::clone(&broadcaster), ServerOptions::new())
            .await
            .expect("bind");

        let (transport, mut frames) = connected_client(&server).await;
        assert_eq!(frames.recv().await, Some(Message::LogLevel(LogLevel::Info)));
        assert_eq!(broadcaster.len(), 1);

        drop(transport);

        // The pump notices the socket closing and removes the client.
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while !broadcaster.is_empty() {
            assert!(
                tokio::time::Instant::now() < deadline,
                "client was never unregistered"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        server.shutdown();
    }
}
