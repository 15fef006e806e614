//! WebSocket client transport.
//!
//! Wraps a tokio-tungstenite connection behind the [`Transport`] contract.
//! A spawned event loop owns the socket: incoming text frames feed the
//! message hook, outgoing frames arrive over an unbounded channel, and every
//! way the socket can die (remote close, read error, stream end, write
//! failure) funnels into a single close event.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};

use super::hooks::HookSet;
use super::{CloseHook, Connector, MessageHook, OpenHook, Transport};

// ============================================================================
// WebSocketTransport
// ============================================================================

/// Live-update channel over a WebSocket connection.
///
/// # Example
///
/// ```ignore
/// let url = Url::parse("ws://127.0.0.1:8080/ws")?;
/// let transport = WebSocketTransport::connect(&url).await?;
/// transport.on_message(Box::new(|text| println!("frame: {text}")));
/// ```
pub struct WebSocketTransport {
    /// Hook registry shared with the event loop.
    hooks: Arc<HookSet>,
    /// Channel for outgoing frames, consumed by the event loop.
    outgoing: mpsc::UnboundedSender<String>,
}

impl WebSocketTransport {
    /// Connects to a live-update endpoint.
    ///
    /// Spawns the event loop task internally; the open event fires once the
    /// loop starts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the WebSocket handshake fails.
    pub async fn connect(url: &Url) -> Result<Self> {
        let (ws_stream, _response) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|e| Error::connection(format!("WebSocket connect failed: {e}")))?;

        debug!(%url, "WebSocket transport connected");

        let hooks = Arc::new(HookSet::new());
        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();

        tokio::spawn(Self::run_event_loop(
            ws_stream,
            outgoing_rx,
            Arc::clone(&hooks),
        ));

        Ok(Self {
            hooks,
            outgoing: outgoing_tx,
        })
    }

    /// Event loop that owns the socket halves.
    async fn run_event_loop(
        ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
        mut outgoing_rx: mpsc::UnboundedReceiver<String>,
        hooks: Arc<HookSet>,
    ) {
        let (mut ws_write, mut ws_read) = ws_stream.split();

        hooks.fire_open();

        loop {
            tokio::select! {
                frame = ws_read.next() => {
                    match frame {
                        Some(Ok(WsMessage::Text(text))) => {
                            hooks.fire_message(text.as_str());
                        }

                        Some(Ok(WsMessage::Close(_))) => {
                            debug!("WebSocket closed by remote");
                            break;
                        }

                        Some(Err(e)) => {
                            // Errors are normalized into the close event.
                            warn!(error = %e, "WebSocket error");
                            break;
                        }

                        None => {
                            debug!("WebSocket stream ended");
                            break;
                        }

                        // Ignore Binary, Ping, Pong
                        _ => {}
                    }
                }

                outbound = outgoing_rx.recv() => {
                    match outbound {
                        Some(text) => {
                            if let Err(e) = ws_write.send(WsMessage::Text(text.into())).await {
                                warn!(error = %e, "WebSocket send failed");
                                break;
                            }
                        }

                        None => {
                            // Transport handle dropped; close gracefully.
                            let _ = ws_write.close().await;
                            break;
                        }
                    }
                }
            }
        }

        hooks.fire_close();
        debug!("WebSocket event loop terminated");
    }
}

impl Transport for WebSocketTransport {
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
// WebSocketConnector
// ============================================================================

/// [`Connector`] producing [`WebSocketTransport`] instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketConnector;

impl WebSocketConnector {
    /// Creates a new WebSocket connector.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(&self, url: &Url) -> Result<Box<dyn Transport>> {
        Ok(Box::new(WebSocketTransport::connect(url).await?))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::net::TcpListener;

    /// Accepts one WebSocket connection, sends `frames`, then closes.
    async fn one_shot_server(frames: Vec<String>) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("addr").port();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = tokio_tungstenite::accept_async(stream).await.expect("upgrade");
            for frame in frames {
                ws.send(WsMessage::Text(frame.into())).await.expect("send");
            }
            let _ = ws.close(None).await;
        });

        Url::parse(&format!("ws://127.0.0.1:{port}")).expect("url")
    }

    #[tokio::test]
    async fn test_connect_receive_and_close() {
        let url = one_shot_server(vec!["{\"type\":\"ok\"}".to_string()]).await;
        let transport = WebSocketTransport::connect(&url).await.expect("connect");

        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
        transport.on_message(Box::new(move |text| {
            let _ = seen_tx.send(text.to_string());
        }));

        let (closed_tx, closed_rx) = tokio::sync::oneshot::channel();
        let closed_tx = parking_lot::Mutex::new(Some(closed_tx));
        transport.on_close(Box::new(move || {
            if let Some(tx) = closed_tx.lock().take() {
                let _ = tx.send(());
            }
        }));

        assert_eq!(seen_rx.recv().await.as_deref(), Some("{\"type\":\"ok\"}"));
        closed_rx.await.expect("close event");

        // After close, sends report a closed connection.
        assert!(matches!(
            transport.send("{\"type\":\"ok\"}"),
            Err(Error::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn test_connect_refused_is_connection_error() {
        // Bind-then-drop to find a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("addr").port();
        drop(listener);

        let url = Url::parse(&format!("ws://127.0.0.1:{port}")).expect("url");
        let result = WebSocketTransport::connect(&url).await;

        assert!(matches!(result, Err(Error::Connection { .. })));
    }
}
