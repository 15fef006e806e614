//! Hotline - live-update notification protocol for development servers.
//!
//! This library provides the push channel between a development server and
//! its connected browser/preview clients: build-lifecycle events go out as
//! a small JSON message protocol, and each client decides locally whether
//! to fully reload, apply a hot update, show a diagnostics overlay, or do
//! nothing.
//!
//! # Architecture
//!
//! The crate follows a server/client split over one wire protocol:
//!
//! - **Server side**: [`BuildLifecycle`] turns compiler moments into
//!   messages, [`Broadcaster`] fans them out, [`SocketServer`] carries them
//!   over WebSocket.
//! - **Client side**: [`ReconnectingClient`] consumes messages through a
//!   swappable [`Transport`], runs each through a pure decision policy, and
//!   acts via a [`RenderSurface`]. Dropped connections reconnect with a
//!   bounded-retry backoff.
//!
//! Key design principles:
//!
//! - Transports are capability objects behind one contract, selected by
//!   configuration
//! - Message dispatch is a tagged-variant match over a closed enumeration;
//!   unknown types are ignored, never fatal
//! - Per-session state (retry budget, overlay, log level) is owned by the
//!   session; there is no global mutable state
//! - Every failure is either bounded-retried or logged and absorbed; this
//!   subsystem never takes down the host page or server
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use hotline::{
//!     Broadcaster, BuildLifecycle, BuildStats, ClientOptions, ReconnectingClient,
//!     Result, ServerOptions, SocketServer,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Server side: endpoint + lifecycle hook over one broadcaster.
//!     let broadcaster = Arc::new(Broadcaster::new());
//!     let server =
//!         SocketServer::bind_local(0, Arc::clone(&broadcaster), ServerOptions::new()).await?;
//!     let lifecycle = BuildLifecycle::new(broadcaster, ServerOptions::new());
//!
//!     // Client side: connect a headless session to the endpoint.
//!     let url = url::Url::parse(&server.ws_url()).expect("endpoint url");
//!     let client = ReconnectingClient::headless(url, ClientOptions::new());
//!     tokio::spawn(async move { client.run().await });
//!
//!     // The bundler collaborator drives the hook.
//!     lifecycle.invalid()?;
//!     lifecycle.done(&BuildStats::new().with_hash("abc123"))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Reconnecting client, decision policy, overlay surface |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`options`] | Client/server configuration surface |
//! | [`protocol`] | Wire message types and codec |
//! | [`server`] | Broadcaster, build-lifecycle hook, WebSocket endpoint |
//! | [`transport`] | Transport capability trait and variants |

// ============================================================================
// Modules
// ============================================================================

/// Browser/preview-side client machinery.
///
/// One [`ReconnectingClient`] per session, acting through a
/// [`RenderSurface`].
pub mod client;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Client and server configuration options.
///
/// Supports the shorthand config forms (`overlay: true`, `reconnect: 5`).
pub mod options;

/// Wire protocol message types and codec.
pub mod protocol;

/// Server-side broadcaster, lifecycle hook, and WebSocket endpoint.
pub mod server;

/// Transport capability trait and concrete variants.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{
    Action, BackoffSchedule, ClientLogger, FrameInfo, LoggingSurface, Overlay, OverlayKind,
    PolicyState, ReconnectingClient, ReloadTarget, RenderSurface, UnloadHandle,
};

// Error types
pub use error::{Error, Result};

// Option types
pub use options::{ClientOptions, OverlayOptions, ReconnectPolicy, ServerOptions};

// Protocol types
pub use protocol::{Envelope, LogLevel, Message, ProgressUpdate};

// Server types
pub use server::{
    Broadcaster, BuildLifecycle, BuildStats, ClientConnection, ClientId, ClientSink, SocketServer,
};

// Transport types
pub use transport::{Connector, MemoryTransport, Transport, WebSocketConnector, WebSocketTransport};
