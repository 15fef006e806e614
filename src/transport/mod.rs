//! Client transport abstraction.
//!
//! Any duplex channel carrying the live-update protocol satisfies one
//! capability contract: three registration hooks plus send.
//!
//! ```text
//! ┌──────────────────────┐                      ┌──────────────────────┐
//! │  ReconnectingClient  │                      │  Dev server endpoint │
//! │                      │      Transport       │                      │
//! │  on_open / on_close  │◄────────────────────►│  WebSocket or        │
//! │  on_message / send   │                      │  in-process channel  │
//! └──────────────────────┘                      └──────────────────────┘
//! ```
//!
//! # Contract
//!
//! - `on_open` / `on_close` hooks fire at most once per connection.
//! - `on_message` fires once per received frame, in arrival order, with the
//!   raw serialized string; decoding is the caller's responsibility.
//! - Events that occur before a hook is installed are buffered and replayed
//!   on installation, so registration order never loses events.
//! - Transport-level errors are normalized into the close event; they never
//!   surface to the consumer as errors.
//!
//! Concrete variants are independent structs selected through the
//! [`Connector`] factory seam, not subclassing: [`WebSocketTransport`] for
//! real connections, [`MemoryTransport`] for same-process embedding and
//! tests.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `websocket` | tokio-tungstenite client transport |
//! | `memory` | In-process channel-pair transport |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

// ============================================================================
// Submodules
// ============================================================================

mod hooks;

/// In-process channel-pair transport.
pub mod memory;

/// WebSocket client transport.
pub mod websocket;

// ============================================================================
// Re-exports
// ============================================================================

pub use memory::{MemoryPeer, MemoryTransport};
pub use websocket::{WebSocketConnector, WebSocketTransport};

// ============================================================================
// Hook Types
// ============================================================================

/// Callback invoked once when the transport opens.
pub type OpenHook = Box<dyn Fn() + Send + Sync>;

/// Callback invoked once when the transport closes.
///
/// Errors are folded into this event; there is no separate error hook.
pub type CloseHook = Box<dyn Fn() + Send + Sync>;

/// Callback invoked per received frame with the raw serialized message.
pub type MessageHook = Box<dyn Fn(&str) + Send + Sync>;

// ============================================================================
// Transport
// ============================================================================

/// Capability contract for a duplex live-update channel.
pub trait Transport: Send + Sync {
    /// Registers the open hook, invoking it immediately if the transport
    /// already opened.
    fn on_open(&self, hook: OpenHook);

    /// Registers the close hook, invoking it immediately if the transport
    /// already closed.
    fn on_close(&self, hook: CloseHook);

    /// Registers the message hook, replaying any frames received before
    /// registration in arrival order.
    fn on_message(&self, hook: MessageHook);

    /// Sends one serialized frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`](crate::Error::ConnectionClosed)
    /// if the transport is no longer open.
    fn send(&self, text: &str) -> Result<()>;
}

// ============================================================================
// Connector
// ============================================================================

/// Factory seam producing a fresh transport per connection attempt.
///
/// The reconnecting client holds a connector rather than a transport so each
/// retry builds a new channel; swapping the transport variant is a matter of
/// configuration, never of touching the client.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establishes a new transport to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`](crate::Error::Connection) if the
    /// channel cannot be established. The client counts a failed attempt as
    /// an immediate close.
    async fn connect(&self, url: &Url) -> Result<Box<dyn Transport>>;
}
