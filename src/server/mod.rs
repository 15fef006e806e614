//! Server-side live-update machinery.
//!
//! ```text
//! ┌──────────┐  invalid/done/   ┌────────────────┐  encoded    ┌─────────────┐
//! │ Bundler  │───progress──────►│ BuildLifecycle │──frames────►│ Broadcaster │
//! └──────────┘                  └────────────────┘             └──────┬──────┘
//!                                                                    │ fanout
//!                                                     ┌──────────────┴─────┐
//!                                                     │ SocketServer pumps │
//!                                                     │ one WebSocket per  │
//!                                                     │ connected client   │
//!                                                     └────────────────────┘
//! ```
//!
//! The bundler is an external collaborator: it calls the lifecycle hook at
//! its compile moments and this module does the rest. Delivery is
//! best-effort; a client that connects after an event fired starts from the
//! next one.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `broadcaster` | Client set and fanout |
//! | `lifecycle` | Compiler moments to wire messages |
//! | `socket` | WebSocket endpoint and per-client pumps |

// ============================================================================
// Submodules
// ============================================================================

/// Client set and fanout.
pub mod broadcaster;

/// Compiler moments to wire messages.
pub mod lifecycle;

/// WebSocket endpoint and per-client pumps.
pub mod socket;

// ============================================================================
// Re-exports
// ============================================================================

pub use broadcaster::{Broadcaster, ClientConnection, ClientId, ClientSink};
pub use lifecycle::{BuildLifecycle, BuildStats, strip_ansi};
pub use socket::SocketServer;
