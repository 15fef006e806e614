//! Browser/preview-side client.
//!
//! One [`ReconnectingClient`] per open page or preview session. The client
//! owns the session's transport, decodes incoming frames, and acts on them
//! through a pluggable [`RenderSurface`]:
//!
//! ```text
//! transport frame ──► decode ──► policy::decide ──► actions ──► surface
//!                                     │
//!                              PolicyState (initial, hash, hot, liveReload)
//! ```
//!
//! Sessions are fully independent: each tab runs its own client with its
//! own retry budget, overlay state, and logger. There is no cross-session
//! coordination.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `reconnect` | Bounded-retry state machine and run loop |
//! | `policy` | Pure overlay/reload decision function |
//! | `overlay` | Overlay bookkeeping and the render-surface seam |
//! | `logger` | Per-session level-gated logger |

// ============================================================================
// Submodules
// ============================================================================

/// Per-session level-gated logger.
pub mod logger;

/// Overlay bookkeeping and the render-surface seam.
pub mod overlay;

/// Pure overlay/reload decision function.
pub mod policy;

/// Bounded-retry state machine and run loop.
pub mod reconnect;

// ============================================================================
// Re-exports
// ============================================================================

pub use logger::ClientLogger;
pub use overlay::{FrameInfo, LoggingSurface, Overlay, OverlayKind, ReloadTarget, RenderSurface};
pub use policy::{Action, PolicyState};
pub use reconnect::{BackoffSchedule, JitterSource, ReconnectingClient, UnloadHandle};
