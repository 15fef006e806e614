//! Wire protocol message types.
//!
//! This module defines the message format pushed from the development server
//! to connected clients over a live-update channel.
//!
//! # Protocol Overview
//!
//! | Message | Direction | Purpose |
//! |---------|-----------|---------|
//! | `invalid` | Server → Client | A rebuild started |
//! | `hash` | Server → Client | New build hash |
//! | `ok` / `still-ok` | Server → Client | Build finished clean |
//! | `warnings` / `errors` | Server → Client | Build diagnostics |
//! | `progress-update` | Server → Client | Incremental build progress |
//! | `hot` / `log-level` | Server → Client | Client configuration |
//! | `close` / `content-changed` | Server → Client | Shutdown / static edit |
//!
//! Every logical event is one serialized JSON envelope:
//!
//! ```json
//! { "type": "warnings", "data": ["unused variable `x`"], "params": { ... } }
//! ```
//!
//! Receivers ignore unrecognized `type` values and tolerate extra envelope
//! fields; a malformed frame is a recoverable error the receiver logs and
//! drops.

// ============================================================================
// Submodules
// ============================================================================

/// Message envelope, typed message enumeration, and codec functions.
pub mod message;

// ============================================================================
// Re-exports
// ============================================================================

pub use message::{Envelope, LogLevel, Message, Params, ProgressUpdate, decode, encode};
