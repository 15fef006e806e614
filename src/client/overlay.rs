//! Overlay state and the render-surface seam.
//!
//! The policy decides *what* to do; the host environment decides *how* it
//! looks. Everything host-specific (DOM nodes, frame traversal, process
//! restarts) lives behind the [`RenderSurface`] capability so the client
//! runs and tests headlessly.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use parking_lot::Mutex;
use tracing::{error, info, warn};

// ============================================================================
// OverlayKind
// ============================================================================

/// Severity of the diagnostic an overlay renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Build error; blocks the page until resolved.
    Error,
    /// Build warning; informational.
    Warning,
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

// ============================================================================
// RenderSurface
// ============================================================================

/// Host-environment capability the client acts through.
///
/// A browser host backs this with DOM manipulation and `location.reload`;
/// a native preview host with its own widgets; tests with a recorder.
pub trait RenderSurface: Send + Sync {
    /// Renders the overlay with a single message, replacing any content the
    /// current overlay shows.
    fn show_overlay(&self, kind: OverlayKind, message: &str);

    /// Removes the overlay. Only called while an overlay is showing.
    fn clear_overlay(&self);

    /// Performs a full page reload.
    fn reload(&self);

    /// Applies a hot update for the given build hash.
    fn apply_hot_update(&self, hash: &str);
}

// ============================================================================
// Overlay
// ============================================================================

/// Tracks overlay presence, enforcing the single-instance invariant.
///
/// At most one overlay exists at a time: showing while one is present
/// replaces its content; clearing when none is present is a no-op and never
/// reaches the surface.
pub struct Overlay {
    active: Mutex<bool>,
}

impl Overlay {
    /// Creates an overlay tracker with nothing showing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: Mutex::new(false),
        }
    }

    /// Shows `message` on `surface`, replacing current content if an
    /// overlay is already up.
    pub fn show(&self, surface: &dyn RenderSurface, kind: OverlayKind, message: &str) {
        *self.active.lock() = true;
        surface.show_overlay(kind, message);
    }

    /// Clears the overlay if one is showing.
    pub fn clear(&self, surface: &dyn RenderSurface) {
        let mut active = self.active.lock();
        if *active {
            *active = false;
            surface.clear_overlay();
        }
    }

    /// Returns `true` while an overlay is showing.
    #[inline]
    #[must_use]
    pub fn is_showing(&self) -> bool {
        *self.active.lock()
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// LoggingSurface
// ============================================================================

/// Render surface for headless embedding: every action becomes a log line.
///
/// Useful when the client runs next to a native preview that has its own
/// refresh machinery, or in smoke setups with no UI at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSurface;

impl RenderSurface for LoggingSurface {
    fn show_overlay(&self, kind: OverlayKind, message: &str) {
        match kind {
            OverlayKind::Error => error!(%message, "build error overlay"),
            OverlayKind::Warning => warn!(%message, "build warning overlay"),
        }
    }

    fn clear_overlay(&self) {
        info!("overlay cleared");
    }

    fn reload(&self) {
        info!("full reload requested");
    }

    fn apply_hot_update(&self, hash: &str) {
        info!(hash, "hot update requested");
    }
}

// ============================================================================
// Frame Targeting
// ============================================================================

/// One frame in the chain from the current frame up to the root, carrying
/// the piece of identity reload targeting needs: its URL protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    /// URL scheme of the frame, e.g. `https:` or `about:`.
    pub protocol: String,
}

impl FrameInfo {
    /// Creates a frame descriptor from its URL protocol.
    #[inline]
    #[must_use]
    pub fn new(protocol: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
        }
    }
}

/// Where a full reload should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTarget {
    /// Reload the frame at this index of the chain (0 = the current frame).
    Frame(usize),
    /// No frame in the chain is reloadable; force-reload the current frame
    /// regardless.
    Forced,
}

/// Picks the frame a full reload should land on.
///
/// `chain` is ordered from the current frame up to the root. An
/// iframe-hosted page often sits in synthetic `about:` frames that cannot
/// be meaningfully reloaded; walk upward until a frame with a real protocol
/// appears. If the whole chain is synthetic, fall back to forcing a reload
/// of the current frame.
#[must_use]
pub fn reload_target(chain: &[FrameInfo]) -> ReloadTarget {
    chain
        .iter()
        .position(|frame| frame.protocol != "about:")
        .map_or(ReloadTarget::Forced, ReloadTarget::Frame)
}

// ============================================================================
// Tests
// ============================================================================
