//! Build-lifecycle hook.
//!
//! The bundler collaborator calls into this hook at its lifecycle moments;
//! the hook turns them into wire messages:
//!
//! | Compiler moment | Wire messages |
//! |-----------------|---------------|
//! | compile start | `invalid` |
//! | success, clean, hash unchanged | `still-ok` |
//! | success, clean, hash changed | `hash` then `ok` |
//! | success with warnings | `hash` (if changed) then `warnings` |
//! | failure with errors | `errors` |
//! | progress tick | `progress-update` |
//!
//! Turning raw diagnostics into plain strings (ANSI stripping included) is
//! this hook's presentation concern, not the broadcaster's.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::LazyLock;

use parking_lot::Mutex;
use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::options::ServerOptions;
use crate::protocol::{Message, Params, ProgressUpdate};

use super::broadcaster::Broadcaster;

// ============================================================================
// ANSI Stripping
// ============================================================================

/// Matches ANSI escape sequences (colors, cursor movement).
static ANSI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("valid ANSI pattern")
});

/// Strips ANSI escape sequences for plain-text contexts.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    ANSI_PATTERN.replace_all(text, "").into_owned()
}

// ============================================================================
// BuildStats
// ============================================================================

/// Summary of one finished build, as supplied by the bundler collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Hash of the emitted build, if the bundler produces one.
    pub hash: Option<String>,

    /// Error diagnostics, possibly ANSI-colored.
    pub errors: Vec<String>,

    /// Warning diagnostics, possibly ANSI-colored.
    pub warnings: Vec<String>,
}

impl BuildStats {
    /// Creates an empty (clean, hashless) summary.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the build hash.
    #[inline]
    #[must_use]
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Sets the error list.
    #[inline]
    #[must_use]
    pub fn with_errors(mut self, errors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.errors = errors.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the warning list.
    #[inline]
    #[must_use]
    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.warnings = warnings.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if the build failed.
    #[inline]
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if the build produced warnings.
    #[inline]
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Error list with ANSI escapes stripped.
    #[must_use]
    pub fn plain_errors(&self) -> Vec<String> {
        self.errors.iter().map(|e| strip_ansi(e)).collect()
    }

    /// Warning list with ANSI escapes stripped.
    #[must_use]
    pub fn plain_warnings(&self) -> Vec<String> {
        self.warnings.iter().map(|w| strip_ansi(w)).collect()
    }
}

// ============================================================================
// BuildLifecycle
// ============================================================================

/// Maps compiler lifecycle moments onto broadcasts.
///
/// Tracks the last broadcast hash so an unchanged clean rebuild collapses
/// into the explicit `still-ok` signal instead of busywork on every client.
pub struct BuildLifecycle {
    broadcaster: Arc<Broadcaster>,
    options: ServerOptions,

    /// Hash of the last build broadcast to clients.
    last_hash: Mutex<Option<String>>,
}

impl BuildLifecycle {
    /// Creates a lifecycle hook feeding the given broadcaster.
    #[must_use]
    pub fn new(broadcaster: Arc<Broadcaster>, options: ServerOptions) -> Self {
        Self {
            broadcaster,
            options,
            last_hash: Mutex::new(None),
        }
    }

    /// Compile start: tell clients a rebuild is in progress.
    ///
    /// # Errors
    ///
    /// Returns an error only if frame encoding fails.
    pub fn invalid(&self) -> Result<()> {
        debug!("build invalidated");
        self.broadcaster.broadcast(&Message::Invalid)?;
        Ok(())
    }

    /// Incremental progress tick. `percent` is clamped to 0..=100.
    ///
    /// # Errors
    ///
    /// Returns an error only if frame encoding fails.
    pub fn progress(&self, percent: f64, message: &str) -> Result<()> {
        self.broadcaster
            .broadcast(&Message::ProgressUpdate(ProgressUpdate {
                percent: percent.clamp(0.0, 100.0),
                message: message.to_string(),
            }))?;
        Ok(())
    }

    /// Compile done: broadcast the outcome of a finished build.
    ///
    /// # Errors
    ///
    /// Returns an error only if frame encoding fails.
    pub fn done(&self, stats: &BuildStats) -> Result<()> {
        let mut last_hash = self.last_hash.lock();

        if stats.has_errors() {
            // Record the hash so a later clean rebuild of the same input
            // still dedupes, but never push a reload trigger on errors.
            if let Some(hash) = &stats.hash {
                *last_hash = Some(hash.clone());
            }
            debug!(count = stats.errors.len(), "build finished with errors");
            self.broadcaster.broadcast_with(
                &Message::Errors(stats.plain_errors()),
                Some(self.overlay_params()),
                None,
            )?;
            return Ok(());
        }

        if stats.has_warnings() {
            if let Some(hash) = &stats.hash
                && last_hash.as_deref() != Some(hash.as_str())
            {
                *last_hash = Some(hash.clone());
                self.broadcaster.broadcast(&Message::Hash(hash.clone()))?;
            }
            debug!(count = stats.warnings.len(), "build finished with warnings");
            self.broadcaster.broadcast_with(
                &Message::Warnings(stats.plain_warnings()),
                Some(self.overlay_params()),
                None,
            )?;
            return Ok(());
        }

        match &stats.hash {
            Some(hash) if last_hash.as_deref() == Some(hash.as_str()) => {
                debug!(hash, "build unchanged");
                self.broadcaster.broadcast(&Message::StillOk)?;
            }
            Some(hash) => {
                *last_hash = Some(hash.clone());
                debug!(hash, "build ok");
                self.broadcaster.broadcast(&Message::Hash(hash.clone()))?;
                self.broadcaster.broadcast(&Message::Ok)?;
            }
            None => {
                // No hash to correlate; every clean build counts as fresh.
                debug!("build ok (no hash)");
                self.broadcaster.broadcast(&Message::Ok)?;
            }
        }

        Ok(())
    }

    /// Overlay options in effect, as broadcast metadata.
    fn overlay_params(&self) -> Params {
        let mut params = Params::new();
        if let Ok(overlay) = serde_json::to_value(self.options.overlay) {
            params.insert("overlay".to_string(), overlay);
        }
        params
    }
}

// ============================================================================
// Tests
// ============================================================================
