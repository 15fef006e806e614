//! Client and server configuration options.
//!
//! Provides the configuration surface consumed from the host server's option
//! parser. Two fields accept shorthand forms on the wire/config side:
//!
//! - `overlay`: `true`/`false` or `{ "errors": bool, "warnings": bool }`
//! - `reconnect`: `true`/`false` or a max-attempts number
//!
//! # Example
//!
//! ```ignore
//! use hotline::{ClientOptions, OverlayOptions};
//!
//! let options = ClientOptions::new()
//!     .with_overlay(OverlayOptions::new().with_warnings(true))
//!     .with_reconnect(5)
//!     .with_live_reload(false);
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Deserializer, Serialize};

use crate::protocol::LogLevel;

// ============================================================================
// Constants
// ============================================================================

/// Default reconnect attempt budget when `reconnect: true`.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

// ============================================================================
// OverlayOptions
// ============================================================================

/// In-page overlay behavior for build diagnostics.
///
/// The shorthand `overlay: true` enables the error overlay only; warnings
/// stay in the console unless opted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlayOptions {
    /// Render the overlay for build errors.
    pub errors: bool,

    /// Render the overlay for build warnings.
    pub warnings: bool,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            errors: true,
            warnings: false,
        }
    }
}

impl OverlayOptions {
    /// Creates overlay options with the default behavior (errors only).
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: true,
            warnings: false,
        }
    }

    /// Creates overlay options with the overlay fully disabled.
    #[inline]
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            errors: false,
            warnings: false,
        }
    }

    /// Sets whether errors render the overlay.
    #[inline]
    #[must_use]
    pub fn with_errors(mut self, enabled: bool) -> Self {
        self.errors = enabled;
        self
    }

    /// Sets whether warnings render the overlay.
    #[inline]
    #[must_use]
    pub fn with_warnings(mut self, enabled: bool) -> Self {
        self.warnings = enabled;
        self
    }
}

/// Accepts `bool` or `{ errors?, warnings? }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum OverlayForm {
    Flag(bool),
    Options {
        #[serde(default)]
        errors: Option<bool>,
        #[serde(default)]
        warnings: Option<bool>,
    },
}

impl<'de> Deserialize<'de> for OverlayOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let form = OverlayForm::deserialize(deserializer)?;
        Ok(match form {
            OverlayForm::Flag(true) => Self::new(),
            OverlayForm::Flag(false) => Self::disabled(),
            OverlayForm::Options { errors, warnings } => Self {
                errors: errors.unwrap_or(true),
                warnings: warnings.unwrap_or(false),
            },
        })
    }
}

// ============================================================================
// ReconnectPolicy
// ============================================================================

/// Bounded reconnect budget.
///
/// The shorthand `reconnect: true` uses [`DEFAULT_MAX_RETRIES`]; `false` or
/// `0` disables reconnection entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconnectPolicy {
    /// Maximum reconnect attempts before giving up permanently.
    pub max_retries: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ReconnectPolicy {
    /// Creates a policy with an explicit attempt budget.
    #[inline]
    #[must_use]
    pub const fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Creates a policy that never reconnects.
    #[inline]
    #[must_use]
    pub const fn disabled() -> Self {
        Self { max_retries: 0 }
    }

    /// Returns `true` if reconnection is enabled at all.
    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }
}

/// Accepts `bool` or a max-attempts number.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReconnectForm {
    Flag(bool),
    Count(u32),
}

impl<'de> Deserialize<'de> for ReconnectPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let form = ReconnectForm::deserialize(deserializer)?;
        Ok(match form {
            ReconnectForm::Flag(true) => Self::default(),
            ReconnectForm::Flag(false) => Self::disabled(),
            ReconnectForm::Count(count) => Self::new(count),
        })
    }
}

// ============================================================================
// ClientOptions
// ============================================================================

/// Configuration for one client session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientOptions {
    /// Overlay behavior for build diagnostics.
    pub overlay: OverlayOptions,

    /// Apply hot updates instead of full reloads where possible.
    pub hot: bool,

    /// Perform full page reloads when a build invalidates the page.
    pub live_reload: bool,

    /// Reconnect budget after a dropped connection.
    pub reconnect: ReconnectPolicy,

    /// Initial client log verbosity.
    pub log_level: LogLevel,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            overlay: OverlayOptions::default(),
            hot: true,
            live_reload: true,
            reconnect: ReconnectPolicy::default(),
            log_level: LogLevel::Info,
        }
    }
}

impl ClientOptions {
    /// Creates client options with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overlay behavior.
    #[inline]
    #[must_use]
    pub fn with_overlay(mut self, overlay: OverlayOptions) -> Self {
        self.overlay = overlay;
        self
    }

    /// Enables or disables hot updates.
    #[inline]
    #[must_use]
    pub fn with_hot(mut self, enabled: bool) -> Self {
        self.hot = enabled;
        self
    }

    /// Enables or disables full-page live reload.
    #[inline]
    #[must_use]
    pub fn with_live_reload(mut self, enabled: bool) -> Self {
        self.live_reload = enabled;
        self
    }

    /// Sets the reconnect attempt budget.
    #[inline]
    #[must_use]
    pub fn with_reconnect(mut self, max_retries: u32) -> Self {
        self.reconnect = ReconnectPolicy::new(max_retries);
        self
    }

    /// Disables reconnection entirely.
    #[inline]
    #[must_use]
    pub fn no_reconnect(mut self) -> Self {
        self.reconnect = ReconnectPolicy::disabled();
        self
    }

    /// Sets the initial log verbosity.
    #[inline]
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

// ============================================================================
// ServerOptions
// ============================================================================

/// Configuration the server pushes to clients when they connect.
///
/// These mirror the client-side fields; the server's values are delivered
/// as protocol messages (`hot`, `log-level`) and overlay `params` so a bare
/// client picks up the host configuration without a second channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerOptions {
    /// Advertise hot-module-replacement to clients.
    pub hot: bool,

    /// Advertise full-page live reload to clients.
    pub live_reload: bool,

    /// Overlay options advertised alongside diagnostics.
    pub overlay: OverlayOptions,

    /// Log verbosity pushed to clients on connect.
    pub log_level: LogLevel,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            hot: true,
            live_reload: true,
            overlay: OverlayOptions::default(),
            log_level: LogLevel::Info,
        }
    }
}

impl ServerOptions {
    /// Creates server options with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables hot-update advertisement.
    #[inline]
    #[must_use]
    pub fn with_hot(mut self, enabled: bool) -> Self {
        self.hot = enabled;
        self
    }

    /// Enables or disables live-reload advertisement.
    #[inline]
    #[must_use]
    pub fn with_live_reload(mut self, enabled: bool) -> Self {
        self.live_reload = enabled;
        self
    }

    /// Sets the overlay options advertised to clients.
    #[inline]
    #[must_use]
    pub fn with_overlay(mut self, overlay: OverlayOptions) -> Self {
        self.overlay = overlay;
        self
    }

    /// Sets the log verbosity pushed to clients.
    #[inline]
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
