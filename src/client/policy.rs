//! Overlay/reload decision policy.
//!
//! Pure decision core of the client: given the session state, the overlay
//! configuration, and one incoming message, produce the local actions to
//! take. No transport, no timers, no host environment; the surrounding
//! client executes the returned actions against its [`RenderSurface`].
//!
//! [`RenderSurface`]: crate::client::RenderSurface

// ============================================================================
// Imports
// ============================================================================

use crate::options::{ClientOptions, OverlayOptions};
use crate::protocol::{LogLevel, Message, Params};

use super::overlay::OverlayKind;

// ============================================================================
// PolicyState
// ============================================================================

/// Mutable session state the policy threads between messages.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyState {
    /// True until the first terminal status (`ok`/`warnings`/`errors`) has
    /// been processed. The very first status after page load never triggers
    /// a reload: there is no previous state to invalidate.
    pub initial: bool,

    /// Last build hash seen, correlating a reload/update to the build that
    /// produced it.
    pub current_hash: Option<String>,

    /// Hot-module-replacement enabled for this session. Seeded from the
    /// options; the `hot` wire message can switch it on.
    pub hot: bool,

    /// Full-page live reload enabled for this session.
    pub live_reload: bool,
}

impl PolicyState {
    /// Creates the initial session state from the client options.
    #[must_use]
    pub fn new(options: &ClientOptions) -> Self {
        Self {
            initial: true,
            current_hash: None,
            hot: options.hot,
            live_reload: options.live_reload,
        }
    }
}

// ============================================================================
// Action
// ============================================================================

/// A local action decided by the policy.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Render the overlay with one message, replacing any current content.
    ShowOverlay {
        /// Diagnostic severity, controls overlay styling.
        kind: OverlayKind,
        /// The single message to render (the earliest reported).
        message: String,
    },

    /// Remove the overlay if one is showing.
    ClearOverlay,

    /// Perform a full page reload.
    Reload,

    /// Apply a hot update instead of a full reload.
    HotUpdate {
        /// Hash of the build to update to.
        hash: String,
    },

    /// Adjust the client's own log verbosity.
    SetLogLevel(LogLevel),
}

// ============================================================================
// Decision Function
// ============================================================================

/// Decides the local actions for one incoming message.
///
/// `params` may carry an `overlay` override for this message (the options
/// the server had in effect when it broadcast the diagnostics); absent, the
/// client's configured overlay options apply.
///
/// Unrecognized message types produce no actions.
pub fn decide(
    state: &mut PolicyState,
    overlay: &OverlayOptions,
    message: &Message,
    params: Option<&Params>,
) -> Vec<Action> {
    let overlay = effective_overlay(overlay, params);

    match message {
        Message::Hot => {
            state.hot = true;
            Vec::new()
        }

        // A rebuild started: stale overlays must not linger over it.
        Message::Invalid => vec![Action::ClearOverlay],

        Message::Hash(hash) => {
            state.current_hash = Some(hash.clone());
            Vec::new()
        }

        Message::StillOk => vec![Action::ClearOverlay],

        Message::LogLevel(level) => vec![Action::SetLogLevel(*level)],

        Message::Ok => {
            let mut actions = vec![Action::ClearOverlay];
            if state.initial {
                state.initial = false;
            } else {
                actions.extend(reload_actions(state));
            }
            actions
        }

        Message::Warnings(warnings) => {
            let mut actions = Vec::new();
            if overlay.warnings
                && let Some(first) = warnings.first()
            {
                actions.push(Action::ShowOverlay {
                    kind: OverlayKind::Warning,
                    message: first.clone(),
                });
            }
            if state.initial {
                state.initial = false;
            } else {
                actions.extend(reload_actions(state));
            }
            actions
        }

        Message::Errors(errors) => {
            state.initial = false;
            if overlay.errors
                && let Some(first) = errors.first()
            {
                vec![Action::ShowOverlay {
                    kind: OverlayKind::Error,
                    message: first.clone(),
                }]
            } else {
                Vec::new()
            }
        }

        Message::ContentChanged => vec![Action::Reload],

        // Progress is log-only; `close` is handled by the transport close
        // path; unknown types are ignored.
        Message::ProgressUpdate(_) | Message::Close | Message::Unknown { .. } => Vec::new(),
    }
}

/// Branches a reload on the session configuration: hot update when HMR is
/// on, full reload when live reload is on, nothing otherwise.
fn reload_actions(state: &PolicyState) -> Vec<Action> {
    if state.hot {
        vec![Action::HotUpdate {
            hash: state.current_hash.clone().unwrap_or_default(),
        }]
    } else if state.live_reload {
        vec![Action::Reload]
    } else {
        Vec::new()
    }
}

/// Applies a per-message `overlay` params override, if present and parseable.
fn effective_overlay(configured: &OverlayOptions, params: Option<&Params>) -> OverlayOptions {
    params
        .and_then(|p| p.get("overlay"))
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or(*configured)
}

// ============================================================================
// Tests
// ============================================================================
