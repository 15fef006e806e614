//! Shared hook dispatch for transport implementations.
//!
//! Centralizes the contract every transport variant must honor: open and
//! close fire at most once, messages are delivered in arrival order, and
//! events raised before a hook is installed are buffered and replayed on
//! installation.

// ============================================================================
// Imports
// ============================================================================

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{CloseHook, MessageHook, OpenHook};

// ============================================================================
// HookSet
// ============================================================================

/// Hook registry shared between a transport handle and its event loop.
///
/// Hooks are stored as `Arc` so they can be invoked outside the lock; a
/// hook calling back into the transport (e.g. `send` from `on_open`) must
/// not deadlock.
#[derive(Default)]
pub(crate) struct HookSet {
    inner: Mutex<HookState>,
}

#[derive(Default)]
struct HookState {
    open_hook: Option<Arc<dyn Fn() + Send + Sync>>,
    close_hook: Option<Arc<dyn Fn() + Send + Sync>>,
    message_hook: Option<Arc<dyn Fn(&str) + Send + Sync>>,

    /// Frames received before a message hook was installed, oldest first.
    pending: VecDeque<String>,

    /// A drain is in progress; concurrent deliveries append to `pending`
    /// instead of re-entering, preserving arrival order.
    draining: bool,

    opened: bool,
    open_delivered: bool,
    closed: bool,
    close_delivered: bool,
}

impl HookSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once the close event has fired.
    pub(crate) fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    pub(crate) fn set_open(&self, hook: OpenHook) {
        let fire = {
            let mut state = self.inner.lock();
            let hook: Arc<dyn Fn() + Send + Sync> = Arc::from(hook);
            state.open_hook = Some(Arc::clone(&hook));
            if state.opened && !state.open_delivered {
                state.open_delivered = true;
                Some(hook)
            } else {
                None
            }
        };
        if let Some(hook) = fire {
            hook();
        }
    }

    pub(crate) fn set_close(&self, hook: CloseHook) {
        let fire = {
            let mut state = self.inner.lock();
            let hook: Arc<dyn Fn() + Send + Sync> = Arc::from(hook);
            state.close_hook = Some(Arc::clone(&hook));
            if state.closed && !state.close_delivered {
                state.close_delivered = true;
                Some(hook)
            } else {
                None
            }
        };
        if let Some(hook) = fire {
            hook();
        }
    }

    pub(crate) fn set_message(&self, hook: MessageHook) {
        {
            let mut state = self.inner.lock();
            state.message_hook = Some(Arc::from(hook));
        }
        self.drain();
    }

    // ------------------------------------------------------------------
    // Event delivery
    // ------------------------------------------------------------------

    /// Fires the open event. Idempotent.
    pub(crate) fn fire_open(&self) {
        let fire = {
            let mut state = self.inner.lock();
            if state.opened {
                None
            } else {
                state.opened = true;
                let hook = state.open_hook.clone();
                if hook.is_some() {
                    state.open_delivered = true;
                }
                hook
            }
        };
        if let Some(hook) = fire {
            hook();
        }
    }

    /// Fires the close event. Idempotent.
    pub(crate) fn fire_close(&self) {
        let fire = {
            let mut state = self.inner.lock();
            if state.closed {
                None
            } else {
                state.closed = true;
                let hook = state.close_hook.clone();
                if hook.is_some() {
                    state.close_delivered = true;
                }
                hook
            }
        };
        if let Some(hook) = fire {
            hook();
        }
    }

    /// Queues one received frame and drains the queue to the message hook.
    pub(crate) fn fire_message(&self, text: &str) {
        {
            let mut state = self.inner.lock();
            if state.closed {
                return;
            }
            state.pending.push_back(text.to_string());
        }
        self.drain();
    }

    /// Delivers queued frames in order to the installed hook.
    ///
    /// Frames queued while a drain runs are picked up by the same drain, so
    /// delivery order always matches arrival order.
    fn drain(&self) {
        let mut state = self.inner.lock();
        if state.draining {
            return;
        }
        state.draining = true;

        loop {
            let Some(hook) = state.message_hook.as_ref().map(Arc::clone) else {
                break;
            };
            let Some(next) = state.pending.pop_front() else {
                break;
            };
            drop(state);
            hook(&next);
            state = self.inner.lock();
        }

        state.draining = false;
    }
}

// ============================================================================
// Tests
// ============================================================================
