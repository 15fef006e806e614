//! Per-client logger with a wire-adjustable level gate.
//!
//! Each client session owns its logger instance; the `log-level` protocol
//! message adjusts only that instance. There is no process-global log state
//! to mutate.

// ============================================================================
// Imports
// ============================================================================

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::protocol::LogLevel;

// ============================================================================
// ClientLogger
// ============================================================================

/// Level-gated logger scoped to one client session.
///
/// Output goes through `tracing` under the `hotline::client` target; the
/// gate decides per session what gets emitted at all.
pub struct ClientLogger {
    level: Mutex<LogLevel>,
}

impl ClientLogger {
    /// Creates a logger with the given initial verbosity.
    #[must_use]
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: Mutex::new(level),
        }
    }

    /// Returns the current verbosity.
    #[inline]
    #[must_use]
    pub fn level(&self) -> LogLevel {
        *self.level.lock()
    }

    /// Adjusts the verbosity, typically from a `log-level` message.
    pub fn set_level(&self, level: LogLevel) {
        *self.level.lock() = level;
    }

    /// Emits at error severity.
    pub fn error(&self, text: &str) {
        self.emit(LogLevel::Error, text);
    }

    /// Emits at warning severity.
    pub fn warn(&self, text: &str) {
        self.emit(LogLevel::Warn, text);
    }

    /// Emits at informational severity.
    pub fn info(&self, text: &str) {
        self.emit(LogLevel::Info, text);
    }

    /// Emits at ordinary log severity.
    pub fn log(&self, text: &str) {
        self.emit(LogLevel::Log, text);
    }

    /// Emits at verbose severity.
    pub fn verbose(&self, text: &str) {
        self.emit(LogLevel::Verbose, text);
    }

    fn emit(&self, at: LogLevel, text: &str) {
        if !self.level.lock().allows(at) {
            return;
        }
        match at {
            LogLevel::Error => error!(target: "hotline::client", "{text}"),
            LogLevel::Warn => warn!(target: "hotline::client", "{text}"),
            LogLevel::Info | LogLevel::Log => info!(target: "hotline::client", "{text}"),
            LogLevel::Verbose => debug!(target: "hotline::client", "{text}"),
            LogLevel::None => {}
        }
    }
}

impl Default for ClientLogger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_round_trip() {
        let logger = ClientLogger::new(LogLevel::Warn);
        assert_eq!(logger.level(), LogLevel::Warn);

        logger.set_level(LogLevel::Verbose);
        assert_eq!(logger.level(), LogLevel::Verbose);
    }

    #[test]
    fn test_emit_does_not_panic_at_any_level() {
        let logger = ClientLogger::new(LogLevel::Verbose);
        logger.error("e");
        logger.warn("w");
        logger.info("i");
        logger.log("l");
        logger.verbose("v");

        logger.set_level(LogLevel::None);
        logger.error("suppressed");
    }
}
