//! Error types for the live-update protocol.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use hotline::{Result, Error};
//!
//! fn deliver(sink: &dyn ClientSink, frame: &str) -> Result<()> {
//!     sink.send(frame)?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionClosed`], [`Error::RetriesExhausted`] |
//! | Protocol | [`Error::Protocol`], [`Error::Send`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::WebSocket`], [`Error::ChannelClosed`] |
//!
//! Most failures in this subsystem are absorbed where they occur (a malformed
//! frame is dropped, a dead client is skipped during broadcast); the variants
//! here cover the paths that still need to report to a caller.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::server::ClientId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when client or server configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// Transport connection failed.
    ///
    /// Returned when a connection cannot be established or upgraded.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Transport connection closed.
    ///
    /// Returned when an operation is attempted on a closed transport.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Reconnect budget exhausted.
    ///
    /// Returned by the client run loop after the bounded retry count is
    /// spent while the connection stayed down.
    #[error("Ending reconnect after {attempts} attempts")]
    RetriesExhausted {
        /// Number of reconnect attempts made before giving up.
        attempts: u32,
    },

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Malformed or unexpected wire message.
    ///
    /// Receivers treat this as recoverable: log and drop the frame.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    /// Delivery to an individual client failed.
    ///
    /// Broadcast catches this per client; it never aborts the fanout.
    #[error("Send to client {client} failed: {message}")]
    Send {
        /// Target client.
        client: ClientId,
        /// Description of the send failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// Channel receive error.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a retries-exhausted error.
    #[inline]
    pub fn retries_exhausted(attempts: u32) -> Self {
        Self::RetriesExhausted { attempts }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a per-client send error.
    #[inline]
    pub fn send(client: ClientId, message: impl Into<String>) -> Self {
        Self::Send {
            client,
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::ConnectionClosed
                | Self::RetriesExhausted { .. }
                | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors are absorbed locally: malformed frames are
    /// dropped, failed sends skip one client, failed connect attempts retry
    /// within the reconnect budget.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Protocol { .. } | Self::Send { .. } | Self::Connection { .. } | Self::Json(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::connection("refused");
        assert_eq!(err.to_string(), "Connection failed: refused");
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("reconnect count must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: reconnect count must be positive"
        );
    }

    #[test]
    fn test_retries_exhausted_display() {
        let err = Error::retries_exhausted(10);
        assert_eq!(err.to_string(), "Ending reconnect after 10 attempts");
    }

    #[test]
    fn test_is_connection_error() {
        let conn_err = Error::connection("refused");
        let closed_err = Error::ConnectionClosed;
        let exhausted_err = Error::retries_exhausted(3);
        let other_err = Error::config("bad");

        assert!(conn_err.is_connection_error());
        assert!(closed_err.is_connection_error());
        assert!(exhausted_err.is_connection_error());
        assert!(!other_err.is_connection_error());
    }

    #[test]
    fn test_is_recoverable() {
        let proto_err = Error::protocol("bad frame");
        let send_err = Error::send(ClientId::new(), "sink gone");
        let exhausted_err = Error::retries_exhausted(10);

        assert!(proto_err.is_recoverable());
        assert!(send_err.is_recoverable());
        assert!(!exhausted_err.is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::ConnectionRefused, "refused");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
