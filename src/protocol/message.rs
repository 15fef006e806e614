//! Message envelope and typed message enumeration.
//!
//! The wire format is a tagged union over a JSON envelope: a `type` string,
//! an optional `data` payload whose shape depends on the type, and optional
//! free-form `params` metadata.
//!
//! [`Envelope`] is the raw serde shape; [`Message`] is the closed typed
//! enumeration receivers dispatch on. Classification never fails: an
//! unrecognized type becomes [`Message::Unknown`], which receivers treat as
//! a no-op.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::Result;

// ============================================================================
// Types
// ============================================================================

/// Free-form key/value metadata riding alongside a message.
///
/// Used e.g. to tell clients which overlay options are in effect for a
/// `warnings`/`errors` broadcast.
pub type Params = serde_json::Map<String, Value>;

// ============================================================================
// Envelope
// ============================================================================

/// The raw wire envelope.
///
/// # Format
///
/// ```json
/// {
///   "type": "hash",
///   "data": "abc123",
///   "params": { "overlay": { "errors": true } }
/// }
/// ```
///
/// Unknown extra fields in a received envelope are tolerated and ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Message type tag (case-sensitive).
    #[serde(rename = "type")]
    pub kind: String,

    /// Type-dependent payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Optional free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl Envelope {
    /// Creates an envelope with no payload.
    #[inline]
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: None,
            params: None,
        }
    }

    /// Attaches free-form metadata.
    #[inline]
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Parses the envelope into a typed message.
    ///
    /// Classification is total: unrecognized types and payload shapes that
    /// cannot be coerced fall back to [`Message::Unknown`].
    #[must_use]
    pub fn classify(&self) -> Message {
        match self.kind.as_str() {
            "hot" => Message::Hot,
            "invalid" => Message::Invalid,
            "hash" => Message::Hash(self.data_string()),
            "still-ok" => Message::StillOk,
            "ok" => Message::Ok,
            "close" => Message::Close,
            "content-changed" => Message::ContentChanged,
            "warnings" => Message::Warnings(self.data_string_list()),
            "errors" => Message::Errors(self.data_string_list()),

            "log-level" => match self
                .data
                .as_ref()
                .map(|data| serde_json::from_value::<LogLevel>(data.clone()))
            {
                Some(Ok(level)) => Message::LogLevel(level),
                _ => self.unknown(),
            },

            "progress-update" => match self
                .data
                .as_ref()
                .map(|data| serde_json::from_value::<ProgressUpdate>(data.clone()))
            {
                Some(Ok(progress)) => Message::ProgressUpdate(progress),
                _ => self.unknown(),
            },

            _ => self.unknown(),
        }
    }

    /// Gets the payload as a string, empty if absent or mistyped.
    #[inline]
    fn data_string(&self) -> String {
        self.data
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Gets the payload as a list of strings, skipping non-string entries.
    fn data_string_list(&self) -> Vec<String> {
        self.data
            .as_ref()
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Builds the `Unknown` fallback preserving the original frame.
    fn unknown(&self) -> Message {
        Message::Unknown {
            kind: self.kind.clone(),
            data: self.data.clone(),
        }
    }
}

// ============================================================================
// Message
// ============================================================================

/// Typed message enumeration over the wire protocol.
///
/// One variant per recognized `type` string, plus [`Message::Unknown`] so
/// that forward-compatible senders never break a receiver.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Hot-module-replacement is enabled for this session.
    Hot,

    /// A rebuild is in progress; stale overlays should be cleared.
    Invalid,

    /// The hash of the build that is about to complete.
    Hash(String),

    /// Build finished clean and nothing changed since the last broadcast.
    ///
    /// Explicit "nothing to do" signal, distinct from [`Message::Ok`].
    StillOk,

    /// Adjust the receiving client's log level.
    LogLevel(LogLevel),

    /// Build finished clean.
    Ok,

    /// Build finished with warnings only.
    Warnings(Vec<String>),

    /// Build failed with errors.
    Errors(Vec<String>),

    /// Incremental build progress tick.
    ProgressUpdate(ProgressUpdate),

    /// The server is shutting down this channel.
    Close,

    /// Served static content changed; a full reload is required.
    ContentChanged,

    /// Unrecognized message type; receivers treat this as a no-op.
    Unknown {
        /// The unrecognized type tag.
        kind: String,
        /// The original payload, if any.
        data: Option<Value>,
    },
}

impl Message {
    /// Returns the wire `type` string for this message.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Hot => "hot",
            Self::Invalid => "invalid",
            Self::Hash(_) => "hash",
            Self::StillOk => "still-ok",
            Self::LogLevel(_) => "log-level",
            Self::Ok => "ok",
            Self::Warnings(_) => "warnings",
            Self::Errors(_) => "errors",
            Self::ProgressUpdate(_) => "progress-update",
            Self::Close => "close",
            Self::ContentChanged => "content-changed",
            Self::Unknown { kind, .. } => kind,
        }
    }

    /// Builds the wire envelope for this message.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        let data = match self {
            Self::Hash(hash) => Some(json!(hash)),
            Self::LogLevel(level) => Some(json!(level)),
            Self::Warnings(list) | Self::Errors(list) => Some(json!(list)),
            Self::ProgressUpdate(progress) => Some(json!(progress)),
            Self::Unknown { data, .. } => data.clone(),
            _ => None,
        };

        Envelope {
            kind: self.kind().to_string(),
            data,
            params: None,
        }
    }

    /// Returns `true` for the terminal build statuses that end the
    /// client-side `initial` phase (`ok`, `warnings`, `errors`).
    #[inline]
    #[must_use]
    pub fn is_terminal_status(&self) -> bool {
        matches!(self, Self::Ok | Self::Warnings(_) | Self::Errors(_))
    }
}

// ============================================================================
// LogLevel
// ============================================================================

/// Client log verbosity, adjustable over the wire via `log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Suppress all client logging.
    None,
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational and above.
    #[default]
    Info,
    /// Ordinary log output and above.
    Log,
    /// Everything, including per-message traces.
    Verbose,
}

impl LogLevel {
    /// Returns `true` if output at `level` should be emitted under `self`.
    #[inline]
    #[must_use]
    pub fn allows(self, level: LogLevel) -> bool {
        level <= self && self != LogLevel::None
    }
}

// ============================================================================
// ProgressUpdate
// ============================================================================

/// Payload of a `progress-update` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Completion percentage, 0 to 100.
    pub percent: f64,

    /// Short description of the current build phase.
    pub message: String,
}

// ============================================================================
// Codec
// ============================================================================

/// Encodes a message as a single serialized JSON envelope.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
pub fn encode(message: &Message) -> Result<String> {
    Ok(serde_json::to_string(&message.envelope())?)
}

/// Decodes a serialized frame into its envelope.
///
/// The caller classifies the envelope and may inspect `params`. A malformed
/// frame is a recoverable error: receivers log and drop it, they never tear
/// down the session over it.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) if the frame is not a valid
/// envelope.
pub fn decode(text: &str) -> Result<Envelope> {
    Ok(serde_json::from_str(text)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_warnings_round_trip() {
        let message = Message::Warnings(vec!["w1".to_string(), "w2".to_string()]);
        let frame = encode(&message).expect("encode");

        let envelope = decode(&frame).expect("decode");
        assert_eq!(envelope.kind, "warnings");
        assert_eq!(envelope.classify(), message);
    }

    #[test]
    fn test_hash_round_trip() {
        let message = Message::Hash("abc123".to_string());
        let frame = encode(&message).expect("encode");

        assert_eq!(decode(&frame).expect("decode").classify(), message);
    }

    #[test]
    fn test_bare_types_carry_no_data() {
        for message in [Message::Invalid, Message::Ok, Message::StillOk] {
            let frame = encode(&message).expect("encode");
            assert!(!frame.contains("\"data\""), "unexpected data in {frame}");
            assert_eq!(decode(&frame).expect("decode").classify(), message);
        }
    }

    #[test]
    fn test_unknown_type_is_not_fatal() {
        let envelope = decode(r#"{"type":"totally-new","data":{"x":1}}"#).expect("decode");

        match envelope.classify() {
            Message::Unknown { kind, data } => {
                assert_eq!(kind, "totally-new");
                assert_eq!(data, Some(json!({"x": 1})));
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_envelope_fields_tolerated() {
        let envelope =
            decode(r#"{"type":"ok","future-field":true,"another":[1,2]}"#).expect("decode");
        assert_eq!(envelope.classify(), Message::Ok);
    }

    #[test]
    fn test_malformed_frame_is_error() {
        assert!(decode("not json at all").is_err());
        assert!(decode(r#"{"no-type-field": 1}"#).is_err());
    }

    #[test]
    fn test_log_level_classification() {
        let envelope = decode(r#"{"type":"log-level","data":"verbose"}"#).expect("decode");
        assert_eq!(envelope.classify(), Message::LogLevel(LogLevel::Verbose));

        // Unrecognized level falls back to Unknown rather than guessing.
        let envelope = decode(r#"{"type":"log-level","data":"shouty"}"#).expect("decode");
        assert!(matches!(envelope.classify(), Message::Unknown { .. }));
    }

    #[test]
    fn test_log_level_gating() {
        assert!(LogLevel::Info.allows(LogLevel::Error));
        assert!(LogLevel::Verbose.allows(LogLevel::Log));
        assert!(!LogLevel::Error.allows(LogLevel::Info));
        assert!(!LogLevel::None.allows(LogLevel::Error));
        assert!(!LogLevel::None.allows(LogLevel::None));
    }

    #[test]
    fn test_progress_update_classification() {
        let envelope =
            decode(r#"{"type":"progress-update","data":{"percent":42.5,"message":"emitting"}}"#)
                .expect("decode");

        match envelope.classify() {
            Message::ProgressUpdate(progress) => {
                assert_eq!(progress.percent, 42.5);
                assert_eq!(progress.message, "emitting");
            }
            other => panic!("expected ProgressUpdate, got {other:?}"),
        }
    }

    #[test]
    fn test_progress_update_bad_shape_is_unknown() {
        let envelope =
            decode(r#"{"type":"progress-update","data":"halfway"}"#).expect("decode");
        assert!(matches!(envelope.classify(), Message::Unknown { .. }));
    }

    #[test]
    fn test_hash_missing_data_is_empty() {
        let envelope = decode(r#"{"type":"hash"}"#).expect("decode");
        assert_eq!(envelope.classify(), Message::Hash(String::new()));
    }

    #[test]
    fn test_diagnostic_list_skips_non_strings() {
        let envelope =
            decode(r#"{"type":"errors","data":["boom", 7, null, "bang"]}"#).expect("decode");
        assert_eq!(
            envelope.classify(),
            Message::Errors(vec!["boom".to_string(), "bang".to_string()])
        );
    }

    #[test]
    fn test_params_survive_encoding() {
        let mut params = Params::new();
        params.insert("overlay".to_string(), json!({"errors": true}));

        let envelope = Message::Errors(vec!["e".to_string()])
            .envelope()
            .with_params(params);
        let frame = serde_json::to_string(&envelope).expect("serialize");

        let decoded = decode(&frame).expect("decode");
        let overlay = decoded.params.expect("params")["overlay"].clone();
        assert_eq!(overlay, json!({"errors": true}));
    }

    #[test]
    fn test_terminal_status_predicate() {
        assert!(Message::Ok.is_terminal_status());
        assert!(Message::Warnings(Vec::new()).is_terminal_status());
        assert!(Message::Errors(Vec::new()).is_terminal_status());
        assert!(!Message::StillOk.is_terminal_status());
        assert!(!Message::Invalid.is_terminal_status());
    }

    proptest! {
        #[test]
        fn prop_string_list_round_trip(entries in proptest::collection::vec(".*", 0..8)) {
            let message = Message::Warnings(entries);
            let frame = encode(&message).expect("encode");
            prop_assert_eq!(decode(&frame).expect("decode").classify(), message);
        }

        #[test]
        fn prop_hash_round_trip(hash in "[a-f0-9]{0,40}") {
            let message = Message::Hash(hash);
            let frame = encode(&message).expect("encode");
            prop_assert_eq!(decode(&frame).expect("decode").classify(), message);
        }
    }
}
