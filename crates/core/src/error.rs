//! Error types for tristate
//!
//! Every fallible operation in the crate returns [`Result`]. Structured
//! decoding reports through the host deserializer's own error type instead,
//! so those failures never appear here.

use thiserror::Error;

/// Result type alias for tristate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for parsing, conversion and encoding
#[derive(Debug, Error)]
pub enum Error {
    /// Text rejected by the type's grammar
    #[error("invalid {kind} value {input:?}: {reason}")]
    Parse {
        /// Type name of the target wrapper
        kind: &'static str,
        /// The offending input
        input: String,
        /// What the underlying parser reported
        reason: String,
    },

    /// Temporal text that matched none of the accepted layouts
    #[error("invalid {kind} format: {input:?} (expected {layout})")]
    Layout {
        /// Type name of the target wrapper
        kind: &'static str,
        /// The offending input
        input: String,
        /// Canonical layout of the target type
        layout: &'static str,
    },

    /// Type name not present in the dispatch table
    #[error("invalid type: {0}")]
    UnknownType(String),

    /// Driver value of a kind the target cannot be converted from
    #[error("incompatible type for {kind}: {found}")]
    Incompatible {
        /// Type name of the target wrapper
        kind: &'static str,
        /// Kind of driver value that was supplied
        found: &'static str,
    },

    /// Driver integer that does not fit the target width
    #[error("{kind} value out of range: {value}")]
    OutOfRange {
        /// Type name of the target wrapper
        kind: &'static str,
        /// The rejected value, rendered as text
        value: String,
    },

    /// Payload (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Markup that could not be tokenised
    #[error("markup error: {0}")]
    Markup(String),
}

impl Error {
    pub(crate) fn parse(kind: &'static str, input: &str, reason: impl ToString) -> Self {
        Error::Parse {
            kind,
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn layout(kind: &'static str, input: &str, layout: &'static str) -> Self {
        Error::Layout {
            kind,
            input: input.to_string(),
            layout,
        }
    }

    /// Check if this error came from text parsing
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::Layout { .. })
    }
}
