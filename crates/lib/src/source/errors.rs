//! Error types for source normalization.

use thiserror::Error;

/// Structured error types for turning raw input into a canonical source tree.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SourceError {
    /// Textual input that starts with neither `<`, `{` nor `[`
    #[error("Unsupported data: input starting with {preview:?} is neither XML nor JSON")]
    UnsupportedInput { preview: String },

    /// Text that looked like JSON failed to parse
    #[error("Invalid JSON input: {reason}")]
    InvalidJson { reason: String },

    /// Text that looked like XML failed to parse
    #[error("Invalid XML input: {reason}")]
    InvalidXml { reason: String },

    /// An in-memory value could not be serialized into the canonical tree
    #[error("Failed to serialize input object: {reason}")]
    SerializationFailed { reason: String },

    /// The canonical tree must be rooted at an object or an array
    #[error("Unsupported data: canonical tree root is {found}, expected an object or array")]
    UnsupportedRoot { found: &'static str },
}

impl SourceError {
    /// Check if the input format was not recognised at all
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            SourceError::UnsupportedInput { .. } | SourceError::UnsupportedRoot { .. }
        )
    }

    /// Check if recognised input failed to parse
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            SourceError::InvalidJson { .. } | SourceError::InvalidXml { .. }
        )
    }
}

impl From<SourceError> for crate::Error {
    fn from(err: SourceError) -> Self {
        crate::Error::Source(err)
    }
}
