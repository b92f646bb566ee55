//! Error types for the value-type catalog.
//!
//! These errors cover unknown value-type tags and failures while coercing a
//! source node into the runtime type a tag declares.

use thiserror::Error;

use super::ValueType;

/// Structured error types for value-type lookup and coercion.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The textual tag does not name a supported value type
    #[error("Unsupported value type: {name}")]
    UnknownType { name: String },

    /// The source query resolved to nothing (missing member, out-of-range index or null)
    #[error("No source value to coerce into {expected}")]
    MissingValue { expected: ValueType },

    /// The source node exists but cannot be converted into the declared type
    #[error("Cannot coerce {found} into {expected}: {reason}")]
    CoercionFailed {
        expected: ValueType,
        found: &'static str,
        reason: String,
    },

    /// A collection element cannot be converted into the declared element type
    #[error("Cannot coerce element {index} into {expected}: {reason}")]
    ElementFailed {
        expected: ValueType,
        index: usize,
        reason: String,
    },

    /// A typed value was requested as a different runtime type
    #[error("Typed value mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: ValueType,
        actual: ValueType,
    },
}

impl CatalogError {
    /// Check if this error is an unknown value-type tag
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, CatalogError::UnknownType { .. })
    }

    /// Check if this error is a missing source value
    pub fn is_missing_value(&self) -> bool {
        matches!(self, CatalogError::MissingValue { .. })
    }

    /// Check if this error is a coercion failure
    pub fn is_coercion_error(&self) -> bool {
        matches!(
            self,
            CatalogError::CoercionFailed { .. }
                | CatalogError::ElementFailed { .. }
                | CatalogError::TypeMismatch { .. }
        )
    }

    /// Get the declared value type this error concerns, if any
    pub fn expected(&self) -> Option<ValueType> {
        match self {
            CatalogError::MissingValue { expected }
            | CatalogError::CoercionFailed { expected, .. }
            | CatalogError::ElementFailed { expected, .. }
            | CatalogError::TypeMismatch { expected, .. } => Some(*expected),
            CatalogError::UnknownType { .. } => None,
        }
    }
}

impl From<CatalogError> for crate::Error {
    fn from(err: CatalogError) -> Self {
        crate::Error::Catalog(err)
    }
}
