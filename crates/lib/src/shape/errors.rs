//! Error types for destination shapes, paths and field assignment.

use thiserror::Error;

use crate::catalog::ValueType;

/// Structured error types for walking and writing destination records.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShapeError {
    /// A destination path is syntactically unusable
    #[error("Invalid destination path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// A path segment names no declared field
    #[error("Field '{field}' doesn't exist on {owner}")]
    UnknownField { owner: &'static str, field: String },

    /// An intermediate path segment names a field that is not a nested record
    #[error("Field '{field}' on {owner} is not a nested record")]
    NotARecord { owner: &'static str, field: String },

    /// A record-typed field was the target of a value assignment
    #[error("Cannot assign {found} to record field of type {expected}")]
    NotAValue {
        expected: &'static str,
        found: ValueType,
    },

    /// The value's runtime type does not match the field's declared type
    #[error("Cannot assign {found} to field of type {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: ValueType,
    },

    /// An integer does not fit the field's narrower integer type
    #[error("Value {value} is out of range for field of type {expected}")]
    OutOfRange { expected: &'static str, value: i64 },
}

impl ShapeError {
    /// Check if this error means a path does not resolve against a shape
    pub fn is_unresolved_path(&self) -> bool {
        matches!(
            self,
            ShapeError::InvalidPath { .. }
                | ShapeError::UnknownField { .. }
                | ShapeError::NotARecord { .. }
        )
    }

    /// Check if this error is a value/field type incompatibility
    pub fn is_assignment_error(&self) -> bool {
        matches!(
            self,
            ShapeError::NotAValue { .. }
                | ShapeError::TypeMismatch { .. }
                | ShapeError::OutOfRange { .. }
        )
    }

    /// Get the offending field name for path errors
    pub fn field(&self) -> Option<&str> {
        match self {
            ShapeError::UnknownField { field, .. } | ShapeError::NotARecord { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}

impl From<ShapeError> for crate::Error {
    fn from(err: ShapeError) -> Self {
        crate::Error::Shape(err)
    }
}
