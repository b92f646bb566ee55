//! Error types for loading and validating mapping rule sets.
//!
//! Every variant here is a configuration error: it is raised while a rule set
//! is built or checked against a destination type, never while converting.

use thiserror::Error;

use crate::{catalog::CatalogError, query::QueryError, shape::ShapeError};

/// Structured error types for mapping rule sets.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule set text is not a well-formed list of rules
    #[error("Invalid mapping specification: {reason}")]
    InvalidSpec { reason: String },

    /// A rule names a value type the catalog does not know
    #[error("Rule {index} declares an unsupported value type")]
    UnknownValueType {
        index: usize,
        #[source]
        source: CatalogError,
    },

    /// A rule's source query is malformed
    #[error("Rule {index} has an invalid source query")]
    InvalidQuery {
        index: usize,
        #[source]
        source: QueryError,
    },

    /// A rule's destination path does not resolve against the destination shape
    #[error("Rule {index}: destination '{destination}' does not resolve on {target}")]
    UnresolvedDestination {
        index: usize,
        destination: String,
        target: &'static str,
        #[source]
        source: ShapeError,
    },

    /// The destination type is a bare collection rather than a record
    #[error("Destination type {type_name} is a collection; conversion targets must be records")]
    CollectionTarget { type_name: &'static str },
}

impl RuleError {
    /// Check if this error rejects the destination type itself
    pub fn is_collection_target(&self) -> bool {
        matches!(self, RuleError::CollectionTarget { .. })
    }

    /// Check if this error is a destination path that failed to resolve
    pub fn is_unresolved_destination(&self) -> bool {
        matches!(self, RuleError::UnresolvedDestination { .. })
    }

    /// Get the index of the offending rule, if the error concerns one rule
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            RuleError::UnknownValueType { index, .. }
            | RuleError::InvalidQuery { index, .. }
            | RuleError::UnresolvedDestination { index, .. } => Some(*index),
            RuleError::InvalidSpec { .. } | RuleError::CollectionTarget { .. } => None,
        }
    }
}

impl From<RuleError> for crate::Error {
    fn from(err: RuleError) -> Self {
        crate::Error::Rules(err)
    }
}
