//! Error types for source query parsing.

use thiserror::Error;

/// A source query that could not be parsed.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The query text is malformed at the given byte offset
    #[error("Invalid query '{query}' at offset {offset}: {reason}")]
    Syntax {
        query: String,
        offset: usize,
        reason: String,
    },
}

impl QueryError {
    /// Get the query text that failed to parse
    pub fn query(&self) -> &str {
        match self {
            QueryError::Syntax { query, .. } => query,
        }
    }

    /// Get the byte offset at which parsing failed
    pub fn offset(&self) -> usize {
        match self {
            QueryError::Syntax { offset, .. } => *offset,
        }
    }
}

impl From<QueryError> for crate::Error {
    fn from(err: QueryError) -> Self {
        crate::Error::Query(err)
    }
}
