//!
//! Datamap: a declarative data-mapping engine.
//! This library populates typed destination records from XML text, JSON text or
//! in-memory values, driven by an external list of mapping rules instead of
//! hand-written glue code per field.
//!
//! ## Core Concepts
//!
//! * **Mapping rules (`rules::MappingRule`)**: One instruction each: a destination path
//!   (`Sub.SubName`), a value-type tag (`StringType`) and a source query (`Alias[0]`).
//! * **Rule sets (`rules::RuleSet`)**: The ordered rules for one mapping, loaded from a JSON
//!   specification file, from inline text, or built in code.
//! * **Records (`shape::Record`)**: Destination types. Declared with the [`record!`] macro,
//!   which generates the static shape used for validation and the named field access used
//!   for assignment.
//! * **Sources (`source::Source`)**: Input classified as XML text, JSON text or a serialized
//!   value, and normalized into one queryable tree (`source::SourceTree`).
//! * **Value types (`catalog::ValueType`)**: The closed set of bool, integer, date-time and
//!   string types, each bare, as an array or as a list, with lenient coercion from tree nodes.
//! * **Converters (`convert::Converter`)**: A rule set validated against one destination type.
//!   Validation happens once, at construction; conversions then only fail on bad input.
//!
//! ## Example
//!
//! ```
//! use datamap::{Converter, record};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Sub {
//!         pub sub_name: String,
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Person {
//!         pub name: String,
//!         pub sub: Option<Sub>,
//!     }
//! }
//!
//! let spec = r#"[
//!     {"DestinationProperty": "name", "SourceType": "StringType", "SourceQuery": "Name"},
//!     {"DestinationProperty": "sub.sub_name", "SourceType": "StringType", "SourceQuery": "Alias[0]"}
//! ]"#;
//! let converter = Converter::<Person>::new(spec, false)?;
//!
//! let person = converter.parse(r#"{"Name": "SourceTest", "Alias": ["A", "B"]}"#)?;
//! assert_eq!(person.name, "SourceTest");
//! assert_eq!(person.sub.unwrap().sub_name, "A");
//! # Ok::<(), datamap::Error>(())
//! ```

pub mod assign;
pub mod catalog;
pub mod constants;
pub mod convert;
pub mod query;
pub mod rules;
pub mod shape;
pub mod source;

pub use catalog::{TypedValue, ValueType};
pub use convert::{ConvertConfig, Converter, MissingPolicy, extract, extract_as};
pub use rules::{MappingRule, RuleSet};
pub use shape::Record;

/// Result type used throughout the Datamap library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Datamap library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured value-type errors from the catalog module
    #[error(transparent)]
    Catalog(catalog::CatalogError),

    /// Structured input errors from the source module
    #[error(transparent)]
    Source(source::SourceError),

    /// Structured query syntax errors from the query module
    #[error(transparent)]
    Query(query::QueryError),

    /// Structured path and assignment errors from the shape module
    #[error(transparent)]
    Shape(shape::ShapeError),

    /// Structured rule set errors from the rules module
    #[error(transparent)]
    Rules(rules::RuleError),

    /// A rule failed while being applied during a conversion
    #[error("Rule {index} ('{destination}') failed: {source}")]
    Apply {
        index: usize,
        destination: String,
        source: Box<Error>,
    },
}

impl Error {
    /// Get the originating module for this error.
    ///
    /// Errors raised while applying a rule report the module of the underlying failure.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Catalog(_) => "catalog",
            Error::Source(_) => "source",
            Error::Query(_) => "query",
            Error::Shape(_) => "shape",
            Error::Rules(_) => "rules",
            Error::Apply { source, .. } => source.module(),
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Get the index of the rule this error concerns, if any.
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            Error::Apply { index, .. } => Some(*index),
            Error::Rules(rules_err) => rules_err.rule_index(),
            _ => None,
        }
    }

    /// Check if this error is a configuration error: a bad rule set, destination
    /// type, value-type tag or query.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Error::Rules(_) | Error::Query(_) => true,
            Error::Catalog(catalog_err) => catalog_err.is_unknown_type(),
            Error::Shape(shape_err) => shape_err.is_unresolved_path(),
            Error::Apply { source, .. } => source.is_configuration_error(),
            _ => false,
        }
    }

    /// Check if this error indicates unusable input data.
    pub fn is_input_error(&self) -> bool {
        match self {
            Error::Source(_) => true,
            Error::Apply { source, .. } => source.is_input_error(),
            _ => false,
        }
    }

    /// Check if this error indicates a query found no value.
    pub fn is_missing_value(&self) -> bool {
        match self {
            Error::Catalog(catalog_err) => catalog_err.is_missing_value(),
            Error::Apply { source, .. } => source.is_missing_value(),
            _ => false,
        }
    }

    /// Check if this error indicates a value could not be coerced to its declared type.
    pub fn is_coercion_error(&self) -> bool {
        match self {
            Error::Catalog(catalog_err) => catalog_err.is_coercion_error(),
            Error::Apply { source, .. } => source.is_coercion_error(),
            _ => false,
        }
    }

    /// Check if this error indicates a coerced value did not fit its destination field.
    pub fn is_assignment_error(&self) -> bool {
        match self {
            Error::Shape(shape_err) => shape_err.is_assignment_error(),
            Error::Apply { source, .. } => source.is_assignment_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
