//! Source normalization.
//!
//! Callers hand the conversion engine XML text, JSON text, or any serializable
//! in-memory value without saying which. [`Source`] classifies the input once
//! and [`Source::normalize`] turns it into a [`SourceTree`], the single
//! queryable representation every later stage reads.
//!
//! Classification, in order:
//! 1. text starting with `<` is XML
//! 2. text starting with `{` or `[` is JSON
//! 3. any other text is rejected as unsupported
//! 4. a non-text value is serialized structurally, field by field
//!
//! ```
//! use datamap::source::{Source, SourceKind};
//!
//! assert_eq!(Source::detect(&"<a>1</a>")?.kind(), SourceKind::Xml);
//! assert_eq!(Source::detect(&"[1, 2]")?.kind(), SourceKind::Json);
//! assert_eq!(Source::detect(&vec![1, 2])?.kind(), SourceKind::Object);
//! assert!(Source::detect(&"plain text").is_err());
//! # Ok::<(), datamap::source::SourceError>(())
//! ```

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{
    catalog::node_kind,
    constants::{JSON_LEADS, XML_LEAD},
    query::Query,
};

pub mod errors;
pub mod xml;

pub use errors::SourceError;
pub use xml::XmlOptions;

/// Longest input prefix quoted back in an unsupported-input error.
const PREVIEW_LEN: usize = 16;

/// Which form the raw input arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Xml,
    Json,
    Object,
}

/// Raw input, classified by form.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// XML document text
    Xml(String),
    /// JSON document text
    Json(String),
    /// A structurally serialized in-memory value
    Object(JsonValue),
}

impl Source {
    /// Classifies textual input by its leading character.
    pub fn from_text(text: impl Into<String>) -> Result<Self, SourceError> {
        let text = text.into();
        if text.starts_with(XML_LEAD) {
            Ok(Source::Xml(text))
        } else if text.starts_with(JSON_LEADS) {
            Ok(Source::Json(text))
        } else {
            Err(SourceError::UnsupportedInput {
                preview: text.chars().take(PREVIEW_LEN).collect(),
            })
        }
    }

    /// Classifies any serializable input.
    ///
    /// Values that serialize to a string (`&str`, `String`, ...) are treated as
    /// text and go through [`Source::from_text`]; everything else is kept as
    /// its structural serialization.
    pub fn detect<S: Serialize + ?Sized>(data: &S) -> Result<Self, SourceError> {
        let value = serde_json::to_value(data).map_err(|e| SourceError::SerializationFailed {
            reason: e.to_string(),
        })?;
        match value {
            JsonValue::String(text) => Source::from_text(text),
            other => Ok(Source::Object(other)),
        }
    }

    /// Returns the form this input was classified as
    pub fn kind(&self) -> SourceKind {
        match self {
            Source::Xml(_) => SourceKind::Xml,
            Source::Json(_) => SourceKind::Json,
            Source::Object(_) => SourceKind::Object,
        }
    }

    /// Converts the input into its canonical tree.
    pub fn normalize(&self, xml: &XmlOptions) -> Result<SourceTree, SourceError> {
        tracing::debug!(kind = ?self.kind(), "Normalizing source input");
        let root = match self {
            Source::Xml(text) => xml::project(text, xml)?,
            Source::Json(text) => {
                serde_json::from_str(text).map_err(|e| SourceError::InvalidJson {
                    reason: e.to_string(),
                })?
            }
            Source::Object(value) => value.clone(),
        };
        SourceTree::new(root)
    }

    /// Consumes the input and converts it into its canonical tree.
    pub fn into_tree(self, xml: &XmlOptions) -> Result<SourceTree, SourceError> {
        match self {
            Source::Object(value) => SourceTree::new(value),
            other => other.normalize(xml),
        }
    }
}

/// Canonical source tree: a read-only JSON value rooted at an object or array.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTree {
    root: JsonValue,
}

impl SourceTree {
    /// Wraps a JSON value, rejecting scalar roots.
    pub fn new(root: JsonValue) -> Result<Self, SourceError> {
        match root {
            JsonValue::Object(_) | JsonValue::Array(_) => Ok(Self { root }),
            other => Err(SourceError::UnsupportedRoot {
                found: node_kind(&other),
            }),
        }
    }

    /// Returns the root node
    pub fn root(&self) -> &JsonValue {
        &self.root
    }

    /// Returns true if the tree is rooted at an array
    pub fn is_array_root(&self) -> bool {
        self.root.is_array()
    }

    /// Resolves a query against this tree. See [`Query::resolve`].
    pub fn resolve(&self, query: &Query) -> Option<&JsonValue> {
        query.resolve(&self.root)
    }
}

/// Classifies and normalizes `data` in one step.
pub fn normalize<S: Serialize + ?Sized>(
    data: &S,
    xml: &XmlOptions,
) -> Result<SourceTree, SourceError> {
    Source::detect(data)?.into_tree(xml)
}
