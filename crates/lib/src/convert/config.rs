//! Conversion settings.

use serde::{Deserialize, Serialize};

use crate::source::XmlOptions;

/// What a conversion does when a rule's query finds no value.
///
/// A query that names nothing (missing member, out-of-range index) and a
/// query that lands on an explicit `null` are treated the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Abort the conversion with a missing-value error
    #[default]
    Fail,
    /// Leave the destination field as it is
    Skip,
    /// Write the zero value of the rule's declared type
    Zero,
}

/// Settings carried by a [`Converter`](super::Converter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Handling of queries that resolve to nothing
    pub missing: MissingPolicy,
    /// How XML input is projected into the source tree
    pub xml: XmlOptions,
}

impl ConvertConfig {
    /// Sets the missing-value policy
    pub fn with_missing(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    /// Sets the XML projection options
    pub fn with_xml(mut self, xml: XmlOptions) -> Self {
        self.xml = xml;
        self
    }
}
