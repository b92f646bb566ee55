//! Mapping rules and rule sets.
//!
//! A [`MappingRule`] says where one value comes from (a source [`Query`]),
//! what type it must take ([`ValueType`]) and where it goes (a dotted
//! destination path). A [`RuleSet`] is the ordered list of rules for one
//! mapping, loaded from a JSON specification or built in code.
//!
//! The specification format is a JSON array of rule objects:
//!
//! ```json
//! [
//!   { "DestinationProperty": "Name", "SourceType": "StringType", "SourceQuery": "Name" },
//!   { "DestinationProperty": "Sub.SubName", "SourceType": "StringType", "SourceQuery": "Alias[0]" }
//! ]
//! ```
//!
//! `destination`, `value_type` and `query` are accepted as alternative keys.
//!
//! Building a rule set checks everything that does not depend on a
//! destination type (JSON shape, value-type tags, query syntax). Destination
//! paths are checked by [`RuleSet::bind`], once per destination type, before
//! any conversion runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    catalog::ValueType,
    query::Query,
    shape::{FieldPath, Record, Shape},
};

pub mod errors;

pub use errors::RuleError;

/// One declarative mapping instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingRule {
    #[serde(rename = "DestinationProperty", alias = "destination")]
    destination: String,
    #[serde(rename = "SourceType", alias = "value_type")]
    value_type: ValueType,
    #[serde(rename = "SourceQuery", alias = "query")]
    query: String,
}

impl MappingRule {
    /// Creates a rule writing the value found at `query` to `destination`.
    pub fn new(
        destination: impl Into<String>,
        value_type: ValueType,
        query: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            value_type,
            query: query.into(),
        }
    }

    /// Returns the dotted destination path
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Returns the declared value type
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns the source query text
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Rule as it appears in specification text, before the tag is checked.
#[derive(Deserialize)]
struct WireRule {
    #[serde(rename = "DestinationProperty", alias = "destination")]
    destination: String,
    #[serde(rename = "SourceType", alias = "value_type")]
    value_type: String,
    #[serde(rename = "SourceQuery", alias = "query")]
    query: String,
}

/// A rule with its query parsed.
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: MappingRule,
    query: Query,
}

/// An ordered, immutable list of mapping rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Builds a rule set from rules constructed in code.
    pub fn from_rules(rules: impl IntoIterator<Item = MappingRule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| {
                let query = Query::parse(&rule.query)
                    .map_err(|source| RuleError::InvalidQuery { index, source })?;
                Ok(CompiledRule { rule, query })
            })
            .collect::<std::result::Result<Vec<_>, RuleError>>()?;

        tracing::debug!(rules = rules.len(), "Loaded mapping rule set");
        Ok(Self { rules })
    }

    /// Parses a rule set from specification text.
    pub fn from_json(text: &str) -> Result<Self> {
        let wire: Vec<WireRule> =
            serde_json::from_str(text).map_err(|e| RuleError::InvalidSpec {
                reason: e.to_string(),
            })?;

        let rules = wire
            .into_iter()
            .enumerate()
            .map(|(index, wire)| {
                let value_type = wire
                    .value_type
                    .parse::<ValueType>()
                    .map_err(|source| RuleError::UnknownValueType { index, source })?;
                Ok(MappingRule {
                    destination: wire.destination,
                    value_type,
                    query: wire.query,
                })
            })
            .collect::<std::result::Result<Vec<_>, RuleError>>()?;

        Self::from_rules(rules)
    }

    /// Reads and parses a rule set from a UTF-8 specification file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Reading mapping specification");
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Loads a rule set from a file path (`is_file`) or from inline text.
    pub fn load(map: &str, is_file: bool) -> Result<Self> {
        if is_file {
            Self::from_file(map)
        } else {
            Self::from_json(map)
        }
    }

    /// Serializes the rules back into specification text.
    pub fn to_json(&self) -> Result<String> {
        let rules: Vec<&MappingRule> = self.iter().collect();
        Ok(serde_json::to_string_pretty(&rules)?)
    }

    /// Returns the rules in application order
    pub fn iter(&self) -> impl Iterator<Item = &MappingRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Returns the number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks every rule against the shape of `T` and returns the bound rules.
    ///
    /// Fails if `T` is a bare collection, whatever the rules say, and otherwise
    /// fails on the first rule whose destination path does not resolve
    /// segment by segment against `T`'s declared fields.
    pub fn bind<T: Record>(&self) -> std::result::Result<Vec<BoundRule>, RuleError> {
        let shape = T::shape();
        if shape.is_collection() {
            return Err(RuleError::CollectionTarget {
                type_name: std::any::type_name::<T>(),
            });
        }
        let bound = self.bind_shape(shape)?;
        tracing::debug!(
            destination_type = shape.name(),
            rules = bound.len(),
            "Validated mapping rules"
        );
        Ok(bound)
    }

    fn bind_shape(&self, shape: &'static Shape) -> std::result::Result<Vec<BoundRule>, RuleError> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, compiled)| {
                let destination = compiled.rule.destination();
                let unresolved = |source| RuleError::UnresolvedDestination {
                    index,
                    destination: destination.to_string(),
                    target: shape.name(),
                    source,
                };
                let path = FieldPath::parse(destination).map_err(unresolved)?;
                shape.resolve(&path).map_err(unresolved)?;
                Ok(BoundRule {
                    index,
                    path,
                    value_type: compiled.rule.value_type(),
                    query: compiled.query.clone(),
                })
            })
            .collect()
    }
}

/// A rule validated against a destination type, ready to apply.
#[derive(Debug, Clone)]
pub struct BoundRule {
    index: usize,
    path: FieldPath,
    value_type: ValueType,
    query: Query,
}

impl BoundRule {
    /// Returns the rule's position in its rule set
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the validated destination path
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the declared value type
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns the parsed source query
    pub fn query(&self) -> &Query {
        &self.query
    }
}
