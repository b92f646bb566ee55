//! The conversion engine.
//!
//! A [`Converter<T>`] owns a [`RuleSet`] that has been validated against the
//! destination type `T`. Each call to [`Converter::parse`] normalizes the input
//! once, then applies the rules in order: resolve the query, coerce the node,
//! assign the value. The first failing rule aborts the call.
//!
//! ```
//! use datamap::{Converter, MappingRule, ValueType, record};
//! use serde_json::json;
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Person {
//!         pub name: String,
//!         pub numbers: Vec<i64>,
//!     }
//! }
//!
//! let converter = Converter::<Person>::from_rules([
//!     MappingRule::new("name", ValueType::StringType, "Name"),
//!     MappingRule::new("numbers", ValueType::IntTypeList, "Lucky.LuckyNumbers"),
//! ])?;
//!
//! let from_json = converter.parse(r#"{"Name": "Ada", "Lucky": {"LuckyNumbers": [7, 11]}}"#)?;
//! let from_value = converter.parse(&json!({"Name": "Ada", "Lucky": {"LuckyNumbers": [7, 11]}}))?;
//! assert_eq!(from_json.name, "Ada");
//! assert_eq!(from_value.numbers, vec![7, 11]);
//!
//! // XML documents are rooted at their element name
//! let from_xml = Converter::<Person>::from_rules([
//!     MappingRule::new("name", ValueType::StringType, "Person.Name"),
//!     MappingRule::new("numbers", ValueType::IntTypeList, "Person.Lucky.LuckyNumbers"),
//! ])?
//! .parse(
//!     "<Person><Name>Ada</Name><Lucky><LuckyNumbers>7</LuckyNumbers><LuckyNumbers>11</LuckyNumbers></Lucky></Person>",
//! )?;
//! assert_eq!(from_xml.numbers, vec![7, 11]);
//! # Ok::<(), datamap::Error>(())
//! ```

use std::{fmt, marker::PhantomData, path::Path};

use serde::Serialize;

use crate::{
    Error, Result,
    assign::assign,
    catalog::{CatalogError, TypedValue, ValueType, coerce},
    query::Query,
    rules::{BoundRule, MappingRule, RuleSet},
    shape::Record,
    source::{self, Source, SourceTree, XmlOptions},
};

pub mod config;

pub use config::{ConvertConfig, MissingPolicy};

/// Converts source data into instances of `T` using a validated rule set.
///
/// A converter is immutable once built and can be shared across threads;
/// every call allocates its own source tree and destination instance.
pub struct Converter<T> {
    rules: RuleSet,
    bound: Vec<BoundRule>,
    config: ConvertConfig,
    _target: PhantomData<fn() -> T>,
}

impl<T: Record> Converter<T> {
    /// Loads a rule set from a file (`map_is_file`) or from inline text, and
    /// validates it against `T`.
    pub fn new(map: &str, map_is_file: bool) -> Result<Self> {
        Self::from_rule_set(RuleSet::load(map, map_is_file)?)
    }

    /// Loads and validates a rule set from a specification file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_rule_set(RuleSet::from_file(path)?)
    }

    /// Parses and validates a rule set from specification text.
    pub fn from_spec(text: &str) -> Result<Self> {
        Self::from_rule_set(RuleSet::from_json(text)?)
    }

    /// Validates rules built in code.
    pub fn from_rules(rules: impl IntoIterator<Item = MappingRule>) -> Result<Self> {
        Self::from_rule_set(RuleSet::from_rules(rules)?)
    }

    /// Validates an already loaded rule set against `T`.
    ///
    /// Fails if `T` is a bare collection or if any destination path does not
    /// resolve against `T`'s declared fields.
    pub fn from_rule_set(rules: RuleSet) -> Result<Self> {
        let bound = rules.bind::<T>()?;
        Ok(Self {
            rules,
            bound,
            config: ConvertConfig::default(),
            _target: PhantomData,
        })
    }

    /// Replaces the conversion settings
    pub fn with_config(mut self, config: ConvertConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the conversion settings
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Returns the rule set this converter applies
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Converts XML text, JSON text or any serializable value into a new `T`.
    pub fn parse<S: Serialize + ?Sized>(&self, data: &S) -> Result<T> {
        let tree = source::normalize(data, &self.config.xml)?;
        self.parse_tree(&tree)
    }

    /// Converts an already classified input into a new `T`.
    pub fn parse_source(&self, source: Source) -> Result<T> {
        let tree = source.into_tree(&self.config.xml)?;
        self.parse_tree(&tree)
    }

    /// Applies every rule to a normalized source tree.
    pub fn parse_tree(&self, tree: &SourceTree) -> Result<T> {
        let mut target = T::default();
        for rule in &self.bound {
            self.apply(&mut target, tree, rule)
                .map_err(|source| Error::Apply {
                    index: rule.index(),
                    destination: rule.path().to_string(),
                    source: Box::new(source),
                })?;
        }
        Ok(target)
    }

    fn apply(&self, target: &mut T, tree: &SourceTree, rule: &BoundRule) -> Result<()> {
        tracing::trace!(
            index = rule.index(),
            destination = %rule.path(),
            query = %rule.query(),
            value_type = %rule.value_type(),
            "Applying mapping rule"
        );

        let value = match coerce(tree.resolve(rule.query()), rule.value_type()) {
            Ok(value) => value,
            Err(err) if err.is_missing_value() => match self.config.missing {
                MissingPolicy::Fail => return Err(err.into()),
                MissingPolicy::Skip => {
                    tracing::warn!(
                        destination = %rule.path(),
                        query = %rule.query(),
                        "Source value missing, leaving field untouched"
                    );
                    return Ok(());
                }
                MissingPolicy::Zero => {
                    tracing::warn!(
                        destination = %rule.path(),
                        query = %rule.query(),
                        "Source value missing, writing zero value"
                    );
                    rule.value_type().zero_value()
                }
            },
            Err(err) => return Err(err.into()),
        };

        assign(target, rule.path(), value)?;
        Ok(())
    }
}

impl<T> fmt::Debug for Converter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("target", &std::any::type_name::<T>())
            .field("rules", &self.rules.len())
            .field("config", &self.config)
            .finish()
    }
}

/// Extracts one value from source data without a rule set or destination type.
///
/// `data` accepts the same forms as [`Converter::parse`]. A query that finds
/// nothing is a missing-value error.
///
/// ```
/// use datamap::{TypedValue, ValueType, extract};
///
/// let data = r#"[{"Lucky": {"LuckyNumbers": [7, 11]}}]"#;
/// let value = extract(data, "[0].Lucky.LuckyNumbers[0]", ValueType::IntType)?;
/// assert_eq!(value, TypedValue::Int(7));
/// # Ok::<(), datamap::Error>(())
/// ```
pub fn extract<S: Serialize + ?Sized>(
    data: &S,
    query: &str,
    value_type: ValueType,
) -> Result<TypedValue> {
    extract_with(data, query, value_type, &XmlOptions::default())
}

/// Like [`extract`], with explicit XML projection options.
pub fn extract_with<S: Serialize + ?Sized>(
    data: &S,
    query: &str,
    value_type: ValueType,
    xml: &XmlOptions,
) -> Result<TypedValue> {
    let query = Query::parse(query)?;
    let tree = source::normalize(data, xml)?;
    Ok(coerce(tree.resolve(&query), value_type)?)
}

/// Like [`extract`], returning the runtime value directly.
///
/// ```
/// use datamap::{ValueType, extract_as};
///
/// let alias: String = extract_as(r#"{"Alias": ["A", "B"]}"#, "Alias[1]", ValueType::StringType)?;
/// assert_eq!(alias, "B");
/// # Ok::<(), datamap::Error>(())
/// ```
pub fn extract_as<V, S>(data: &S, query: &str, value_type: ValueType) -> Result<V>
where
    V: TryFrom<TypedValue, Error = CatalogError>,
    S: Serialize + ?Sized,
{
    Ok(extract(data, query, value_type)?.into_inner()?)
}
