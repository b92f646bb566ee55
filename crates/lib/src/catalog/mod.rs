//! Value-type catalog.
//!
//! Every mapping rule names the type its value must take through a symbolic
//! [`ValueType`] tag (`IntTypeList`, `StringType`, ...). This module is the
//! closed table behind those tags: it maps each tag to a runtime type and
//! coerces a node of the canonical source tree into a [`TypedValue`] of that
//! type.
//!
//! # Coercion policy
//!
//! Coercion is deliberately lenient about scalar representation, because XML
//! input projects every leaf as text:
//!
//! - strings parse into integers, booleans and date-times
//! - integers convert to booleans (non-zero is `true`), whole floats to integers
//! - numbers and booleans render into strings
//! - a scalar where a collection is declared becomes a one-element collection
//!
//! Structural mismatches (an object where a scalar is declared, an array where a
//! scalar is declared) are always errors.
//!
//! ```
//! use datamap::catalog::{TypedValue, ValueType, coerce};
//! use serde_json::json;
//!
//! let node = json!(["7", 11]);
//! let value = coerce(Some(&node), ValueType::IntTypeList)?;
//! assert_eq!(value, TypedValue::IntList(vec![7, 11]));
//! # Ok::<(), datamap::catalog::CatalogError>(())
//! ```

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

mod coerce;
pub mod errors;

pub use coerce::{Scalar, node_kind, parse_datetime};
pub use errors::CatalogError;

/// Symbolic value-type tag used by mapping rules.
///
/// Serialized by its variant name, which is also the name accepted by
/// [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    BoolType,
    BoolTypeArray,
    BoolTypeList,
    DateTimeType,
    DateTimeTypeArray,
    DateTimeTypeList,
    IntType,
    IntTypeArray,
    IntTypeList,
    StringType,
    StringTypeArray,
    StringTypeList,
}

impl ValueType {
    /// All supported tags, in declaration order.
    pub const ALL: [ValueType; 12] = [
        ValueType::BoolType,
        ValueType::BoolTypeArray,
        ValueType::BoolTypeList,
        ValueType::DateTimeType,
        ValueType::DateTimeTypeArray,
        ValueType::DateTimeTypeList,
        ValueType::IntType,
        ValueType::IntTypeArray,
        ValueType::IntTypeList,
        ValueType::StringType,
        ValueType::StringTypeArray,
        ValueType::StringTypeList,
    ];

    /// Returns the textual tag name, as used in mapping specifications
    pub fn name(self) -> &'static str {
        match self {
            ValueType::BoolType => "BoolType",
            ValueType::BoolTypeArray => "BoolTypeArray",
            ValueType::BoolTypeList => "BoolTypeList",
            ValueType::DateTimeType => "DateTimeType",
            ValueType::DateTimeTypeArray => "DateTimeTypeArray",
            ValueType::DateTimeTypeList => "DateTimeTypeList",
            ValueType::IntType => "IntType",
            ValueType::IntTypeArray => "IntTypeArray",
            ValueType::IntTypeList => "IntTypeList",
            ValueType::StringType => "StringType",
            ValueType::StringTypeArray => "StringTypeArray",
            ValueType::StringTypeList => "StringTypeList",
        }
    }

    /// Returns the name of the runtime type values of this tag are held in
    pub fn runtime_type(self) -> &'static str {
        match self {
            ValueType::BoolType => "bool",
            ValueType::BoolTypeArray => "Box<[bool]>",
            ValueType::BoolTypeList => "Vec<bool>",
            ValueType::DateTimeType => "DateTime<Utc>",
            ValueType::DateTimeTypeArray => "Box<[DateTime<Utc>]>",
            ValueType::DateTimeTypeList => "Vec<DateTime<Utc>>",
            ValueType::IntType => "i64",
            ValueType::IntTypeArray => "Box<[i64]>",
            ValueType::IntTypeList => "Vec<i64>",
            ValueType::StringType => "String",
            ValueType::StringTypeArray => "Box<[String]>",
            ValueType::StringTypeList => "Vec<String>",
        }
    }

    /// Returns the zero value of this tag's runtime type
    pub fn zero_value(self) -> TypedValue {
        match self {
            ValueType::BoolType => TypedValue::Bool(false),
            ValueType::BoolTypeArray => TypedValue::BoolArray(Box::default()),
            ValueType::BoolTypeList => TypedValue::BoolList(Vec::new()),
            ValueType::DateTimeType => TypedValue::DateTime(DateTime::<Utc>::default()),
            ValueType::DateTimeTypeArray => TypedValue::DateTimeArray(Box::default()),
            ValueType::DateTimeTypeList => TypedValue::DateTimeList(Vec::new()),
            ValueType::IntType => TypedValue::Int(0),
            ValueType::IntTypeArray => TypedValue::IntArray(Box::default()),
            ValueType::IntTypeList => TypedValue::IntList(Vec::new()),
            ValueType::StringType => TypedValue::String(String::new()),
            ValueType::StringTypeArray => TypedValue::StringArray(Box::default()),
            ValueType::StringTypeList => TypedValue::StringList(Vec::new()),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueType::ALL
            .into_iter()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| CatalogError::UnknownType {
                name: s.to_string(),
            })
    }
}

/// A value coerced into the runtime type of its [`ValueType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    Bool(bool),
    BoolArray(Box<[bool]>),
    BoolList(Vec<bool>),
    DateTime(DateTime<Utc>),
    DateTimeArray(Box<[DateTime<Utc>]>),
    DateTimeList(Vec<DateTime<Utc>>),
    Int(i64),
    IntArray(Box<[i64]>),
    IntList(Vec<i64>),
    String(String),
    StringArray(Box<[String]>),
    StringList(Vec<String>),
}

impl TypedValue {
    /// Returns the tag this value was coerced into
    pub fn value_type(&self) -> ValueType {
        match self {
            TypedValue::Bool(_) => ValueType::BoolType,
            TypedValue::BoolArray(_) => ValueType::BoolTypeArray,
            TypedValue::BoolList(_) => ValueType::BoolTypeList,
            TypedValue::DateTime(_) => ValueType::DateTimeType,
            TypedValue::DateTimeArray(_) => ValueType::DateTimeTypeArray,
            TypedValue::DateTimeList(_) => ValueType::DateTimeTypeList,
            TypedValue::Int(_) => ValueType::IntType,
            TypedValue::IntArray(_) => ValueType::IntTypeArray,
            TypedValue::IntList(_) => ValueType::IntTypeList,
            TypedValue::String(_) => ValueType::StringType,
            TypedValue::StringArray(_) => ValueType::StringTypeArray,
            TypedValue::StringList(_) => ValueType::StringTypeList,
        }
    }

    /// Converts into the runtime type `V`, failing if the value holds another type
    pub fn into_inner<V>(self) -> Result<V, CatalogError>
    where
        V: TryFrom<TypedValue, Error = CatalogError>,
    {
        V::try_from(self)
    }
}

macro_rules! typed_conversions {
    ($($variant:ident($ty:ty) = $tag:ident),* $(,)?) => {
        $(
            impl From<$ty> for TypedValue {
                fn from(value: $ty) -> Self {
                    TypedValue::$variant(value)
                }
            }

            impl TryFrom<TypedValue> for $ty {
                type Error = CatalogError;

                fn try_from(value: TypedValue) -> Result<Self, Self::Error> {
                    match value {
                        TypedValue::$variant(inner) => Ok(inner),
                        other => Err(CatalogError::TypeMismatch {
                            expected: ValueType::$tag,
                            actual: other.value_type(),
                        }),
                    }
                }
            }
        )*
    };
}

typed_conversions! {
    Bool(bool) = BoolType,
    BoolArray(Box<[bool]>) = BoolTypeArray,
    BoolList(Vec<bool>) = BoolTypeList,
    DateTime(DateTime<Utc>) = DateTimeType,
    DateTimeArray(Box<[DateTime<Utc>]>) = DateTimeTypeArray,
    DateTimeList(Vec<DateTime<Utc>>) = DateTimeTypeList,
    Int(i64) = IntType,
    IntArray(Box<[i64]>) = IntTypeArray,
    IntList(Vec<i64>) = IntTypeList,
    String(String) = StringType,
    StringArray(Box<[String]>) = StringTypeArray,
    StringList(Vec<String>) = StringTypeList,
}

/// Coerces a resolved source node into the runtime type of `value_type`.
///
/// `None` and JSON `null` are both treated as a missing value; the caller
/// decides what a missing value means (see [`crate::convert::MissingPolicy`]).
pub fn coerce(node: Option<&JsonValue>, value_type: ValueType) -> Result<TypedValue, CatalogError> {
    let node = match node {
        None | Some(JsonValue::Null) => {
            return Err(CatalogError::MissingValue {
                expected: value_type,
            });
        }
        Some(node) => node,
    };

    Ok(match value_type {
        ValueType::BoolType => TypedValue::Bool(single(node, value_type)?),
        ValueType::BoolTypeArray => TypedValue::BoolArray(many(node, value_type)?.into()),
        ValueType::BoolTypeList => TypedValue::BoolList(many(node, value_type)?),
        ValueType::DateTimeType => TypedValue::DateTime(single(node, value_type)?),
        ValueType::DateTimeTypeArray => TypedValue::DateTimeArray(many(node, value_type)?.into()),
        ValueType::DateTimeTypeList => TypedValue::DateTimeList(many(node, value_type)?),
        ValueType::IntType => TypedValue::Int(single(node, value_type)?),
        ValueType::IntTypeArray => TypedValue::IntArray(many(node, value_type)?.into()),
        ValueType::IntTypeList => TypedValue::IntList(many(node, value_type)?),
        ValueType::StringType => TypedValue::String(single(node, value_type)?),
        ValueType::StringTypeArray => TypedValue::StringArray(many(node, value_type)?.into()),
        ValueType::StringTypeList => TypedValue::StringList(many(node, value_type)?),
    })
}

fn single<T: Scalar>(node: &JsonValue, expected: ValueType) -> Result<T, CatalogError> {
    T::from_node(node).map_err(|reason| CatalogError::CoercionFailed {
        expected,
        found: node_kind(node),
        reason,
    })
}

fn many<T: Scalar>(node: &JsonValue, expected: ValueType) -> Result<Vec<T>, CatalogError> {
    match node {
        JsonValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                if item.is_null() {
                    return Err(CatalogError::ElementFailed {
                        expected,
                        index,
                        reason: "element is null".to_string(),
                    });
                }
                T::from_node(item).map_err(|reason| CatalogError::ElementFailed {
                    expected,
                    index,
                    reason,
                })
            })
            .collect(),
        JsonValue::Object(_) => Err(CatalogError::CoercionFailed {
            expected,
            found: "object",
            reason: "expected an array".to_string(),
        }),
        // XML projects a single repeated element as a bare value
        scalar => Ok(vec![single(scalar, expected)?]),
    }
}
