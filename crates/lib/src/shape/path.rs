//! Destination field paths.
//!
//! A [`FieldPath`] is a dot-separated chain of field names (`Sub.SubName`)
//! naming where a mapped value is written in a destination record. Unlike
//! source queries, field paths are strict: every component must be a
//! non-empty name without surrounding whitespace, and there is no indexing.
//!
//! ```rust
//! use datamap::shape::FieldPath;
//!
//! let path: FieldPath = "sub.sub_name".parse()?;
//! assert_eq!(path.len(), 2);
//! assert_eq!(path.leaf(), "sub_name");
//! assert_eq!(path.parents().collect::<Vec<_>>(), vec!["sub"]);
//! # Ok::<(), datamap::shape::ShapeError>(())
//! ```

use std::{fmt, str::FromStr};

use super::ShapeError;

/// Separator between field path components.
pub const SEPARATOR: char = '.';

/// Validates a single field path component.
fn check_component(path: &str, component: &str) -> Result<(), ShapeError> {
    let reason = if component.is_empty() {
        "empty component"
    } else if component.trim() != component {
        "component has surrounding whitespace"
    } else if component.contains(['[', ']']) {
        "indexing is not supported in destination paths"
    } else {
        return Ok(());
    };
    Err(ShapeError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    })
}

/// An owned, validated destination path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    inner: String,
}

impl FieldPath {
    /// Parses and validates a dotted path.
    pub fn parse(path: &str) -> Result<Self, ShapeError> {
        if path.is_empty() {
            return Err(ShapeError::InvalidPath {
                path: String::new(),
                reason: "path is empty".to_string(),
            });
        }
        for component in path.split(SEPARATOR) {
            check_component(path, component)?;
        }
        Ok(Self {
            inner: path.to_string(),
        })
    }

    /// Returns the components before the last one.
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        let end = self.inner.rfind(SEPARATOR).unwrap_or(0);
        self.inner[..end].split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Returns the last component, the field that receives the value.
    pub fn leaf(&self) -> &str {
        match self.inner.rfind(SEPARATOR) {
            Some(last_dot) => &self.inner[last_dot + 1..],
            None => &self.inner,
        }
    }

    /// Returns the number of components in the path.
    pub fn len(&self) -> usize {
        self.inner.split(SEPARATOR).count()
    }

    /// Always false: a validated path has at least one component.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl FromStr for FieldPath {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl TryFrom<&str> for FieldPath {
    type Error = ShapeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        FieldPath::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = ShapeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        FieldPath::parse(&s)
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}
