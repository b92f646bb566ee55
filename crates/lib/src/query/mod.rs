//! Source queries.
//!
//! A [`Query`] locates one node in a [`SourceTree`](crate::source::SourceTree).
//! The syntax is a small subset of JSONPath:
//!
//! | Form            | Meaning                                   |
//! |-----------------|-------------------------------------------|
//! | `Name`          | member of the root object                 |
//! | `Lucky.Numbers` | nested member access                      |
//! | `Alias[0]`      | element of an array member                |
//! | `[0].Name`      | member of an element of a root array      |
//! | `$.Name`        | explicit root prefix (optional)           |
//! | `['Odd Name']`  | quoted member, for names with `.` or `[`  |
//!
//! There is no filtering, slicing, wildcarding or recursion: every query names
//! exactly one location. A query that names nothing resolves to `None`; what
//! that means is decided by the caller.
//!
//! ```
//! use datamap::query::Query;
//! use serde_json::json;
//!
//! let tree = json!([{"Lucky": {"LuckyNumbers": [7, 11]}}]);
//! let query: Query = "[0].Lucky.LuckyNumbers[1]".parse()?;
//! assert_eq!(query.resolve(&tree), Some(&json!(11)));
//! # Ok::<(), datamap::query::QueryError>(())
//! ```

use std::{fmt, str::FromStr};

use serde_json::Value as JsonValue;

pub mod errors;

pub use errors::QueryError;

/// One step of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Member of an object
    Member(String),
    /// Zero-based element of an array
    Index(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Member(name) => write!(f, ".{name}"),
            Step::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A parsed source query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    text: String,
    steps: Vec<Step>,
}

impl Query {
    /// Parses query text.
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        let steps = Parser::new(text).parse()?;
        Ok(Self {
            text: text.to_string(),
            steps,
        })
    }

    /// Returns the original query text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the parsed steps
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Resolves the query against a tree, returning a reference into it.
    ///
    /// Each step is matched against the kind of the node it reaches, so the
    /// first step decides whether the root is walked as an object or an array.
    /// A member step on an array, an index step on an object, a missing member
    /// or an out-of-range index all yield `None`.
    pub fn resolve<'a>(&self, root: &'a JsonValue) -> Option<&'a JsonValue> {
        self.steps
            .iter()
            .try_fold(root, |node, step| match (step, node) {
                (Step::Member(name), JsonValue::Object(members)) => members.get(name),
                (Step::Index(index), JsonValue::Array(items)) => items.get(*index),
                _ => None,
            })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::parse(s)
    }
}

impl TryFrom<&str> for Query {
    type Error = QueryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Query::parse(s)
    }
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn parse(mut self) -> Result<Vec<Step>, QueryError> {
        let mut steps = Vec::new();

        match self.peek() {
            None => return Ok(steps),
            Some('$') => {
                self.bump();
            }
            Some('[') => {}
            Some(_) => steps.push(Step::Member(self.member()?)),
        }

        while let Some(c) = self.bump() {
            match c {
                '.' => steps.push(Step::Member(self.member()?)),
                '[' => steps.push(self.bracket()?),
                other => {
                    let offset = self.pos - other.len_utf8();
                    return Err(self.error_at(offset, format!("unexpected '{other}'")));
                }
            }
        }
        Ok(steps)
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn member(&mut self) -> Result<String, QueryError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            match c {
                '.' | '[' => break,
                ']' => return Err(self.error("unexpected ']'")),
                _ => {
                    self.bump();
                }
            }
        }
        if start == self.pos {
            return Err(self.error("empty member name"));
        }
        Ok(self.text[start..self.pos].to_string())
    }

    fn bracket(&mut self) -> Result<Step, QueryError> {
        let step = match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.bump();
                let start = self.pos;
                let len = self.text[start..]
                    .find(quote)
                    .ok_or_else(|| self.error("unterminated quoted member"))?;
                self.pos += len + quote.len_utf8();
                Step::Member(self.text[start..start + len].to_string())
            }
            Some(c) if c.is_ascii_digit() => {
                let start = self.pos;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.bump();
                }
                let digits = &self.text[start..self.pos];
                let index = digits
                    .parse::<usize>()
                    .map_err(|e| self.error_at(start, format!("invalid index '{digits}': {e}")))?;
                Step::Index(index)
            }
            _ => return Err(self.error("expected an index or a quoted member")),
        };

        match self.bump() {
            Some(']') => Ok(step),
            _ => Err(self.error("expected ']'")),
        }
    }

    fn error(&self, reason: impl Into<String>) -> QueryError {
        self.error_at(self.pos, reason)
    }

    fn error_at(&self, offset: usize, reason: impl Into<String>) -> QueryError {
        QueryError::Syntax {
            query: self.text.to_string(),
            offset,
            reason: reason.into(),
        }
    }
}
