//! Scalar coercions from canonical source nodes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value as JsonValue;

/// Offset-less date-time layouts accepted after RFC 3339 fails. Parsed as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A runtime element type that a source node can be coerced into.
///
/// The error side is a human-readable reason; callers wrap it into a
/// [`CatalogError`](super::CatalogError) carrying the declared tag.
pub trait Scalar: Sized {
    /// Converts a single, non-null node.
    fn from_node(node: &JsonValue) -> Result<Self, String>;
}

impl Scalar for bool {
    fn from_node(node: &JsonValue) -> Result<Self, String> {
        match node {
            JsonValue::Bool(b) => Ok(*b),
            JsonValue::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(i != 0),
                (None, Some(f)) => Ok(f != 0.0),
                _ => Err(format!("{n} is not a boolean")),
            },
            JsonValue::String(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(format!("'{s}' is not a boolean"))
                }
            }
            other => Err(format!("expected a boolean, got {}", node_kind(other))),
        }
    }
}

impl Scalar for i64 {
    fn from_node(node: &JsonValue) -> Result<Self, String> {
        match node {
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(i);
                }
                if n.is_u64() {
                    return Err(format!("{n} is out of range for an integer"));
                }
                // i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive
                match n.as_f64() {
                    Some(f) if f.fract() != 0.0 => Err(format!("{n} is not a whole number")),
                    Some(f) if f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
                    _ => Err(format!("{n} is out of range for an integer")),
                }
            }
            JsonValue::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| format!("'{s}' is not an integer: {e}")),
            JsonValue::Bool(b) => Ok(i64::from(*b)),
            other => Err(format!("expected an integer, got {}", node_kind(other))),
        }
    }
}

impl Scalar for String {
    fn from_node(node: &JsonValue) -> Result<Self, String> {
        match node {
            JsonValue::String(s) => Ok(s.clone()),
            JsonValue::Number(n) => Ok(n.to_string()),
            JsonValue::Bool(b) => Ok(b.to_string()),
            other => Err(format!("expected a string, got {}", node_kind(other))),
        }
    }
}

impl Scalar for DateTime<Utc> {
    fn from_node(node: &JsonValue) -> Result<Self, String> {
        match node {
            JsonValue::String(s) => parse_datetime(s),
            other => Err(format!("expected a date-time string, got {}", node_kind(other))),
        }
    }
}

/// Parses a date-time in RFC 3339, offset-less ISO 8601 (UTC) or bare-date form.
///
/// ```
/// # use datamap::catalog::parse_datetime;
/// let a = parse_datetime("1986-10-19T08:30:00+02:00").unwrap();
/// let b = parse_datetime("1986-10-19T06:30:00").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn parse_datetime(text: &str) -> Result<DateTime<Utc>, String> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("'{text}' is not a date-time"))
}

/// Returns a descriptive kind name for a source node (for error messages).
pub fn node_kind(node: &JsonValue) -> &'static str {
    match node {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
