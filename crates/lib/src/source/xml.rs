//! XML projection into the canonical source tree.
//!
//! Projection follows the widely used Json.NET `SerializeXmlNode` conventions,
//! so that a query written against the JSON form of a document also works
//! against its XML form:
//!
//! - the document is an object with a single member named after the root element
//! - attributes become members named `@attr`
//! - an element with only text becomes a string; an empty element becomes `null`
//! - an element with attributes or children keeps its text under `#text`
//! - repeated sibling elements with the same name become an array, in document order
//! - the XML declaration, when present, becomes a `?xml` member
//! - namespaced elements and attributes keep their prefix (`@xml:lang`, `x:Item`)
//!
//! Namespace declarations (`xmlns`, `xmlns:x`) are not projected. A document
//! type declaration is accepted and skipped.
//!
//! Every projected leaf is a string. The value-type catalog parses numbers,
//! booleans and date-times out of text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::SourceError;
use crate::constants::{XML_ATTRIBUTE_PREFIX, XML_DECLARATION_KEY, XML_TEXT_KEY};

/// Naming conventions for the XML projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlOptions {
    /// Prefix for members projected from attributes
    pub attribute_prefix: String,
    /// Member name for element text when the element also has attributes or children
    pub text_key: String,
    /// Whether to project the `<?xml ...?>` declaration
    pub include_declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            attribute_prefix: XML_ATTRIBUTE_PREFIX.to_string(),
            text_key: XML_TEXT_KEY.to_string(),
            include_declaration: true,
        }
    }
}

impl XmlOptions {
    /// Builder method to set the attribute prefix
    pub fn with_attribute_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attribute_prefix = prefix.into();
        self
    }

    /// Builder method to set the text member name
    pub fn with_text_key(mut self, key: impl Into<String>) -> Self {
        self.text_key = key.into();
        self
    }

    /// Builder method to toggle projection of the XML declaration
    pub fn with_declaration(mut self, include: bool) -> Self {
        self.include_declaration = include;
        self
    }
}

/// Parses XML text and projects it into the canonical source tree.
pub fn project(text: &str, options: &XmlOptions) -> Result<JsonValue, SourceError> {
    let parsing = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(text, parsing)
        .map_err(|e| SourceError::InvalidXml {
            reason: e.to_string(),
        })?;

    let mut root = Map::new();
    if options.include_declaration {
        if let Some(declaration) = declaration(text, options) {
            root.insert(XML_DECLARATION_KEY.to_string(), declaration);
        }
    }

    let element = document.root_element();
    root.insert(element_name(element), project_element(element, options));
    Ok(JsonValue::Object(root))
}

fn project_element(element: roxmltree::Node<'_, '_>, options: &XmlOptions) -> JsonValue {
    let mut members = Map::new();
    for attribute in element.attributes() {
        let name = qualified(element, attribute.namespace(), attribute.name());
        members.insert(
            format!("{}{}", options.attribute_prefix, name),
            JsonValue::String(attribute.value().to_string()),
        );
    }

    // Group child elements by name, keeping first-appearance order
    let mut groups: Vec<(String, Vec<JsonValue>)> = Vec::new();
    let mut text = String::new();
    for child in element.children() {
        if child.is_element() {
            let name = element_name(child);
            let projected = project_element(child, options);
            match groups.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, values)) => values.push(projected),
                None => groups.push((name, vec![projected])),
            }
        } else if child.is_text() {
            if let Some(fragment) = child.text() {
                if !fragment.trim().is_empty() {
                    text.push_str(fragment);
                }
            }
        }
    }

    if members.is_empty() && groups.is_empty() {
        return if text.is_empty() {
            JsonValue::Null
        } else {
            JsonValue::String(text)
        };
    }

    for (name, mut values) in groups {
        let value = if values.len() == 1 {
            values.remove(0)
        } else {
            JsonValue::Array(values)
        };
        members.insert(name, value);
    }
    if !text.is_empty() {
        members.insert(options.text_key.clone(), JsonValue::String(text));
    }
    JsonValue::Object(members)
}

fn element_name(element: roxmltree::Node<'_, '_>) -> String {
    let tag = element.tag_name();
    qualified(element, tag.namespace(), tag.name())
}

/// Prefixes a local name with the prefix bound to its namespace, if any.
fn qualified(scope: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| scope.lookup_prefix(uri)) {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}

/// Projects the pseudo-attributes of a leading `<?xml ...?>` declaration.
fn declaration(text: &str, options: &XmlOptions) -> Option<JsonValue> {
    let body = text.strip_prefix("<?xml")?;
    // `<?xml-stylesheet ...?>` and other processing instructions are not declarations
    if !body.starts_with(|c: char| c.is_ascii_whitespace() || c == '?') {
        return None;
    }
    let body = &body[..body.find("?>")?];

    let mut members = Map::new();
    for name in ["version", "encoding", "standalone"] {
        if let Some(value) = pseudo_attribute(body, name) {
            members.insert(
                format!("{}{}", options.attribute_prefix, name),
                JsonValue::String(value.to_string()),
            );
        }
    }
    Some(JsonValue::Object(members))
}

fn pseudo_attribute<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    let start = body.find(name)? + name.len();
    let rest = body[start..].trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    Some(&value[..value.find(quote)?])
}
