//! Constants used throughout the datamap library.
//!
//! This module provides central definitions for the member names produced when
//! XML documents are projected into the canonical source tree.

/// Prefix for members projected from XML attributes (`<a id="1">` → `"@id"`).
pub const XML_ATTRIBUTE_PREFIX: &str = "@";

/// Member holding the text of an XML element that also has attributes or children.
pub const XML_TEXT_KEY: &str = "#text";

/// Member holding the projected XML declaration.
pub const XML_DECLARATION_KEY: &str = "?xml";

/// Leading character that marks textual input as XML.
pub const XML_LEAD: char = '<';

/// Leading characters that mark textual input as JSON.
pub const JSON_LEADS: [char; 2] = ['{', '['];
