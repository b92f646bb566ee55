//! Input classification and normalization tests.

use datamap::{
    ConvertConfig, Converter, MappingRule, ValueType,
    source::{Source, SourceError, SourceKind, XmlOptions, normalize},
};
use serde_json::json;

use crate::helpers::*;

#[test]
fn test_detect_dispatch_order() {
    assert_eq!(Source::detect(&source_xml()).unwrap().kind(), SourceKind::Xml);
    assert_eq!(Source::detect("{\"a\": 1}").unwrap().kind(), SourceKind::Json);
    assert_eq!(Source::detect("[]").unwrap().kind(), SourceKind::Json);
    assert_eq!(
        Source::detect(&source_object()).unwrap().kind(),
        SourceKind::Object
    );
    assert!(matches!(
        Source::detect("SourceTest").unwrap_err(),
        SourceError::UnsupportedInput { .. }
    ));
}

#[test]
fn test_live_object_normalizes_to_its_serialization() {
    let options = XmlOptions::default();
    let tree = normalize(&source_object(), &options).unwrap();
    assert_eq!(tree.root()["Name"], "SourceTest");
    assert_eq!(tree.root()["Lucky"]["LuckyNumbers"], json!([7, 11]));

    let text = serde_json::to_string(&source_object()).unwrap();
    assert_eq!(normalize(&text, &options).unwrap(), tree);
}

#[test]
fn test_xml_document_is_rooted_at_its_element() {
    let tree = normalize(&source_xml(), &XmlOptions::default()).unwrap();
    let root = tree.root();
    assert_eq!(root["?xml"]["@version"], "1.0");
    assert_eq!(root["SourceClass"]["Alias"], json!(["SourceTestA", "SourceTestB"]));
    assert_eq!(root["SourceClass"]["Lucky"]["LuckyNumbers"], json!(["7", "11"]));
    assert!(!tree.is_array_root());
}

#[test]
fn test_array_root() {
    let text = serde_json::to_string(&vec![source_object(), source_object()]).unwrap();
    let tree = normalize(&text, &XmlOptions::default()).unwrap();
    assert!(tree.is_array_root());
    let query = "[1].Alias[1]".parse().unwrap();
    assert_eq!(tree.resolve(&query), Some(&json!("SourceTestB")));
}

#[test]
fn test_malformed_documents_are_input_errors() {
    let converter = standard_converter("");
    for input in ["<SourceClass><Name>", "{\"Name\": ", "[1, 2"] {
        let err = converter.parse(input).unwrap_err();
        assert!(err.is_input_error(), "{input:?}: {err}");
    }
}

#[test]
fn test_scalar_values_are_not_sources() {
    let converter = standard_converter("");
    assert!(converter.parse(&7).unwrap_err().is_input_error());
    assert!(converter.parse(&true).unwrap_err().is_input_error());
}

#[test]
fn test_attributes_are_queryable_with_configured_prefix() {
    let xml = r#"<Person id="42"><Name>Ada</Name></Person>"#;

    let default = Converter::<TestClass>::from_rules([MappingRule::new(
        "name",
        ValueType::StringType,
        "Person['@id']",
    )])
    .unwrap();
    assert_eq!(default.parse(xml).unwrap().name, "42");

    let custom = Converter::<TestClass>::from_rules([MappingRule::new(
        "name",
        ValueType::StringType,
        "Person.attr_id",
    )])
    .unwrap()
    .with_config(
        ConvertConfig::default().with_xml(XmlOptions::default().with_attribute_prefix("attr_")),
    );
    assert_eq!(custom.parse(xml).unwrap().name, "42");
}
