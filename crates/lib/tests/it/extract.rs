//! Single-value extraction tests.

use chrono::{DateTime, Utc};
use datamap::{TypedValue, ValueType, extract, extract_as, source::XmlOptions};

use crate::helpers::*;

fn array_text() -> String {
    serde_json::to_string(&vec![source_object(), source_object()]).unwrap()
}

#[test]
fn test_single_value_from_array_root() {
    let value = extract(&array_text(), "[0].Lucky.LuckyNumbers[0]", ValueType::IntType).unwrap();
    assert_eq!(value, TypedValue::Int(7));
}

#[test]
fn test_extract_as_runtime_types() {
    let text = array_text();

    let alias: String = extract_as(&text, "[0].Alias[0]", ValueType::StringType).unwrap();
    assert_eq!(alias, "SourceTestA");

    let numbers: Vec<i64> =
        extract_as(&text, "[1].Lucky.LuckyNumbers", ValueType::IntTypeList).unwrap();
    assert_eq!(numbers, vec![7, 11]);

    let aliases: Box<[String]> =
        extract_as(&text, "[1].Alias", ValueType::StringTypeArray).unwrap();
    assert_eq!(aliases.len(), 2);

    let born: DateTime<Utc> = extract_as(&text, "[0].BirthDate", ValueType::DateTimeType).unwrap();
    assert_eq!(born, birth_date());
}

#[test]
fn test_extract_from_every_input_form() {
    let object = source_object();
    let from_object = extract(&object, "Lucky.LuckyNumbers", ValueType::IntTypeList).unwrap();
    let from_xml = extract(
        &source_xml(),
        "SourceClass.Lucky.LuckyNumbers",
        ValueType::IntTypeList,
    )
    .unwrap();
    assert_eq!(from_object, from_xml);
    assert_eq!(from_object, TypedValue::IntList(vec![7, 11]));
}

#[test]
fn test_single_xml_child_coerces_to_a_list() {
    let xml = "<Lucky><LuckyNumbers>7</LuckyNumbers></Lucky>";
    let numbers: Vec<i64> =
        extract_as(xml, "Lucky.LuckyNumbers", ValueType::IntTypeList).unwrap();
    assert_eq!(numbers, vec![7]);
}

#[test]
fn test_document_type_declaration_is_accepted() {
    let value = extract(
        "<!DOCTYPE Person><Person><Name>Ada</Name></Person>",
        "Person.Name",
        ValueType::StringType,
    )
    .unwrap();
    assert_eq!(value, TypedValue::String("Ada".to_string()));
}

#[test]
fn test_out_of_range_float_is_not_saturated() {
    let err = extract(r#"{"n": 9223372036854775808.0}"#, "n", ValueType::IntType).unwrap_err();
    assert!(err.is_coercion_error());
}

#[test]
fn test_extract_errors() {
    let text = array_text();
    assert!(
        extract(&text, "[5].Name", ValueType::StringType)
            .unwrap_err()
            .is_missing_value()
    );
    assert!(
        extract(&text, "[0].Name", ValueType::IntType)
            .unwrap_err()
            .is_coercion_error()
    );
    assert!(
        extract(&text, "[0]..Name", ValueType::StringType)
            .unwrap_err()
            .is_configuration_error()
    );
    assert!(
        extract("Name", "Name", ValueType::StringType)
            .unwrap_err()
            .is_input_error()
    );
}

#[test]
fn test_extract_with_custom_xml_options() {
    let xml = r#"<Item code="A1">widget</Item>"#;
    let options = XmlOptions::default()
        .with_attribute_prefix("")
        .with_text_key("value");
    let value = datamap::convert::extract_with(xml, "Item.value", ValueType::StringType, &options)
        .unwrap();
    assert_eq!(value, TypedValue::String("widget".to_string()));
    let code = datamap::convert::extract_with(xml, "Item.code", ValueType::StringType, &options)
        .unwrap();
    assert_eq!(code, TypedValue::String("A1".to_string()));
}
