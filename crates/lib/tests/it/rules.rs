//! Rule set loading, serialization and validation tests.

use std::io::Write;

use datamap::{MappingRule, RuleSet, ValueType, rules::RuleError};

use crate::helpers::*;

#[test]
fn test_spec_text_matches_programmatic_rules() {
    let from_text = RuleSet::from_json(STANDARD_SPEC).unwrap();
    let from_code = RuleSet::from_rules(standard_rules("")).unwrap();
    assert!(from_text.iter().eq(from_code.iter()));
    assert!(!from_text.is_empty());
}

#[test]
fn test_rule_order_is_preserved() {
    let rules = RuleSet::from_json(STANDARD_SPEC).unwrap();
    let destinations: Vec<_> = rules.iter().map(MappingRule::destination).collect();
    assert_eq!(
        destinations,
        vec!["name", "test_sub_class.sub_name", "numbers", "birth_date"]
    );
}

#[test]
fn test_serialized_rules_use_wire_names() {
    let rules = RuleSet::from_rules(standard_rules("[0].")).unwrap();
    let text = rules.to_json().unwrap();
    let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(raw[2]["DestinationProperty"], "numbers");
    assert_eq!(raw[2]["SourceType"], "IntTypeList");
    assert_eq!(raw[2]["SourceQuery"], "[0].Lucky.LuckyNumbers");
}

#[test]
fn test_load_selects_file_or_text() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(STANDARD_SPEC.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap();

    let from_file = RuleSet::load(path, true).unwrap();
    let from_text = RuleSet::load(STANDARD_SPEC, false).unwrap();
    assert!(from_file.iter().eq(from_text.iter()));

    // a path is not specification text
    let err = RuleSet::load(path, false).unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn test_every_tag_name_loads() {
    for tag in ValueType::ALL {
        let spec = format!(
            r#"[{{"DestinationProperty": "name", "SourceType": "{tag}", "SourceQuery": "Name"}}]"#
        );
        let rules = RuleSet::from_json(&spec).unwrap();
        assert_eq!(rules.iter().next().unwrap().value_type(), tag);
    }
}

#[test]
fn test_malformed_specs() {
    for spec in [
        "",
        "{}",
        r#"[{"DestinationProperty": "name"}]"#,
        r#"[{"DestinationProperty": "name", "SourceType": 3, "SourceQuery": "Name"}]"#,
    ] {
        let err = RuleSet::from_json(spec).unwrap_err();
        assert!(err.is_configuration_error(), "{spec:?}: {err}");
    }
}

#[test]
fn test_bind_reports_the_failing_rule() {
    let mut rules = standard_rules("");
    rules.push(MappingRule::new(
        "test_sub_class.sub_nam",
        ValueType::StringType,
        "Alias[1]",
    ));
    let rules = RuleSet::from_rules(rules).unwrap();

    match rules.bind::<TestClass>().unwrap_err() {
        RuleError::UnresolvedDestination {
            index,
            destination,
            target,
            source,
        } => {
            assert_eq!(index, 4);
            assert_eq!(destination, "test_sub_class.sub_nam");
            assert_eq!(target, "TestClass");
            assert_eq!(source.field(), Some("sub_nam"));
        }
        other => panic!("Expected UnresolvedDestination, got {other:?}"),
    }
}

#[test]
fn test_bind_accepts_every_declared_path() {
    let rules = RuleSet::from_rules([
        MappingRule::new("test_sub_class.sub_int", ValueType::IntType, "Lucky.LuckyNumbers[1]"),
        MappingRule::new("test_sub_class.sub_name", ValueType::StringType, "Name"),
        MappingRule::new("birth_date", ValueType::DateTimeType, "BirthDate"),
    ])
    .unwrap();
    let bound = rules.bind::<TestClass>().unwrap();
    assert_eq!(bound.len(), 3);
    assert_eq!(bound[0].path().parents().collect::<Vec<_>>(), vec!["test_sub_class"]);
    assert_eq!(bound[2].value_type(), ValueType::DateTimeType);
}
