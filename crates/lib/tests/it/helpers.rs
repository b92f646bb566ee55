use chrono::{DateTime, TimeZone, Utc};
use datamap::{Converter, MappingRule, ValueType, record};
use serde::Serialize;

// ==========================
// SOURCE FIXTURES
// ==========================

/// Source-side type, serialized with the field names rules query against.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceClass {
    pub name: String,
    pub alias: Vec<String>,
    pub lucky: Lucky,
    pub birth_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lucky {
    pub lucky_numbers: Vec<i64>,
}

pub fn birth_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1986, 10, 19, 8, 30, 0).unwrap()
}

pub fn source_object() -> SourceClass {
    SourceClass {
        name: "SourceTest".to_string(),
        alias: vec!["SourceTestA".to_string(), "SourceTestB".to_string()],
        lucky: Lucky {
            lucky_numbers: vec![7, 11],
        },
        birth_date: birth_date(),
    }
}

/// The source object as an XML document rooted at `<SourceClass>`.
pub fn source_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <SourceClass>\
           <Name>SourceTest</Name>\
           <Alias>SourceTestA</Alias>\
           <Alias>SourceTestB</Alias>\
           <Lucky><LuckyNumbers>7</LuckyNumbers><LuckyNumbers>11</LuckyNumbers></Lucky>\
           <BirthDate>{}</BirthDate>\
         </SourceClass>",
        birth_date().to_rfc3339()
    )
}

// ==========================
// DESTINATION FIXTURES
// ==========================

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct SubClass {
        pub sub_int: i64,
        pub sub_name: String,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct TestClass {
        pub name: String,
        pub numbers: Vec<i64>,
        pub test_sub_class: Option<SubClass>,
        pub birth_date: DateTime<Utc>,
    }
}

// ==========================
// RULE FIXTURES
// ==========================

/// The four standard rules, with every query prefixed by `prefix`.
///
/// Use `""` for object sources, `"[0]."` for array sources and
/// `"SourceClass."` for sources rooted at a named element.
pub fn standard_rules(prefix: &str) -> Vec<MappingRule> {
    vec![
        MappingRule::new("name", ValueType::StringType, format!("{prefix}Name")),
        MappingRule::new(
            "test_sub_class.sub_name",
            ValueType::StringType,
            format!("{prefix}Alias[0]"),
        ),
        MappingRule::new(
            "numbers",
            ValueType::IntTypeList,
            format!("{prefix}Lucky.LuckyNumbers"),
        ),
        MappingRule::new(
            "birth_date",
            ValueType::DateTimeType,
            format!("{prefix}BirthDate"),
        ),
    ]
}

/// The standard rules as specification text.
pub const STANDARD_SPEC: &str = r#"[
    { "DestinationProperty": "name", "SourceType": "StringType", "SourceQuery": "Name" },
    { "DestinationProperty": "test_sub_class.sub_name", "SourceType": "StringType", "SourceQuery": "Alias[0]" },
    { "DestinationProperty": "numbers", "SourceType": "IntTypeList", "SourceQuery": "Lucky.LuckyNumbers" },
    { "DestinationProperty": "birth_date", "SourceType": "DateTimeType", "SourceQuery": "BirthDate" }
]"#;

pub fn standard_converter(prefix: &str) -> Converter<TestClass> {
    Converter::from_rules(standard_rules(prefix)).expect("standard rules are valid")
}

/// Asserts a destination holds the values mapped from [`source_object`].
pub fn assert_standard_output(output: &TestClass) {
    assert_eq!(output.name, "SourceTest");
    assert_eq!(
        output.test_sub_class.as_ref().map(|sub| sub.sub_name.as_str()),
        Some("SourceTestA")
    );
    assert!(output.numbers.contains(&7));
    assert!(output.numbers.contains(&11));
    assert_eq!(output.birth_date, birth_date());
}
