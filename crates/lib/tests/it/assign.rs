//! Destination assignment tests against generated records.

use datamap::{
    TypedValue,
    assign::{assign, read},
    shape::{FieldPath, Record, ShapeError},
};

use crate::helpers::*;

fn path(p: &str) -> FieldPath {
    FieldPath::parse(p).unwrap()
}

#[test]
fn test_assign_creates_the_nested_record() {
    let mut target = TestClass::default();
    assert!(target.test_sub_class.is_none());

    assign(
        &mut target,
        &path("test_sub_class.sub_int"),
        TypedValue::Int(3),
    )
    .unwrap();
    assert_eq!(
        target.test_sub_class,
        Some(SubClass {
            sub_int: 3,
            sub_name: String::new(),
        })
    );

    assign(
        &mut target,
        &path("test_sub_class.sub_name"),
        TypedValue::String("kept".to_string()),
    )
    .unwrap();
    let sub = target.test_sub_class.as_ref().unwrap();
    assert_eq!(sub.sub_int, 3);
    assert_eq!(sub.sub_name, "kept");
}

#[test]
fn test_assign_rechecks_paths() {
    let mut target = TestClass::default();
    let err = assign(&mut target, &path("missing"), TypedValue::Int(1)).unwrap_err();
    assert!(err.is_unresolved_path());

    let err = assign(&mut target, &path("name.length"), TypedValue::Int(1)).unwrap_err();
    assert!(matches!(err, ShapeError::NotARecord { owner: "TestClass", .. }));
    // a failed walk through a value field creates nothing
    assert!(target.test_sub_class.is_none());
}

#[test]
fn test_list_field_takes_list_values_only() {
    let mut target = TestClass::default();
    assign(&mut target, &path("numbers"), TypedValue::IntList(vec![7, 11])).unwrap();
    assert_eq!(target.numbers, vec![7, 11]);

    let err = assign(
        &mut target,
        &path("numbers"),
        TypedValue::IntArray(vec![1, 2].into()),
    )
    .unwrap_err();
    assert!(err.is_assignment_error());
    assert_eq!(target.numbers, vec![7, 11]);
}

#[test]
fn test_read_matches_what_was_assigned() {
    let mut target = TestClass::default();
    assign(&mut target, &path("birth_date"), TypedValue::DateTime(birth_date())).unwrap();
    assert_eq!(
        read(&target, &path("birth_date")).unwrap(),
        Some(TypedValue::DateTime(birth_date()))
    );
    assert_eq!(read(&target, &path("test_sub_class.sub_name")).unwrap(), None);
}

#[test]
fn test_shape_and_assigner_agree() {
    let shape = TestClass::shape();
    for candidate in [
        "name",
        "numbers",
        "birth_date",
        "test_sub_class",
        "test_sub_class.sub_int",
        "test_sub_class.sub_name",
        "test_sub_class.nope",
        "nope",
        "numbers.len",
        "name.sub_name",
    ] {
        let path = path(candidate);
        let validated = shape.resolve(&path).is_ok();
        let mut target = TestClass::default();
        let walked = match assign(&mut target, &path, TypedValue::Int(0)) {
            Ok(()) => true,
            Err(err) => !err.is_unresolved_path(),
        };
        assert_eq!(validated, walked, "{candidate}");
    }
}
