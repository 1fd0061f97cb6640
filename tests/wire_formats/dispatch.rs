//! Dispatch by type name
//!
//! Import pipelines resolve a column's parser from its schema type name.

use std::collections::BTreeMap;

use tristate::dispatch::{is_empty_array, parse_from_string, AnyValue, TypeName};
use tristate::types;
use tristate::Error;

use crate::common::init_tracing;

#[test]
fn every_table_name_resolves() {
    for name in [
        "Bool", "Date", "Float64", "Int", "Int16", "Int64", "JSON", "RichText", "String", "Time",
        "Timestamp", "UUID",
    ] {
        let parsed = parse_from_string(name, "").unwrap();
        assert_eq!(parsed.type_name().name(), name);
        assert!(parsed.is_nil());
    }
}

#[test]
fn namespace_prefix_is_stripped() {
    let parsed = parse_from_string("types.Int64", "12").unwrap();
    assert_eq!(parsed, AnyValue::Int64(types::Int64::new(12)));
}

#[test]
fn names_are_case_sensitive() {
    init_tracing();
    let err = parse_from_string("uuid", "").unwrap_err();
    assert!(matches!(err, Error::UnknownType(ref name) if name == "uuid"));
    assert_eq!(err.to_string(), "invalid type: uuid");
    assert!(parse_from_string("Types.Int", "1").is_err());
}

#[test]
fn parse_errors_pass_through() {
    let err = parse_from_string("Date", "tomorrow").unwrap_err();
    assert!(matches!(err, Error::Layout { .. }));
}

#[test]
fn import_row_by_schema() {
    init_tracing();
    let schema = [
        ("id", "types.UUID"),
        ("name", "String"),
        ("born", "Date"),
        ("score", "Float64"),
        ("note", "RichText"),
    ];
    let row = [
        "67e55044-10b1-426f-9247-bb680e5fe0c8",
        " Ada ",
        "10-Dec-1815",
        "99.5",
        "",
    ];

    let parsed: BTreeMap<&str, AnyValue> = schema
        .iter()
        .zip(row)
        .map(|((column, type_name), cell)| (*column, parse_from_string(type_name, cell).unwrap()))
        .collect();

    assert_eq!(parsed["id"].to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    assert_eq!(parsed["name"], AnyValue::String(types::String::new("Ada".into())));
    assert_eq!(parsed["born"].to_string(), "1815-12-10");
    assert_eq!(parsed["score"].to_string(), "99,5");
    assert!(parsed["note"].is_nil());
}

#[test]
fn type_name_parse_matches_free_function() {
    for t in TypeName::ALL {
        assert_eq!(t.parse("").unwrap(), parse_from_string(t.name(), "").unwrap());
    }
}

#[test]
fn empty_array_of_wrappers() {
    assert!(is_empty_array(&Vec::<types::Bool>::new()));
    assert!(is_empty_array(&Vec::<types::Json>::new()));
    assert!(is_empty_array(&Vec::<types::Uuid>::new()));
    assert!(!is_empty_array(&vec![types::Int::null()]));
}

#[test]
fn empty_array_of_other_types_is_false() {
    assert!(!is_empty_array(&Vec::<i32>::new()));
    assert!(!is_empty_array(&Vec::<Option<String>>::new()));
    assert!(!is_empty_array(&types::Int::null()));
    assert!(!is_empty_array(&"not a vec"));
}
