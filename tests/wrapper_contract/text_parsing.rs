//! Text parsing
//!
//! Empty text is an explicit null, everything else is trimmed and parsed by
//! the type's grammar, and canonical text parses back to the same wrapper.

use chrono::{Datelike, NaiveDate, Timelike};
use tristate::types;
use tristate::{Error, Kind, Nullable};

use crate::common::*;
use crate::for_each_type;

fn assert_text_round_trip<K: Kind>(value: K::Value) {
    let w = Nullable::<K>::new(value);
    let text = w.to_string();
    let back: Nullable<K> = text.parse().unwrap();
    assert_eq!(back, w, "{} text {text:?} did not round trip", K::NAME);
}

// ============================================================================
// Empty and optional input
// ============================================================================

#[test]
fn empty_text_is_null_for_every_type() {
    for_each_type!(|T, _v| {
        let w = T::parse("").unwrap();
        assert!(w.is_defined());
        assert!(w.is_nil());
    });
}

#[test]
fn absent_text_reference_is_null() {
    for_each_type!(|T, _v| {
        assert_eq!(T::parse_opt(None).unwrap(), T::null());
    });
}

#[test]
fn present_text_reference_delegates_to_parser() {
    assert_eq!(types::Int::parse_opt(Some(" 42 ")).unwrap(), types::Int::new(42));
    assert!(types::Int::parse_opt(Some("forty")).is_err());
}

// ============================================================================
// Canonical round trip
// ============================================================================

#[test]
fn canonical_text_round_trips() {
    use tristate::kind;

    assert_text_round_trip::<kind::Bool>(false);
    assert_text_round_trip::<kind::Int16>(i16::MIN);
    assert_text_round_trip::<kind::Int>(-7);
    assert_text_round_trip::<kind::Int64>(i64::MAX);
    assert_text_round_trip::<kind::String>("plain".to_string());
    assert_text_round_trip::<kind::RichText>("<h1>Title</h1>".to_string());
    assert_text_round_trip::<kind::Date>(sample_date());
    assert_text_round_trip::<kind::Time>(sample_time());
    assert_text_round_trip::<kind::Timestamp>(sample_timestamp());
    assert_text_round_trip::<kind::Uuid>(sample_uuid());
}

#[test]
fn float_text_is_locale_formatted() {
    assert_eq!(types::Float64::new(1.23456).to_string(), "1,23");
    assert_eq!(types::Float64::new(2.5).to_string(), "2,5");
    assert_eq!(types::Float64::new(3.0).to_string(), "3");
    assert_eq!(types::Float64::parse("2.5").unwrap().value(), 2.5);
}

#[test]
fn json_text_is_wrapped_as_string_literal() {
    let w = types::Json::parse(" hello ").unwrap();
    assert_eq!(w.value(), br#""hello""#.to_vec());

    let w = types::Json::parse(r#"{"a":1}"#).unwrap();
    assert_eq!(w.to_string(), r#""{\"a\":1}""#);
}

// ============================================================================
// Per-type grammars
// ============================================================================

#[test]
fn bool_literals() {
    for s in ["1", "t", "T", "TRUE", "true", "True"] {
        assert_eq!(types::Bool::parse(s).unwrap(), types::Bool::new(true), "{s}");
    }
    for s in ["0", "f", "F", "FALSE", "false", "False"] {
        assert_eq!(types::Bool::parse(s).unwrap(), types::Bool::new(false), "{s}");
    }
    assert!(types::Bool::parse("yes").is_err());
}

#[test]
fn integers_truncate_to_width() {
    assert_eq!(types::Int16::parse("65537").unwrap().value(), 1);
    assert_eq!(types::Int::parse("4294967297").unwrap().value(), 1);
    assert_eq!(types::Int64::parse("-9000000000").unwrap().value(), -9_000_000_000);
    assert!(types::Int::parse("1.5").is_err());
}

#[test]
fn text_is_trimmed() {
    assert_eq!(types::String::parse("  padded\t").unwrap().value(), "padded");
    assert_eq!(types::Int::parse(" 7 ").unwrap().value(), 7);
}

#[test]
fn whitespace_only_text_is_present_and_empty() {
    let w = types::String::parse("   ").unwrap();
    assert!(!w.is_nil());
    assert_eq!(w.value(), "");
}

#[test]
fn date_layouts_in_order() {
    let expect = NaiveDate::from_ymd_opt(2006, 1, 2).unwrap();
    for s in ["2006-01-02", "01-02-06", "01-02-2006", "02-Jan-2006", "02-jan-06"] {
        assert_eq!(types::Date::parse(s).unwrap().value(), expect, "{s}");
    }
    // ambiguous numeric text resolves month-first
    let d = types::Date::parse("03-04-05").unwrap().value();
    assert_eq!((d.year(), d.month(), d.day()), (2005, 3, 4));
}

#[test]
fn date_parse_error_names_layout() {
    let err = types::Date::parse("25/12/2023").unwrap_err();
    assert!(matches!(err, Error::Layout { .. }));
    assert!(err.to_string().contains("YYYY-MM-DD"));
    assert!(err.to_string().contains("25/12/2023"));
}

#[test]
fn time_parse() {
    let w = types::Time::parse("7:05").unwrap();
    assert_eq!((w.value().hour(), w.value().minute()), (7, 5));
    assert!(types::Time::parse("25:00").is_err());
    assert!(types::Time::parse("noon").is_err());
}

#[test]
fn timestamp_layouts() {
    for (input, expect) in [
        ("2023-12-25T10:20:30+01:00", "2023-12-25T10:20:30+01:00"),
        ("2023-12-25 10:20:30Z", "2023-12-25T10:20:30Z"),
        ("2023-12-25T10:20", "2023-12-25T10:20:00Z"),
        ("12/25/2023 08:00", "2023-12-25T08:00:00Z"),
        ("1/2/06 15:04:05", "2006-01-02T15:04:05Z"),
        ("2023-12-25", "2023-12-25T00:00:00Z"),
    ] {
        let w = types::Timestamp::parse(input).unwrap();
        assert_eq!(w.to_string(), expect, "{input}");
    }
}

#[test]
fn uuid_parse_is_strict() {
    assert!(types::Uuid::parse(SAMPLE_UUID).is_ok());
    assert!(types::Uuid::parse(&SAMPLE_UUID.replace('-', "")).is_err());
    let err = types::Uuid::parse("not-a-uuid").unwrap_err();
    assert!(err.is_parse());
}
