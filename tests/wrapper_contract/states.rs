//! Construction and inspection
//!
//! The three constructors and the defined / nil pair, for every type.

use crate::for_each_type;

// ============================================================================
// Constructors
// ============================================================================

#[test]
fn undefined_is_not_defined_and_is_nil() {
    for_each_type!(|T, _v| {
        let w = T::undefined();
        assert!(!w.is_defined());
        assert!(w.is_nil());
        assert!(w.is_zero());
        assert!(w.is_undefined());
    });
}

#[test]
fn default_is_undefined() {
    for_each_type!(|T, _v| {
        assert_eq!(T::default(), T::undefined());
    });
}

#[test]
fn value_constructor_holds_value() {
    for_each_type!(|T, v| {
        let w = T::new(v.clone());
        assert!(w.is_defined());
        assert!(!w.is_nil());
        assert!(!w.is_zero());
        assert_eq!(w.value(), v);
        assert_eq!(w.as_option(), Some(&v));
    });
}

#[test]
fn optional_constructor_absent_is_null() {
    for_each_type!(|T, v| {
        let w = T::from_option(None);
        assert!(w.is_defined());
        assert!(w.is_nil());
        assert_eq!(w, T::null());

        let present = T::from_option(Some(v.clone()));
        assert_eq!(present, T::new(v));
    });
}

#[test]
fn nil_value_is_zero_value() {
    for_each_type!(|T, _v| {
        let zero = T::new(Default::default()).value();
        assert_eq!(T::null().value(), zero);
        assert_eq!(T::undefined().value(), zero);
        assert_eq!(T::null().as_option(), None);
    });
}

#[test]
fn nil_renders_empty() {
    for_each_type!(|T, _v| {
        assert_eq!(T::null().to_string(), "");
        assert_eq!(T::undefined().to_string(), "");
    });
}

#[test]
fn null_and_undefined_differ() {
    for_each_type!(|T, _v| {
        assert_ne!(T::null(), T::undefined());
    });
}

// ============================================================================
// Value semantics
// ============================================================================

#[test]
fn clone_copies_full_state() {
    for_each_type!(|T, v| {
        for original in [T::undefined(), T::null(), T::new(v.clone())] {
            let copy = original.clone();
            assert_eq!(copy, original);
            assert_eq!(copy.is_defined(), original.is_defined());
            assert_eq!(copy.is_nil(), original.is_nil());
        }
    });
}

#[test]
fn scalar_wrappers_are_copy() {
    fn assert_copy<T: Copy>() {}
    assert_copy::<tristate::types::Bool>();
    assert_copy::<tristate::types::Int64>();
    assert_copy::<tristate::types::Date>();
    assert_copy::<tristate::types::Timestamp>();
    assert_copy::<tristate::types::Uuid>();
}

#[test]
fn wrappers_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<tristate::types::String>();
    assert_send_sync::<tristate::types::Json>();
    assert_send_sync::<tristate::types::Timestamp>();
}

// ============================================================================
// Type-specific normalisation
// ============================================================================

#[test]
fn time_constructor_drops_seconds() {
    let t = chrono::NaiveTime::from_hms_opt(9, 15, 42).unwrap();
    let w = tristate::types::Time::new(t);
    assert_eq!(w.to_string(), "09:15");
    assert_eq!(w.value(), chrono::NaiveTime::from_hms_opt(9, 15, 0).unwrap());
}

#[test]
fn timestamp_constructor_normalises_to_utc() {
    use chrono::{FixedOffset, TimeZone};
    let zone = FixedOffset::east_opt(2 * 3600).unwrap();
    let local = zone.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    let w = tristate::types::Timestamp::new(local);
    assert_eq!(w.to_string(), "2024-06-01T08:00:00Z");
    assert_eq!(w.value().offset().local_minus_utc(), 0);
}

#[test]
fn lowercase_leaves_nil_untouched() {
    use tristate::types::{RichText, String};

    assert_eq!(String::new("MiXeD".into()).to_lowercase().value(), "mixed");
    assert_eq!(String::null().to_lowercase(), String::null());
    assert_eq!(RichText::undefined().to_lowercase(), RichText::undefined());

    let mut items = vec![String::new("ABC".into()), String::null(), String::undefined()];
    String::lowercase_all(&mut items);
    assert_eq!(items, vec![String::new("abc".into()), String::null(), String::undefined()]);
}
