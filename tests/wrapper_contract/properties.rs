//! Property tests
//!
//! Generated values for the lossless types: canonical text and structured
//! encoding both reproduce the wrapper, and lowercasing is idempotent.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use proptest::prelude::*;
use tristate::types;
use tristate::{DriverValue, Scanner, Valuer};

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1i32..=9999, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn time_strategy() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

fn timestamp_strategy() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (0i64..253_402_300_799, -43_200i32..=50_400).prop_map(|(secs, offset)| {
        let zone = FixedOffset::east_opt(offset - offset % 60).unwrap();
        Utc.timestamp_opt(secs, 0).unwrap().with_timezone(&zone)
    })
}

/// Text that survives trimming unchanged and is never empty
fn trimmed_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9ÄÖÜäöü][A-Za-z0-9ÄÖÜäöü .,-]{0,30}[A-Za-z0-9ÄÖÜäöü]"
}

proptest! {
    #[test]
    fn int_text_round_trip(v in any::<i32>()) {
        let w = types::Int::new(v);
        prop_assert_eq!(w.to_string().parse::<types::Int>().unwrap(), w);
    }

    #[test]
    fn int64_json_round_trip(v in any::<i64>()) {
        let w = types::Int64::new(v);
        let back: types::Int64 = serde_json::from_str(&serde_json::to_string(&w).unwrap()).unwrap();
        prop_assert_eq!(back, w);
    }

    #[test]
    fn int16_text_truncates_like_a_cast(v in any::<i64>()) {
        let w = types::Int16::parse(&v.to_string()).unwrap();
        prop_assert_eq!(w.value(), v as i16);
    }

    #[test]
    fn string_round_trips(s in trimmed_text()) {
        let w = types::String::new(s.clone());
        prop_assert_eq!(w.to_string().parse::<types::String>().unwrap(), w.clone());
        let back: types::String = serde_json::from_str(&serde_json::to_string(&w).unwrap()).unwrap();
        prop_assert_eq!(back, w);
    }

    #[test]
    fn lowercase_is_idempotent(s in ".{0,40}") {
        let once = types::String::new(s).to_lowercase();
        let twice = once.clone().to_lowercase();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn lowercase_all_is_idempotent(items in prop::collection::vec(proptest::option::of(".{0,10}"), 0..8)) {
        let mut once: Vec<types::RichText> = items.into_iter().map(types::RichText::from).collect();
        types::RichText::lowercase_all(&mut once);
        let mut twice = once.clone();
        types::RichText::lowercase_all(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn date_round_trips(d in date_strategy()) {
        let w = types::Date::new(d);
        prop_assert_eq!(w.to_string().parse::<types::Date>().unwrap(), w);
        let back: types::Date = serde_json::from_str(&serde_json::to_string(&w).unwrap()).unwrap();
        prop_assert_eq!(back, w);
    }

    #[test]
    fn time_round_trips(t in time_strategy()) {
        let w = types::Time::new(t);
        prop_assert_eq!(w.to_string().parse::<types::Time>().unwrap(), w);
        let back: types::Time = serde_json::from_str(&serde_json::to_string(&w).unwrap()).unwrap();
        prop_assert_eq!(back, w);
    }

    #[test]
    fn timestamp_round_trips(ts in timestamp_strategy()) {
        let w = types::Timestamp::new(ts);
        prop_assert!(w.equal(&types::Timestamp::new(ts)));
        prop_assert_eq!(w.to_string().parse::<types::Timestamp>().unwrap(), w);
        let back: types::Timestamp = serde_json::from_str(&serde_json::to_string(&w).unwrap()).unwrap();
        prop_assert_eq!(back, w);
    }

    #[test]
    fn minutes_until_is_antisymmetric(a in timestamp_strategy(), b in timestamp_strategy()) {
        let (a, b) = (types::Timestamp::new(a), types::Timestamp::new(b));
        prop_assert_eq!(a.minutes_until(&b), -b.minutes_until(&a));
        prop_assert_eq!(a.after(&b), b.before(&a));
    }

    #[test]
    fn uuid_round_trips(bytes in any::<[u8; 16]>()) {
        let w = types::Uuid::new(uuid::Uuid::from_bytes(bytes));
        prop_assert_eq!(w.to_string().parse::<types::Uuid>().unwrap(), w);
        let mut scanned = types::Uuid::undefined();
        scanned.scan(w.to_driver().unwrap()).unwrap();
        prop_assert_eq!(scanned, w);
    }

    #[test]
    fn bool_storage_round_trip(b in any::<bool>()) {
        let w = types::Bool::new(b);
        prop_assert_eq!(w.to_driver().unwrap(), DriverValue::Bool(b));
        prop_assert_eq!(w.to_string().parse::<types::Bool>().unwrap(), w);
    }

    #[test]
    fn float_json_round_trip(n in -1_000_000i64..1_000_000, scale in 0u32..4) {
        let v = n as f64 / f64::from(4u32.pow(scale));
        let w = types::Float64::new(v);
        let back: types::Float64 = serde_json::from_str(&serde_json::to_string(&w).unwrap()).unwrap();
        prop_assert_eq!(back, w);
    }
}
