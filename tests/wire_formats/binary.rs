//! Binary serde format
//!
//! bincode carries present values of every kind except the JSON payload,
//! whose raw embedding only self-describing formats support.

use serde::{Deserialize, Serialize};
use tristate::types;

use crate::common::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Record {
    first_name: types::String,
    last_name: types::String,
    bio: types::RichText,
    active: types::Bool,
    age: types::Int16,
    visits: types::Int,
    total: types::Int64,
    score: types::Float64,
    born: types::Date,
    alarm: types::Time,
    seen: types::Timestamp,
    id: types::Uuid,
}

fn record() -> Record {
    Record {
        first_name: types::String::new("John".into()),
        last_name: types::String::new("Doe".into()),
        bio: types::RichText::new("<p>Hello</p>".into()),
        active: types::Bool::new(true),
        age: types::Int16::new(41),
        visits: types::Int::new(-2),
        total: types::Int64::new(i64::MIN),
        score: types::Float64::new(0.25),
        born: types::Date::new(sample_date()),
        alarm: types::Time::new(sample_time()),
        seen: types::Timestamp::new(sample_timestamp()),
        id: types::Uuid::new(sample_uuid()),
    }
}

#[test]
fn present_values_round_trip() {
    let original = record();
    let bytes = bincode::serialize(&original).unwrap();
    let decoded: Record = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn null_round_trips() {
    let mut original = record();
    original.last_name = types::String::null();
    original.seen = types::Timestamp::null();

    let bytes = bincode::serialize(&original).unwrap();
    let decoded: Record = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn undefined_decodes_as_null() {
    let mut original = record();
    original.visits = types::Int::undefined();

    let bytes = bincode::serialize(&original).unwrap();
    let decoded: Record = bincode::deserialize(&bytes).unwrap();
    assert!(decoded.visits.is_defined());
    assert!(decoded.visits.is_nil());
}

#[test]
fn json_payload_does_not_round_trip() {
    let payload = types::Json::new(br#"{"a":1}"#.to_vec());
    let round_trip =
        bincode::serialize(&payload).and_then(|bytes| bincode::deserialize::<types::Json>(&bytes));
    assert!(round_trip.is_err());

    let bytes = bincode::serialize(&types::Json::null()).unwrap();
    assert_eq!(bincode::deserialize::<types::Json>(&bytes).unwrap(), types::Json::null());
}
