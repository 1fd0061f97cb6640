//! Date, time-of-day and timestamp kinds
//!
//! Text input goes through the flexible layout lists in [`crate::layout`];
//! structured decoding accepts only the canonical layout. Explicit
//! construction canonicalises the value the way a round trip through the
//! canonical layout would: time-of-day drops seconds, timestamps drop
//! sub-second precision and move to UTC.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, SubsecRound, TimeZone, Timelike,
    Utc,
};
use serde::{Deserialize, Deserializer, Serializer};

use super::Kind;
use crate::driver::{self, DriverValue};
use crate::error::Result;
use crate::layout;
use crate::nullable::Nullable;

fn decode_with<'de, D, T>(
    deserializer: D,
    parse: impl FnOnce(&str) -> Result<T>,
) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

// ============================================================================
// Date
// ============================================================================

/// Calendar date kind, canonical layout `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Date {}

impl Kind for Date {
    type Value = NaiveDate;
    const NAME: &'static str = "Date";

    fn parse(input: &str) -> Result<NaiveDate> {
        layout::parse_date(input)
    }

    fn render(value: &NaiveDate) -> String {
        value.format("%Y-%m-%d").to_string()
    }

    fn encode<S>(value: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&Self::render(value))
    }

    fn decode<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        decode_with(deserializer, layout::parse_canonical_date)
    }

    fn from_driver(value: DriverValue) -> Result<NaiveDate> {
        driver::to_date(Self::NAME, value)
    }

    fn to_driver(value: &NaiveDate) -> DriverValue {
        DriverValue::Date(*value)
    }
}

// ============================================================================
// Time
// ============================================================================

/// Time-of-day kind, canonical layout `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Time {}

impl Kind for Time {
    type Value = NaiveTime;
    const NAME: &'static str = "Time";

    fn normalize(value: NaiveTime) -> NaiveTime {
        NaiveTime::from_hms_opt(value.hour(), value.minute(), 0).unwrap_or(value)
    }

    fn parse(input: &str) -> Result<NaiveTime> {
        layout::parse_time(input)
    }

    fn render(value: &NaiveTime) -> String {
        value.format("%H:%M").to_string()
    }

    fn encode<S>(value: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&Self::render(value))
    }

    fn decode<'de, D>(deserializer: D) -> std::result::Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        decode_with(deserializer, layout::parse_time)
    }

    /// `HH:MM:SS` text is tried before the generic conversion
    fn from_driver(value: DriverValue) -> Result<NaiveTime> {
        if let DriverValue::Text(ref text) = value {
            if let Ok(time) = layout::parse_clock_seconds(text) {
                return Ok(time);
            }
        }
        driver::to_time(Self::NAME, value)
    }

    fn to_driver(value: &NaiveTime) -> DriverValue {
        DriverValue::Time(*value)
    }
}

// ============================================================================
// Timestamp
// ============================================================================

/// Timestamp kind, canonical layout `YYYY-MM-DDTHH:MM:SS±HH:MM`
///
/// Parsed and decoded values keep the offset they were written with;
/// constructed values are in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {}

impl Kind for Timestamp {
    type Value = DateTime<FixedOffset>;
    const NAME: &'static str = "Timestamp";

    fn normalize(value: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        value.with_timezone(&Utc).trunc_subsecs(0).into()
    }

    fn parse(input: &str) -> Result<DateTime<FixedOffset>> {
        layout::parse_timestamp(input)
    }

    fn render(value: &DateTime<FixedOffset>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn encode<S>(value: &DateTime<FixedOffset>, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&Self::render(value))
    }

    fn decode<'de, D>(deserializer: D) -> std::result::Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        decode_with(deserializer, layout::parse_canonical_timestamp)
    }

    fn from_driver(value: DriverValue) -> Result<DateTime<FixedOffset>> {
        driver::to_timestamp(Self::NAME, value)
    }

    fn to_driver(value: &DateTime<FixedOffset>) -> DriverValue {
        DriverValue::Timestamp(*value)
    }
}

impl Nullable<Timestamp> {
    /// Check if this instant is strictly after `other`
    pub fn after(&self, other: &Self) -> bool {
        self.value() > other.value()
    }

    /// Check if this instant is strictly before `other`
    pub fn before(&self, other: &Self) -> bool {
        self.value() < other.value()
    }

    /// Check if both denote the same instant, whatever their offsets
    pub fn equal(&self, other: &Self) -> bool {
        self.value() == other.value()
    }

    /// Whole minutes from this instant to `other`, truncated toward zero
    pub fn minutes_until(&self, other: &Self) -> i64 {
        (other.value() - self.value()).num_minutes()
    }

    /// Calendar date at this timestamp's own offset
    ///
    /// A nil timestamp projects to a nil date in the same state.
    pub fn date(&self) -> Nullable<super::Date> {
        match self {
            Nullable::Present(ts) => Nullable::new(ts.naive_local().date()),
            Nullable::Null => Nullable::null(),
            Nullable::Undefined => Nullable::undefined(),
        }
    }

    /// Same calendar date at 00:00:00 in `zone`
    pub fn start_of_day<Tz: TimeZone>(&self, zone: &Tz) -> Self {
        self.at_clock(zone, NaiveTime::default())
    }

    /// Same calendar date at 23:59:59 in `zone`
    pub fn end_of_day<Tz: TimeZone>(&self, zone: &Tz) -> Self {
        let clock = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default();
        self.at_clock(zone, clock)
    }

    fn at_clock<Tz: TimeZone>(&self, zone: &Tz, clock: NaiveTime) -> Self {
        let Nullable::Present(ts) = self else {
            return self.clone();
        };
        let naive = ts.naive_local().date().and_time(clock);
        // a clock time skipped by a transition in `zone` is read as UTC
        let instant = zone
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive));
        Nullable::new(instant.into())
    }
}
