//! Storage-driver boundary
//!
//! [`DriverValue`] models what a relational driver hands over on the read path
//! and accepts on the write path. Wrappers implement [`Scanner`] and [`Valuer`]
//! against it; adapters for concrete drivers (see the `sqlite` feature) only
//! translate between their own value type and this one.
//!
//! ## Conversion table
//!
//! The `to_*` functions are the best-effort conversion routine used by the
//! read path. Anything not listed is an [`Error::Incompatible`].
//!
//! | Target | Accepted driver values |
//! |--------|------------------------|
//! | `bool` | `Bool`, `Int` 0/1, boolean literal `Text`/`Bytes` |
//! | integers | `Int` (range-checked), integral `Float`, decimal `Text`/`Bytes` |
//! | `f64` | `Float`, `Int`, decimal `Text`/`Bytes` |
//! | `String` | `Text`, UTF-8 `Bytes`, `Int`, `Float`, `Bool`, temporal values |
//! | `NaiveDate` | `Date`, `Timestamp`, `YYYY-MM-DD` text |
//! | `NaiveTime` | `Time`, `Timestamp`, `HH:MM` text |
//! | `DateTime` | `Timestamp`, RFC 3339 text |
//! | `Uuid` | `Text`, 16-byte or textual `Bytes` |

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::layout;

/// A value as exchanged with a storage driver
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    /// SQL NULL
    Null,
    /// Boolean column
    Bool(bool),
    /// Integer column, always widened to 64 bits
    Int(i64),
    /// Floating point column
    Float(f64),
    /// Text column
    Text(String),
    /// Binary column
    Bytes(Vec<u8>),
    /// Calendar date column
    Date(NaiveDate),
    /// Time-of-day column
    Time(NaiveTime),
    /// Timestamp column
    Timestamp(DateTime<FixedOffset>),
}

impl DriverValue {
    /// Get the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            DriverValue::Null => "null",
            DriverValue::Bool(_) => "bool",
            DriverValue::Int(_) => "int",
            DriverValue::Float(_) => "float",
            DriverValue::Text(_) => "text",
            DriverValue::Bytes(_) => "bytes",
            DriverValue::Date(_) => "date",
            DriverValue::Time(_) => "time",
            DriverValue::Timestamp(_) => "timestamp",
        }
    }

    /// Check if this is SQL NULL
    pub fn is_null(&self) -> bool {
        matches!(self, DriverValue::Null)
    }
}

impl From<bool> for DriverValue {
    fn from(b: bool) -> Self {
        DriverValue::Bool(b)
    }
}

impl From<i16> for DriverValue {
    fn from(i: i16) -> Self {
        DriverValue::Int(i64::from(i))
    }
}

impl From<i32> for DriverValue {
    fn from(i: i32) -> Self {
        DriverValue::Int(i64::from(i))
    }
}

impl From<i64> for DriverValue {
    fn from(i: i64) -> Self {
        DriverValue::Int(i)
    }
}

impl From<f64> for DriverValue {
    fn from(f: f64) -> Self {
        DriverValue::Float(f)
    }
}

impl From<&str> for DriverValue {
    fn from(s: &str) -> Self {
        DriverValue::Text(s.to_string())
    }
}

impl From<String> for DriverValue {
    fn from(s: String) -> Self {
        DriverValue::Text(s)
    }
}

impl From<Vec<u8>> for DriverValue {
    fn from(b: Vec<u8>) -> Self {
        DriverValue::Bytes(b)
    }
}

impl From<&[u8]> for DriverValue {
    fn from(b: &[u8]) -> Self {
        DriverValue::Bytes(b.to_vec())
    }
}

impl From<NaiveDate> for DriverValue {
    fn from(d: NaiveDate) -> Self {
        DriverValue::Date(d)
    }
}

impl From<NaiveTime> for DriverValue {
    fn from(t: NaiveTime) -> Self {
        DriverValue::Time(t)
    }
}

impl From<DateTime<FixedOffset>> for DriverValue {
    fn from(ts: DateTime<FixedOffset>) -> Self {
        DriverValue::Timestamp(ts)
    }
}

impl From<DateTime<Utc>> for DriverValue {
    fn from(ts: DateTime<Utc>) -> Self {
        DriverValue::Timestamp(ts.into())
    }
}

impl<T: Into<DriverValue>> From<Option<T>> for DriverValue {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(DriverValue::Null)
    }
}

/// Read path: assign a driver value to `self`
///
/// A `Null` driver value always succeeds. On error `self` is left unchanged.
pub trait Scanner {
    /// Overwrite `self` from a driver value
    fn scan(&mut self, value: DriverValue) -> Result<()>;
}

/// Write path: produce the driver representation of `self`
pub trait Valuer {
    /// Convert to a driver value
    fn to_driver(&self) -> Result<DriverValue>;
}

fn incompatible(kind: &'static str, value: &DriverValue) -> Error {
    debug!(kind, found = value.type_name(), "rejected driver value");
    Error::Incompatible {
        kind,
        found: value.type_name(),
    }
}

fn bytes_as_str<'a>(kind: &'static str, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| Error::parse(kind, &String::from_utf8_lossy(bytes), e))
}

/// Parse a standard boolean literal
pub(crate) fn parse_bool_literal(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Convert to `bool`
pub fn to_bool(kind: &'static str, value: DriverValue) -> Result<bool> {
    match value {
        DriverValue::Bool(b) => Ok(b),
        DriverValue::Int(1) => Ok(true),
        DriverValue::Int(0) => Ok(false),
        DriverValue::Int(i) => Err(Error::OutOfRange {
            kind,
            value: i.to_string(),
        }),
        DriverValue::Text(ref s) => {
            parse_bool_literal(s).ok_or_else(|| Error::parse(kind, s, "not a boolean literal"))
        }
        DriverValue::Bytes(ref b) => {
            let s = bytes_as_str(kind, b)?;
            parse_bool_literal(s).ok_or_else(|| Error::parse(kind, s, "not a boolean literal"))
        }
        other => Err(incompatible(kind, &other)),
    }
}

/// Convert to an integer of the target width
///
/// Unlike text parsing, a driver integer that does not fit is an error.
pub fn to_int<T>(kind: &'static str, value: DriverValue) -> Result<T>
where
    T: TryFrom<i64>,
{
    let wide = match value {
        DriverValue::Int(i) => i,
        DriverValue::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            // i64::MAX as f64 rounds up to 2^63, which does not fit
            if f < i64::MIN as f64 || f >= i64::MAX as f64 {
                return Err(Error::OutOfRange {
                    kind,
                    value: f.to_string(),
                });
            }
            f as i64
        }
        DriverValue::Float(f) => return Err(Error::parse(kind, &f.to_string(), "not an integer")),
        DriverValue::Text(ref s) => s.parse::<i64>().map_err(|e| Error::parse(kind, s, e))?,
        DriverValue::Bytes(ref b) => {
            let s = bytes_as_str(kind, b)?;
            s.parse::<i64>().map_err(|e| Error::parse(kind, s, e))?
        }
        other => return Err(incompatible(kind, &other)),
    };
    T::try_from(wide).map_err(|_| Error::OutOfRange {
        kind,
        value: wide.to_string(),
    })
}

/// Convert to `f64`
pub fn to_float(kind: &'static str, value: DriverValue) -> Result<f64> {
    match value {
        DriverValue::Float(f) => Ok(f),
        DriverValue::Int(i) => Ok(i as f64),
        DriverValue::Text(ref s) => s.parse::<f64>().map_err(|e| Error::parse(kind, s, e)),
        DriverValue::Bytes(ref b) => {
            let s = bytes_as_str(kind, b)?;
            s.parse::<f64>().map_err(|e| Error::parse(kind, s, e))
        }
        other => Err(incompatible(kind, &other)),
    }
}

/// Convert to `String`
pub fn to_text(kind: &'static str, value: DriverValue) -> Result<String> {
    match value {
        DriverValue::Text(s) => Ok(s),
        DriverValue::Bytes(b) => {
            String::from_utf8(b).map_err(|e| Error::parse(kind, &String::from_utf8_lossy(e.as_bytes()), e.utf8_error()))
        }
        DriverValue::Int(i) => Ok(i.to_string()),
        DriverValue::Float(f) => Ok(f.to_string()),
        DriverValue::Bool(b) => Ok(b.to_string()),
        DriverValue::Date(d) => Ok(d.format("%Y-%m-%d").to_string()),
        DriverValue::Time(t) => Ok(t.format("%H:%M:%S").to_string()),
        DriverValue::Timestamp(ts) => Ok(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        other => Err(incompatible(kind, &other)),
    }
}

/// Convert to a calendar date
pub fn to_date(kind: &'static str, value: DriverValue) -> Result<NaiveDate> {
    match value {
        DriverValue::Date(d) => Ok(d),
        DriverValue::Timestamp(ts) => Ok(ts.naive_local().date()),
        DriverValue::Text(ref s) => layout::parse_canonical_date(s),
        other => Err(incompatible(kind, &other)),
    }
}

/// Convert to a time of day
pub fn to_time(kind: &'static str, value: DriverValue) -> Result<NaiveTime> {
    match value {
        DriverValue::Time(t) => Ok(t),
        DriverValue::Timestamp(ts) => Ok(ts.naive_local().time()),
        DriverValue::Text(ref s) => layout::parse_time(s),
        other => Err(incompatible(kind, &other)),
    }
}

/// Convert to a timestamp
pub fn to_timestamp(kind: &'static str, value: DriverValue) -> Result<DateTime<FixedOffset>> {
    match value {
        DriverValue::Timestamp(ts) => Ok(ts),
        DriverValue::Text(ref s) => layout::parse_canonical_timestamp(s),
        other => Err(incompatible(kind, &other)),
    }
}

/// Convert to a UUID
pub fn to_uuid(kind: &'static str, value: DriverValue) -> Result<Uuid> {
    match value {
        DriverValue::Text(ref s) => Uuid::parse_str(s).map_err(|e| Error::parse(kind, s, e)),
        DriverValue::Bytes(ref b) if b.len() == 16 => {
            Uuid::from_slice(b).map_err(|e| Error::parse(kind, &String::from_utf8_lossy(b), e))
        }
        DriverValue::Bytes(ref b) => {
            let s = bytes_as_str(kind, b)?;
            Uuid::parse_str(s).map_err(|e| Error::parse(kind, s, e))
        }
        other => Err(incompatible(kind, &other)),
    }
}
