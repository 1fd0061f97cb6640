//! Layout tables for temporal text
//!
//! Date and timestamp text is accepted in several regional layouts, tried in a
//! fixed order with the first match winning. Structured decoding and storage
//! text only accept the canonical layout of each type.
//!
//! The order of [`DATE_LAYOUTS`] matters: ambiguous numeric layouts with a
//! two-digit year come before the four-digit-year ones, so `01-02-06` is read
//! as `MM-DD-YY`.
//!
//! Matching is hand-written instead of `chrono`'s `parse_from_str`: two-digit
//! years pivot at 69 (`%y` pivots at 70) and two-digit fields must be
//! zero-padded (`%m` and `%d` accept a single digit).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tracing::trace;

use crate::error::{Error, Result};

/// Canonical date layout
pub const DATE: &str = "YYYY-MM-DD";

/// Canonical time-of-day layout
pub const TIME: &str = "HH:MM";

/// Canonical timestamp layout
pub const TIMESTAMP: &str = "YYYY-MM-DDTHH:MM:SS±HH:MM";

/// One field of a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    /// Four-digit year
    Year4,
    /// Two-digit year, pivoting at 69
    Year2,
    /// Two-digit month
    Month2,
    /// One- or two-digit month
    Month,
    /// Three-letter month name, case-insensitive
    MonthName,
    /// Two-digit day
    Day2,
    /// One- or two-digit day
    Day,
    /// One- or two-digit hour
    Hour,
    /// Two-digit minute
    Minute,
    /// Two-digit second with an optional fraction
    Second,
    /// `Z` or `±HH:MM`
    Zone,
    /// A literal byte
    Lit(u8),
}

use Field::*;

/// A named sequence of fields
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Layout {
    const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Layout { name, fields }
    }
}

const YMD: &[Field] = &[Year4, Lit(b'-'), Month2, Lit(b'-'), Day2];

/// Layouts accepted by date text parsing, in order
pub(crate) const DATE_LAYOUTS: &[Layout] = &[
    Layout::new("YYYY-MM-DD", YMD),
    Layout::new("MM-DD-YY", &[Month2, Lit(b'-'), Day2, Lit(b'-'), Year2]),
    Layout::new("DD-MM-YY", &[Day2, Lit(b'-'), Month2, Lit(b'-'), Year2]),
    Layout::new("YY-MM-DD", &[Year2, Lit(b'-'), Month2, Lit(b'-'), Day2]),
    Layout::new("MM-DD-YYYY", &[Month2, Lit(b'-'), Day2, Lit(b'-'), Year4]),
    Layout::new("DD-Mon-YYYY", &[Day2, Lit(b'-'), MonthName, Lit(b'-'), Year4]),
    Layout::new("DD-Mon-YY", &[Day2, Lit(b'-'), MonthName, Lit(b'-'), Year2]),
];

const CANONICAL_TIMESTAMP: &[Field] = &[
    Year4,
    Lit(b'-'),
    Month2,
    Lit(b'-'),
    Day2,
    Lit(b'T'),
    Hour,
    Lit(b':'),
    Minute,
    Lit(b':'),
    Second,
    Zone,
];

/// Layouts accepted by timestamp text parsing, in order
pub(crate) const TIMESTAMP_LAYOUTS: &[Layout] = &[
    Layout::new("YYYY-MM-DDTHH:MM:SS±HH:MM", CANONICAL_TIMESTAMP),
    Layout::new(
        "YYYY-MM-DD HH:MM:SS±HH:MM",
        &[Year4, Lit(b'-'), Month2, Lit(b'-'), Day2, Lit(b' '), Hour, Lit(b':'), Minute, Lit(b':'), Second, Zone],
    ),
    Layout::new(
        "YYYY-MM-DDTHH:MM:SSZ",
        &[Year4, Lit(b'-'), Month2, Lit(b'-'), Day2, Lit(b'T'), Hour, Lit(b':'), Minute, Lit(b':'), Second, Lit(b'Z')],
    ),
    Layout::new(
        "YYYY-MM-DD HH:MM:SSZ",
        &[Year4, Lit(b'-'), Month2, Lit(b'-'), Day2, Lit(b' '), Hour, Lit(b':'), Minute, Lit(b':'), Second, Lit(b'Z')],
    ),
    Layout::new(
        "YYYY-MM-DDTHH:MM:SS",
        &[Year4, Lit(b'-'), Month2, Lit(b'-'), Day2, Lit(b'T'), Hour, Lit(b':'), Minute, Lit(b':'), Second],
    ),
    Layout::new(
        "YYYY-MM-DD HH:MM:SS",
        &[Year4, Lit(b'-'), Month2, Lit(b'-'), Day2, Lit(b' '), Hour, Lit(b':'), Minute, Lit(b':'), Second],
    ),
    Layout::new(
        "YYYY-MM-DDTHH:MM",
        &[Year4, Lit(b'-'), Month2, Lit(b'-'), Day2, Lit(b'T'), Hour, Lit(b':'), Minute],
    ),
    Layout::new(
        "YYYY-MM-DD HH:MM",
        &[Year4, Lit(b'-'), Month2, Lit(b'-'), Day2, Lit(b' '), Hour, Lit(b':'), Minute],
    ),
    Layout::new("YYYY-MM-DD", YMD),
    Layout::new(
        "M/D/YY HH:MM",
        &[Month, Lit(b'/'), Day, Lit(b'/'), Year2, Lit(b' '), Hour, Lit(b':'), Minute],
    ),
    Layout::new(
        "M/D/YY HH:MM:SS",
        &[Month, Lit(b'/'), Day, Lit(b'/'), Year2, Lit(b' '), Hour, Lit(b':'), Minute, Lit(b':'), Second],
    ),
    Layout::new(
        "M/D/YYYY HH:MM",
        &[Month, Lit(b'/'), Day, Lit(b'/'), Year4, Lit(b' '), Hour, Lit(b':'), Minute],
    ),
    Layout::new(
        "M/D/YYYY HH:MM:SS",
        &[Month, Lit(b'/'), Day, Lit(b'/'), Year4, Lit(b' '), Hour, Lit(b':'), Minute, Lit(b':'), Second],
    ),
];

const CLOCK_MINUTES: &[Field] = &[Hour, Lit(b':'), Minute];
const CLOCK_SECONDS: &[Field] = &[Hour, Lit(b':'), Minute, Lit(b':'), Second];

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Components collected while matching a layout
#[derive(Debug, Default)]
struct Parts {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: u32,
    minute: u32,
    second: u32,
    nano: u32,
    offset: Option<i32>,
}

impl Parts {
    fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }

    fn time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_nano_opt(self.hour, self.minute, self.second, self.nano)
    }

    fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        let naive = NaiveDateTime::new(self.date()?, self.time()?);
        match self.offset {
            Some(secs) => FixedOffset::east_opt(secs)?.from_local_datetime(&naive).single(),
            None => Some(Utc.from_utc_datetime(&naive).into()),
        }
    }
}

/// Cursor over the input bytes
struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> Option<()> {
        if self.peek()? == byte {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }

    /// Read between `min` and `max` ASCII digits
    fn digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let start = self.pos;
        let mut value = 0u32;
        while self.pos - start < max {
            match self.peek() {
                Some(b) if b.is_ascii_digit() => {
                    value = value * 10 + u32::from(b - b'0');
                    self.pos += 1;
                }
                _ => break,
            }
        }
        if self.pos - start < min {
            return None;
        }
        Some(value)
    }

    fn month_name(&mut self) -> Option<u32> {
        let name = self.input.get(self.pos..self.pos + 3)?;
        let idx = MONTH_NAMES
            .iter()
            .position(|m| m.as_bytes().eq_ignore_ascii_case(name))?;
        self.pos += 3;
        Some(idx as u32 + 1)
    }

    /// Fraction after `.` or `,`, as nanoseconds
    fn fraction(&mut self) -> Option<u32> {
        match self.peek() {
            Some(b'.') | Some(b',') => {}
            _ => return Some(0),
        }
        self.pos += 1;
        let start = self.pos;
        let mut nanos = 0u32;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            if self.pos - start < 9 {
                nanos = nanos * 10 + u32::from(b - b'0');
            }
            self.pos += 1;
        }
        let len = self.pos - start;
        if len == 0 {
            return None;
        }
        for _ in len..9 {
            nanos *= 10;
        }
        Some(nanos)
    }

    fn zone(&mut self) -> Option<i32> {
        let sign = match self.peek()? {
            b'Z' => {
                self.pos += 1;
                return Some(0);
            }
            b'+' => 1,
            b'-' => -1,
            _ => return None,
        };
        self.pos += 1;
        let hours = self.digits(2, 2)?;
        self.eat(b':')?;
        let minutes = self.digits(2, 2)?;
        if hours > 23 || minutes > 59 {
            return None;
        }
        Some(sign * (hours * 3600 + minutes * 60) as i32)
    }

    fn done(&self) -> bool {
        self.pos == self.input.len()
    }
}

fn match_fields(input: &str, fields: &[Field]) -> Option<Parts> {
    let mut cur = Cursor::new(input);
    let mut parts = Parts::default();
    for field in fields {
        match *field {
            Year4 => parts.year = Some(cur.digits(4, 4)? as i32),
            Year2 => {
                let yy = cur.digits(2, 2)? as i32;
                parts.year = Some(if yy >= 69 { 1900 + yy } else { 2000 + yy });
            }
            Month2 => parts.month = Some(cur.digits(2, 2)?),
            Month => parts.month = Some(cur.digits(1, 2)?),
            MonthName => parts.month = Some(cur.month_name()?),
            Day2 => parts.day = Some(cur.digits(2, 2)?),
            Day => parts.day = Some(cur.digits(1, 2)?),
            Hour => {
                parts.hour = cur.digits(1, 2)?;
                if parts.hour > 23 {
                    return None;
                }
            }
            Minute => parts.minute = cur.digits(2, 2)?,
            Second => {
                parts.second = cur.digits(2, 2)?;
                parts.nano = cur.fraction()?;
            }
            Zone => parts.offset = Some(cur.zone()?),
            Lit(b) => cur.eat(b)?,
        }
    }
    cur.done().then_some(parts)
}

fn first_match<T>(
    input: &str,
    layouts: &[Layout],
    build: impl Fn(&Parts) -> Option<T>,
) -> Option<T> {
    layouts.iter().enumerate().find_map(|(idx, layout)| {
        let value = match_fields(input, layout.fields).and_then(|p| build(&p))?;
        trace!(layout = layout.name, candidate = idx, "matched layout");
        Some(value)
    })
}

/// Parse date text against every accepted layout
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    first_match(input, DATE_LAYOUTS, Parts::date).ok_or_else(|| Error::layout("Date", input, DATE))
}

/// Parse date text in the canonical layout only
pub fn parse_canonical_date(input: &str) -> Result<NaiveDate> {
    match_fields(input, YMD)
        .and_then(|p| p.date())
        .ok_or_else(|| Error::layout("Date", input, DATE))
}

/// Parse `HH:MM` time text
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    match_fields(input, CLOCK_MINUTES)
        .and_then(|p| p.time())
        .ok_or_else(|| Error::layout("Time", input, TIME))
}

/// Parse `HH:MM:SS` time text, as some drivers report time-of-day columns
pub fn parse_clock_seconds(input: &str) -> Result<NaiveTime> {
    match_fields(input, CLOCK_SECONDS)
        .and_then(|p| p.time())
        .ok_or_else(|| Error::layout("Time", input, "HH:MM:SS"))
}

/// Parse timestamp text against every accepted layout
///
/// Layouts without a zone are read as UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<FixedOffset>> {
    first_match(input, TIMESTAMP_LAYOUTS, Parts::timestamp)
        .ok_or_else(|| Error::layout("Timestamp", input, TIMESTAMP))
}

/// Parse timestamp text in the canonical layout only
pub fn parse_canonical_timestamp(input: &str) -> Result<DateTime<FixedOffset>> {
    match_fields(input, CANONICAL_TIMESTAMP)
        .and_then(|p| p.timestamp())
        .ok_or_else(|| Error::layout("Timestamp", input, TIMESTAMP))
}
