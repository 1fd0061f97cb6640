use serde::{Deserialize, Deserializer, Serializer};

use super::Kind;
use crate::driver::{self, DriverValue};
use crate::error::{Error, Result};
use crate::nullable::Nullable;

/// Positions of the hyphens in the hyphenated form
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Unique identifier kind
///
/// Text parsing only accepts the 36-character hyphenated form. Structured
/// decoding and storage also accept the simple, braced and URN forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uuid {}

impl Kind for Uuid {
    type Value = uuid::Uuid;
    const NAME: &'static str = "UUID";

    fn parse(input: &str) -> Result<uuid::Uuid> {
        let bytes = input.as_bytes();
        if bytes.len() != 36 || HYPHENS.iter().any(|&i| bytes[i] != b'-') {
            return Err(Error::parse(
                Self::NAME,
                input,
                "expected xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx",
            ));
        }
        uuid::Uuid::parse_str(input).map_err(|e| Error::parse(Self::NAME, input, e))
    }

    fn render(value: &uuid::Uuid) -> String {
        value.hyphenated().to_string()
    }

    fn encode<S>(value: &uuid::Uuid, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&Self::render(value))
    }

    fn decode<'de, D>(deserializer: D) -> std::result::Result<uuid::Uuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        uuid::Uuid::parse_str(&raw).map_err(serde::de::Error::custom)
    }

    fn from_driver(value: DriverValue) -> Result<uuid::Uuid> {
        driver::to_uuid(Self::NAME, value)
    }

    /// Stored as its hyphenated text
    fn to_driver(value: &uuid::Uuid) -> DriverValue {
        DriverValue::Text(Self::render(value))
    }
}

impl Nullable<Uuid> {
    /// A fresh random (v4) identifier
    pub fn new_random() -> Self {
        Self::new(uuid::Uuid::new_v4())
    }

    /// Strictly parse every string
    ///
    /// For trusted input only.
    ///
    /// # Panics
    ///
    /// Panics if any entry is not a hyphenated identifier.
    pub fn from_strings<S: AsRef<str>>(strings: &[S]) -> Vec<Self> {
        strings
            .iter()
            .map(|s| match Uuid::parse(s.as_ref()) {
                Ok(id) => Self::new(id),
                Err(e) => panic!("from_strings: {e}"),
            })
            .collect()
    }

    /// Canonical text of every identifier, empty for nil entries
    pub fn to_strings(ids: &[Self]) -> Vec<String> {
        ids.iter().map(ToString::to_string).collect()
    }
}
