use serde::{Deserialize, Deserializer, Serializer};

use super::Kind;
use crate::driver::{self, DriverValue};
use crate::error::{Error, Result};

/// Boolean kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bool {}

impl Kind for Bool {
    type Value = bool;
    const NAME: &'static str = "Bool";

    fn parse(input: &str) -> Result<bool> {
        driver::parse_bool_literal(input)
            .ok_or_else(|| Error::parse(Self::NAME, input, "not a boolean literal"))
    }

    fn render(value: &bool) -> String {
        value.to_string()
    }

    fn encode<S>(value: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(*value)
    }

    fn decode<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        bool::deserialize(deserializer)
    }

    fn from_driver(value: DriverValue) -> Result<bool> {
        driver::to_bool(Self::NAME, value)
    }

    fn to_driver(value: &bool) -> DriverValue {
        DriverValue::Bool(*value)
    }
}
