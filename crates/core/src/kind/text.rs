use serde::{Deserialize, Deserializer, Serialize, Serializer};

use self::wire::{RichTextIn, RichTextOut};

use super::{Kind, TextKind};
use crate::driver::{self, DriverValue};
use crate::error::Result;
use crate::markup;
use crate::nullable::Nullable;

/// Plain string kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum String {}

impl Kind for String {
    type Value = std::string::String;
    const NAME: &'static str = "String";

    fn parse(input: &str) -> Result<std::string::String> {
        Ok(input.to_string())
    }

    fn render(value: &std::string::String) -> std::string::String {
        value.clone()
    }

    fn encode<S>(value: &std::string::String, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    /// Surrounding whitespace is trimmed
    fn decode<'de, D>(deserializer: D) -> std::result::Result<std::string::String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = std::string::String::deserialize(deserializer)?;
        Ok(raw.trim().to_string())
    }

    fn from_driver(value: DriverValue) -> Result<std::string::String> {
        driver::to_text(Self::NAME, value)
    }

    fn to_driver(value: &std::string::String) -> DriverValue {
        DriverValue::Text(value.clone())
    }
}

impl TextKind for String {}

/// Rich text kind: an HTML fragment
///
/// Structured encoding is an object carrying the markup and its plain-text
/// projection, `{"content": ..., "text": ...}`. Only `content` is read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RichText {}

mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize)]
    pub(super) struct RichTextOut<'a> {
        pub content: &'a str,
        pub text: String,
    }

    /// Only `content` is read; the projection is derived again on encode
    #[derive(Deserialize)]
    pub(super) struct RichTextIn {
        #[serde(default)]
        pub content: String,
    }
}

impl Kind for RichText {
    type Value = std::string::String;
    const NAME: &'static str = "RichText";

    fn parse(input: &str) -> Result<std::string::String> {
        Ok(input.to_string())
    }

    fn render(value: &std::string::String) -> std::string::String {
        value.clone()
    }

    fn encode<S>(value: &std::string::String, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = markup::to_plain_text(value).map_err(serde::ser::Error::custom)?;
        RichTextOut {
            content: value,
            text,
        }
        .serialize(serializer)
    }

    fn decode<'de, D>(deserializer: D) -> std::result::Result<std::string::String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = if deserializer.is_human_readable() {
            RichTextIn::deserialize(deserializer)?.content
        } else {
            // field order as written by `encode`
            let (content, _projection) =
                <(std::string::String, std::string::String)>::deserialize(deserializer)?;
            content
        };
        Ok(content.trim().to_string())
    }

    fn from_driver(value: DriverValue) -> Result<std::string::String> {
        driver::to_text(Self::NAME, value)
    }

    fn to_driver(value: &std::string::String) -> DriverValue {
        DriverValue::Text(value.clone())
    }
}

impl TextKind for RichText {}

impl Nullable<RichText> {
    /// Plain-text projection of the markup
    ///
    /// Empty when nil.
    pub fn text(&self) -> Result<std::string::String> {
        match self.as_option() {
            Some(content) => markup::to_plain_text(content),
            None => Ok(std::string::String::new()),
        }
    }
}
