use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use tracing::debug;

use super::Kind;
use crate::driver::DriverValue;
use crate::error::{Error, Result};
use crate::nullable::Nullable;

/// The encoded null literal
const NULL: &[u8] = b"null";

/// Opaque JSON payload kind
///
/// The value is the encoded payload itself. Structured encoding embeds it
/// verbatim; text parsing wraps the input as a JSON string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Json {}

impl Kind for Json {
    type Value = Vec<u8>;
    const NAME: &'static str = "JSON";

    fn parse(input: &str) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(input)?)
    }

    fn render(value: &Vec<u8>) -> String {
        String::from_utf8_lossy(value).into_owned()
    }

    fn encode<S>(value: &Vec<u8>, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = std::str::from_utf8(value).map_err(serde::ser::Error::custom)?;
        let raw = RawValue::from_string(text.to_string()).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }

    fn decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(raw.get().as_bytes().to_vec())
    }

    /// Only binary driver values are accepted
    fn from_driver(value: DriverValue) -> Result<Vec<u8>> {
        match value {
            DriverValue::Bytes(bytes) => Ok(bytes),
            other => {
                debug!(found = other.type_name(), "rejected driver value for json");
                Err(Error::Incompatible {
                    kind: "json",
                    found: other.type_name(),
                })
            }
        }
    }

    fn to_driver(value: &Vec<u8>) -> DriverValue {
        DriverValue::Bytes(value.clone())
    }
}

impl Nullable<Json> {
    /// Encode `obj` as the payload
    ///
    /// An object that encodes to `null` leaves the wrapper explicitly null.
    pub fn marshal<T>(&mut self, obj: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(obj)?;
        *self = if bytes == NULL {
            Nullable::Null
        } else {
            Nullable::Present(bytes)
        };
        Ok(())
    }

    /// Build a wrapper from the encoding of `obj`
    pub fn from_serializable<T>(obj: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        let mut wrapper = Self::undefined();
        wrapper.marshal(obj)?;
        Ok(wrapper)
    }

    /// Decode the payload into `T`
    ///
    /// Returns `None` when nil.
    pub fn unmarshal<T>(&self) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.as_option() {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes)?)),
            None => Ok(None),
        }
    }
}
