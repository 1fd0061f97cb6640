//! The tri-state wrapper
//!
//! A [`Nullable<K>`] is in exactly one of three states:
//!
//! | State | `is_defined()` | `is_nil()` | Produced by |
//! |-------|----------------|------------|-------------|
//! | `Undefined` | false | true | `undefined()`, `Default`, an absent `#[serde(default)]` field |
//! | `Null` | true | true | `null()`, `from_option(None)`, empty text, a null node, a NULL column |
//! | `Present(v)` | true | false | `new(v)`, parsing, decoding, scanning |
//!
//! Decoding and scanning replace the whole state in one assignment.
//!
//! ## Optional fields
//!
//! Mark fields `#[serde(default)]` so an absent field decodes as `Undefined`.
//! Without it serde treats the wrapper like an `Option` and the field decodes
//! as `Null`. Add `skip_serializing_if = "Nullable::is_undefined"` to leave
//! undefined fields out of the output.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use tristate_core::types;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Patch {
//!     #[serde(default, skip_serializing_if = "types::String::is_undefined")]
//!     name: types::String,
//! }
//!
//! let patch: Patch = serde_json::from_str("{}").unwrap();
//! assert!(!patch.name.is_defined());
//! assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
//!
//! let patch: Patch = serde_json::from_str(r#"{"name":null}"#).unwrap();
//! assert!(patch.name.is_defined() && patch.name.is_nil());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::driver::{DriverValue, Scanner, Valuer};
use crate::error::{Error, Result};
use crate::kind::{Kind, TextKind};

/// A value that is undefined, explicitly null, or present
pub enum Nullable<K: Kind> {
    /// Never addressed by the producer
    Undefined,
    /// Explicitly null
    Null,
    /// Holds a value
    Present(K::Value),
}

impl<K: Kind> Nullable<K> {
    /// Wrap a value, canonicalising it for the kind
    pub fn new(value: K::Value) -> Self {
        Nullable::Present(K::normalize(value))
    }

    /// Wrap an optional value; `None` is an explicit null
    pub fn from_option(value: Option<K::Value>) -> Self {
        match value {
            Some(v) => Self::new(v),
            None => Nullable::Null,
        }
    }

    /// An undefined wrapper
    pub const fn undefined() -> Self {
        Nullable::Undefined
    }

    /// An explicitly null wrapper
    pub const fn null() -> Self {
        Nullable::Null
    }

    /// Check if the producer addressed this value at all
    pub fn is_defined(&self) -> bool {
        !matches!(self, Nullable::Undefined)
    }

    /// Check if this value was never addressed
    pub fn is_undefined(&self) -> bool {
        matches!(self, Nullable::Undefined)
    }

    /// Check if there is no usable value, whether undefined or null
    pub fn is_nil(&self) -> bool {
        !matches!(self, Nullable::Present(_))
    }

    /// Storage zero-value check, identical to [`is_nil`](Self::is_nil)
    pub fn is_zero(&self) -> bool {
        self.is_nil()
    }

    /// The underlying value, or the type's zero value when nil
    pub fn value(&self) -> K::Value {
        match self {
            Nullable::Present(v) => v.clone(),
            _ => K::Value::default(),
        }
    }

    /// Borrow the underlying value if present
    pub fn as_option(&self) -> Option<&K::Value> {
        match self {
            Nullable::Present(v) => Some(v),
            _ => None,
        }
    }

    /// Take the underlying value if present
    pub fn into_option(self) -> Option<K::Value> {
        match self {
            Nullable::Present(v) => Some(v),
            _ => None,
        }
    }

    /// A reference to this wrapper, or `None` when it is undefined
    ///
    /// An explicit null still yields a reference.
    pub fn ptr(&self) -> Option<&Self> {
        if self.is_defined() {
            Some(self)
        } else {
            None
        }
    }

    /// Dereference an optional wrapper; a missing one is undefined
    pub fn val(wrapper: Option<&Self>) -> Self {
        wrapper.cloned().unwrap_or(Nullable::Undefined)
    }

    /// Parse text
    ///
    /// The empty string is an explicit null. Anything else is trimmed and
    /// parsed by the kind's grammar.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Ok(Nullable::Null);
        }
        K::parse(input.trim()).map(Nullable::Present)
    }

    /// Parse optional text; `None` is an explicit null
    pub fn parse_opt(input: Option<&str>) -> Result<Self> {
        match input {
            Some(s) => Self::parse(s),
            None => Ok(Nullable::Null),
        }
    }
}

impl<K: TextKind> Nullable<K> {
    /// Lowercase the text, leaving nil wrappers untouched
    pub fn to_lowercase(self) -> Self {
        match self {
            Nullable::Present(s) => Nullable::Present(s.to_lowercase()),
            other => other,
        }
    }

    /// Lowercase every present element in place
    pub fn lowercase_all(items: &mut [Self]) {
        for item in items {
            if let Nullable::Present(s) = item {
                *s = s.to_lowercase();
            }
        }
    }
}

// ============================================================================
// Std traits
// ============================================================================

impl<K: Kind> Default for Nullable<K> {
    fn default() -> Self {
        Nullable::Undefined
    }
}

impl<K: Kind> Clone for Nullable<K> {
    fn clone(&self) -> Self {
        match self {
            Nullable::Undefined => Nullable::Undefined,
            Nullable::Null => Nullable::Null,
            Nullable::Present(v) => Nullable::Present(v.clone()),
        }
    }
}

impl<K: Kind> Copy for Nullable<K> where K::Value: Copy {}

impl<K: Kind> PartialEq for Nullable<K> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Nullable::Undefined, Nullable::Undefined) => true,
            (Nullable::Null, Nullable::Null) => true,
            (Nullable::Present(a), Nullable::Present(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Kind> Eq for Nullable<K> where K::Value: Eq {}

impl<K: Kind> Hash for Nullable<K>
where
    K::Value: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let Nullable::Present(v) = self {
            v.hash(state);
        }
    }
}

impl<K: Kind> fmt::Debug for Nullable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nullable::Undefined => write!(f, "{}::Undefined", K::NAME),
            Nullable::Null => write!(f, "{}::Null", K::NAME),
            Nullable::Present(v) => f.debug_tuple(K::NAME).field(v).finish(),
        }
    }
}

/// Canonical text, empty when nil
impl<K: Kind> fmt::Display for Nullable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nullable::Present(v) => f.write_str(&K::render(v)),
            _ => Ok(()),
        }
    }
}

impl<K: Kind> FromStr for Nullable<K> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<K: Kind> From<Option<K::Value>> for Nullable<K> {
    fn from(value: Option<K::Value>) -> Self {
        Self::from_option(value)
    }
}

// ============================================================================
// Structured encoding
// ============================================================================

struct Encoded<'a, K: Kind>(&'a K::Value);

impl<K: Kind> Serialize for Encoded<'_, K> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        K::encode(self.0, serializer)
    }
}

struct Decoded<K: Kind>(K::Value);

impl<'de, K: Kind> Deserialize<'de> for Decoded<K> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        K::decode(deserializer).map(Decoded)
    }
}

impl<K: Kind> Serialize for Nullable<K> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Nullable::Present(v) => serializer.serialize_some(&Encoded::<K>(v)),
            _ => serializer.serialize_none(),
        }
    }
}

/// A null node decodes as `Null`, anything else through the kind's rule
impl<'de, K: Kind> Deserialize<'de> for Nullable<K> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Decoded<K>>::deserialize(deserializer)? {
            Some(Decoded(v)) => Nullable::Present(v),
            None => Nullable::Null,
        })
    }
}

// ============================================================================
// Storage encoding
// ============================================================================

impl<K: Kind> Scanner for Nullable<K> {
    fn scan(&mut self, value: DriverValue) -> Result<()> {
        *self = match value {
            DriverValue::Null => Nullable::Null,
            other => Nullable::Present(K::from_driver(other)?),
        };
        Ok(())
    }
}

impl<K: Kind> Valuer for Nullable<K> {
    fn to_driver(&self) -> Result<DriverValue> {
        Ok(match self {
            Nullable::Present(v) => K::to_driver(v),
            _ => DriverValue::Null,
        })
    }
}
