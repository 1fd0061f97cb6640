//! Per-primitive policies for [`Nullable`](crate::Nullable)
//!
//! A [`Kind`] is an uninhabited marker type naming one primitive. It supplies
//! everything that differs between wrappers: the underlying Rust type, the text
//! grammar, the canonical rendering, the structured encoding, and the storage
//! conversion. The wrapper itself only implements the tri-state shell.
//!
//! | Kind | Underlying | Canonical text |
//! |------|------------|----------------|
//! | `Bool` | `bool` | `true` / `false` |
//! | `Int16` | `i16` | decimal |
//! | `Int` | `i32` | decimal |
//! | `Int64` | `i64` | decimal |
//! | `Float64` | `f64` | 2-decimal, comma separator |
//! | `String` | `String` | verbatim |
//! | `RichText` | `String` | markup, verbatim |
//! | `Date` | `NaiveDate` | `YYYY-MM-DD` |
//! | `Time` | `NaiveTime` | `HH:MM` |
//! | `Timestamp` | `DateTime<FixedOffset>` | `YYYY-MM-DDTHH:MM:SS±HH:MM` |
//! | `Json` | `Vec<u8>` | payload bytes |
//! | `Uuid` | `uuid::Uuid` | 36-char hyphenated |

use serde::{Deserializer, Serializer};
use std::fmt;

use crate::driver::DriverValue;
use crate::error::Result;

mod boolean;
mod identifier;
mod json;
mod number;
mod temporal;
mod text;

pub use boolean::Bool;
pub use identifier::Uuid;
pub use json::Json;
pub use number::{Float64, Int, Int16, Int64};
pub use temporal::{Date, Time, Timestamp};
pub use text::{RichText, String};

/// Policy for one primitive wrapped by [`Nullable`](crate::Nullable)
///
/// The text passed to [`Kind::parse`] is already trimmed. The empty string
/// never reaches it: the wrapper maps empty input to an explicit null.
pub trait Kind: 'static {
    /// The underlying value type
    type Value: Clone + Default + PartialEq + fmt::Debug + 'static;

    /// Type name as it appears in the dispatch table
    const NAME: &'static str;

    /// Canonicalise a value on explicit construction
    fn normalize(value: Self::Value) -> Self::Value {
        value
    }

    /// Parse trimmed text
    fn parse(input: &str) -> Result<Self::Value>;

    /// Render the canonical textual form
    fn render(value: &Self::Value) -> std::string::String;

    /// Emit the structured encoding of a present value
    fn encode<S>(value: &Self::Value, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer;

    /// Decode a present (non-null) structured value
    fn decode<'de, D>(deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>;

    /// Convert a non-null driver value
    fn from_driver(value: DriverValue) -> Result<Self::Value>;

    /// Representation handed to the storage driver
    fn to_driver(value: &Self::Value) -> DriverValue;
}

/// Kinds whose underlying value is plain text
///
/// These support lowercase normalisation.
pub trait TextKind: Kind<Value = std::string::String> {}
