//! Tri-state value wrappers
//!
//! This crate defines the types generated models use for their fields:
//! - Nullable<K>: undefined, explicitly null, or a value of kind K
//! - Kind: per-primitive policy (parsing, rendering, wire and storage encodings)
//! - types: one alias per primitive (Bool, Int, String, Timestamp, ...)
//! - DriverValue, Scanner, Valuer: the storage boundary
//! - Dispatch: parse a string into a wrapper chosen by type name
//! - Markup: plain-text projection of HTML fragments
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod kind;
pub mod layout;
pub mod markup;
pub mod nullable;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod types;

// Re-export commonly used types and traits
pub use dispatch::{is_empty_array, parse_from_string, AnyValue, TypeName};
pub use driver::{DriverValue, Scanner, Valuer};
pub use error::{Error, Result};
pub use kind::{Kind, TextKind};
pub use nullable::Nullable;
