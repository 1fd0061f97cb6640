//! tristate - nullable scalar types that tell "absent" from "null"
//!
//! Every wrapper is one of three states: undefined (the producer never
//! addressed the field), explicitly null, or a present value. Partial-update
//! APIs use the difference to leave omitted fields alone while clearing the
//! ones sent as null.
//!
//! # Quick Start
//!
//! ```
//! use serde::Deserialize;
//! use tristate::types;
//!
//! #[derive(Deserialize)]
//! struct Person {
//!     #[serde(default, rename = "FirstName")]
//!     first_name: types::String,
//!     #[serde(default, rename = "LastName")]
//!     last_name: types::String,
//!     #[serde(default, rename = "Address")]
//!     address: types::String,
//! }
//!
//! let person: Person = serde_json::from_str(r#"{"FirstName":"John","LastName":null}"#).unwrap();
//! assert_eq!(person.first_name.value(), "John");
//! assert!(person.last_name.is_defined() && person.last_name.is_nil());
//! assert!(!person.address.is_defined());
//! ```
//!
//! # Architecture
//!
//! All wrappers are [`Nullable<K>`] for a marker kind `K` from [`kind`].
//! The kind supplies parsing, canonical rendering, the serde encoding and
//! the storage conversion. [`types`] names one alias per primitive.
//! Enable the `sqlite` feature for `rusqlite` column support.

// Re-export the public API from tristate-core
pub use tristate_core::*;
