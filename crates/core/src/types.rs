//! Named wrapper types
//!
//! One alias per supported primitive. These are the names generated models
//! use for their fields; the dispatch table uses the same names.

use crate::kind;
use crate::nullable::Nullable;

/// Tri-state boolean
pub type Bool = Nullable<kind::Bool>;

/// Tri-state 16-bit integer
pub type Int16 = Nullable<kind::Int16>;

/// Tri-state 32-bit integer
pub type Int = Nullable<kind::Int>;

/// Tri-state 64-bit integer
pub type Int64 = Nullable<kind::Int64>;

/// Tri-state 64-bit float
pub type Float64 = Nullable<kind::Float64>;

/// Tri-state plain string
pub type String = Nullable<kind::String>;

/// Tri-state HTML fragment with a plain-text projection
pub type RichText = Nullable<kind::RichText>;

/// Tri-state calendar date
pub type Date = Nullable<kind::Date>;

/// Tri-state time of day
pub type Time = Nullable<kind::Time>;

/// Tri-state timestamp with offset
pub type Timestamp = Nullable<kind::Timestamp>;

/// Tri-state JSON payload
pub type Json = Nullable<kind::Json>;

/// Tri-state unique identifier
pub type Uuid = Nullable<kind::Uuid>;
