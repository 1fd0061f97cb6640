//! Dispatch by type name
//!
//! Generic callers (form or spreadsheet import, generated code) only know a
//! field's type by name. [`parse_from_string`] resolves the parser through a
//! static registry built on first use; [`is_empty_array`] answers the
//! "empty collection of wrappers" question for a value of unknown type.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{Error, Result};
use crate::kind::{self, Kind};
use crate::nullable::Nullable;

/// Namespace prefix accepted in front of a type name
pub const NAMESPACE_PREFIX: &str = "types.";

/// The supported wrapper types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// `Bool`
    Bool,
    /// `Date`
    Date,
    /// `Float64`
    Float64,
    /// `Int`
    Int,
    /// `Int16`
    Int16,
    /// `Int64`
    Int64,
    /// `JSON`
    Json,
    /// `RichText`
    RichText,
    /// `String`
    String,
    /// `Time`
    Time,
    /// `Timestamp`
    Timestamp,
    /// `UUID`
    Uuid,
}

type Parser = fn(&str) -> Result<AnyValue>;

impl TypeName {
    /// All type names, in table order
    pub const ALL: [TypeName; 12] = [
        TypeName::Bool,
        TypeName::Date,
        TypeName::Float64,
        TypeName::Int,
        TypeName::Int16,
        TypeName::Int64,
        TypeName::Json,
        TypeName::RichText,
        TypeName::String,
        TypeName::Time,
        TypeName::Timestamp,
        TypeName::Uuid,
    ];

    /// The exact dispatch string
    pub const fn name(&self) -> &'static str {
        match self {
            TypeName::Bool => kind::Bool::NAME,
            TypeName::Date => kind::Date::NAME,
            TypeName::Float64 => kind::Float64::NAME,
            TypeName::Int => kind::Int::NAME,
            TypeName::Int16 => kind::Int16::NAME,
            TypeName::Int64 => kind::Int64::NAME,
            TypeName::Json => kind::Json::NAME,
            TypeName::RichText => kind::RichText::NAME,
            TypeName::String => kind::String::NAME,
            TypeName::Time => kind::Time::NAME,
            TypeName::Timestamp => kind::Timestamp::NAME,
            TypeName::Uuid => kind::Uuid::NAME,
        }
    }

    /// Look up a name, with or without the namespace prefix
    pub fn from_name(name: &str) -> Option<Self> {
        let bare = name.strip_prefix(NAMESPACE_PREFIX).unwrap_or(name);
        REGISTRY.get(bare).map(|&(type_name, _)| type_name)
    }

    /// Parse text as this type
    pub fn parse(&self, value: &str) -> Result<AnyValue> {
        self.parser()(value)
    }

    fn parser(&self) -> Parser {
        match self {
            TypeName::Bool => |s| parse_as(s, AnyValue::Bool),
            TypeName::Date => |s| parse_as(s, AnyValue::Date),
            TypeName::Float64 => |s| parse_as(s, AnyValue::Float64),
            TypeName::Int => |s| parse_as(s, AnyValue::Int),
            TypeName::Int16 => |s| parse_as(s, AnyValue::Int16),
            TypeName::Int64 => |s| parse_as(s, AnyValue::Int64),
            TypeName::Json => |s| parse_as(s, AnyValue::Json),
            TypeName::RichText => |s| parse_as(s, AnyValue::RichText),
            TypeName::String => |s| parse_as(s, AnyValue::String),
            TypeName::Time => |s| parse_as(s, AnyValue::Time),
            TypeName::Timestamp => |s| parse_as(s, AnyValue::Timestamp),
            TypeName::Uuid => |s| parse_as(s, AnyValue::Uuid),
        }
    }
}

fn parse_as<K: Kind>(input: &str, wrap: fn(Nullable<K>) -> AnyValue) -> Result<AnyValue> {
    Nullable::<K>::parse(input).map(wrap)
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed wrapper of any supported type
#[derive(Debug, Clone, PartialEq)]
pub enum AnyValue {
    /// `Bool`
    Bool(Nullable<kind::Bool>),
    /// `Date`
    Date(Nullable<kind::Date>),
    /// `Float64`
    Float64(Nullable<kind::Float64>),
    /// `Int`
    Int(Nullable<kind::Int>),
    /// `Int16`
    Int16(Nullable<kind::Int16>),
    /// `Int64`
    Int64(Nullable<kind::Int64>),
    /// `JSON`
    Json(Nullable<kind::Json>),
    /// `RichText`
    RichText(Nullable<kind::RichText>),
    /// `String`
    String(Nullable<kind::String>),
    /// `Time`
    Time(Nullable<kind::Time>),
    /// `Timestamp`
    Timestamp(Nullable<kind::Timestamp>),
    /// `UUID`
    Uuid(Nullable<kind::Uuid>),
}

impl AnyValue {
    /// Which wrapper type this holds
    pub fn type_name(&self) -> TypeName {
        match self {
            AnyValue::Bool(_) => TypeName::Bool,
            AnyValue::Date(_) => TypeName::Date,
            AnyValue::Float64(_) => TypeName::Float64,
            AnyValue::Int(_) => TypeName::Int,
            AnyValue::Int16(_) => TypeName::Int16,
            AnyValue::Int64(_) => TypeName::Int64,
            AnyValue::Json(_) => TypeName::Json,
            AnyValue::RichText(_) => TypeName::RichText,
            AnyValue::String(_) => TypeName::String,
            AnyValue::Time(_) => TypeName::Time,
            AnyValue::Timestamp(_) => TypeName::Timestamp,
            AnyValue::Uuid(_) => TypeName::Uuid,
        }
    }

    /// Check if the held wrapper is nil
    pub fn is_nil(&self) -> bool {
        match self {
            AnyValue::Bool(v) => v.is_nil(),
            AnyValue::Date(v) => v.is_nil(),
            AnyValue::Float64(v) => v.is_nil(),
            AnyValue::Int(v) => v.is_nil(),
            AnyValue::Int16(v) => v.is_nil(),
            AnyValue::Int64(v) => v.is_nil(),
            AnyValue::Json(v) => v.is_nil(),
            AnyValue::RichText(v) => v.is_nil(),
            AnyValue::String(v) => v.is_nil(),
            AnyValue::Time(v) => v.is_nil(),
            AnyValue::Timestamp(v) => v.is_nil(),
            AnyValue::Uuid(v) => v.is_nil(),
        }
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyValue::Bool(v) => fmt::Display::fmt(v, f),
            AnyValue::Date(v) => fmt::Display::fmt(v, f),
            AnyValue::Float64(v) => fmt::Display::fmt(v, f),
            AnyValue::Int(v) => fmt::Display::fmt(v, f),
            AnyValue::Int16(v) => fmt::Display::fmt(v, f),
            AnyValue::Int64(v) => fmt::Display::fmt(v, f),
            AnyValue::Json(v) => fmt::Display::fmt(v, f),
            AnyValue::RichText(v) => fmt::Display::fmt(v, f),
            AnyValue::String(v) => fmt::Display::fmt(v, f),
            AnyValue::Time(v) => fmt::Display::fmt(v, f),
            AnyValue::Timestamp(v) => fmt::Display::fmt(v, f),
            AnyValue::Uuid(v) => fmt::Display::fmt(v, f),
        }
    }
}

static REGISTRY: Lazy<HashMap<&'static str, (TypeName, Parser)>> = Lazy::new(|| {
    TypeName::ALL
        .iter()
        .map(|t| (t.name(), (*t, t.parser())))
        .collect()
});

/// Parse `value` as the wrapper type named `type_name`
///
/// The name is matched exactly, after stripping an optional `types.` prefix.
pub fn parse_from_string(type_name: &str, value: &str) -> Result<AnyValue> {
    let bare = type_name.strip_prefix(NAMESPACE_PREFIX).unwrap_or(type_name);
    match REGISTRY.get(bare) {
        Some((_, parser)) => parser(value),
        None => {
            debug!(type_name, "unknown type name");
            Err(Error::UnknownType(type_name.to_string()))
        }
    }
}

/// Check if `value` is an empty `Vec` of one of the wrapper types
///
/// Any other type, including a non-empty vector, answers `false`.
pub fn is_empty_array(value: &dyn Any) -> bool {
    fn empty<K: Kind>(value: &dyn Any) -> Option<bool> {
        value.downcast_ref::<Vec<Nullable<K>>>().map(Vec::is_empty)
    }

    empty::<kind::Bool>(value)
        .or_else(|| empty::<kind::Date>(value))
        .or_else(|| empty::<kind::Float64>(value))
        .or_else(|| empty::<kind::Int>(value))
        .or_else(|| empty::<kind::Int16>(value))
        .or_else(|| empty::<kind::Int64>(value))
        .or_else(|| empty::<kind::Json>(value))
        .or_else(|| empty::<kind::RichText>(value))
        .or_else(|| empty::<kind::String>(value))
        .or_else(|| empty::<kind::Time>(value))
        .or_else(|| empty::<kind::Timestamp>(value))
        .or_else(|| empty::<kind::Uuid>(value))
        .unwrap_or(false)
}
