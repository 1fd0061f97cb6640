//! SQLite bridge
//!
//! `ToSql` and `FromSql` for every wrapper, routed through [`DriverValue`].
//! SQLite has no native temporal or boolean storage: dates, times and
//! timestamps are written as their canonical text, booleans as integers.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use tracing::debug;

use crate::driver::{DriverValue, Scanner, Valuer};
use crate::kind::Kind;
use crate::nullable::Nullable;

impl From<DriverValue> for Value {
    fn from(value: DriverValue) -> Self {
        match value {
            DriverValue::Null => Value::Null,
            DriverValue::Bool(b) => Value::Integer(i64::from(b)),
            DriverValue::Int(i) => Value::Integer(i),
            DriverValue::Float(f) => Value::Real(f),
            DriverValue::Text(s) => Value::Text(s),
            DriverValue::Bytes(b) => Value::Blob(b),
            DriverValue::Date(d) => Value::Text(d.format("%Y-%m-%d").to_string()),
            DriverValue::Time(t) => Value::Text(t.format("%H:%M:%S").to_string()),
            DriverValue::Timestamp(ts) => {
                Value::Text(ts.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl From<ValueRef<'_>> for DriverValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => DriverValue::Null,
            ValueRef::Integer(i) => DriverValue::Int(i),
            ValueRef::Real(f) => DriverValue::Float(f),
            ValueRef::Text(t) => DriverValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => DriverValue::Bytes(b.to_vec()),
        }
    }
}

impl<K: Kind> ToSql for Nullable<K> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = self
            .to_driver()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        Ok(ToSqlOutput::Owned(value.into()))
    }
}

impl<K: Kind> FromSql for Nullable<K> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let mut wrapper = Nullable::undefined();
        wrapper.scan(DriverValue::from(value)).map_err(|e| {
            debug!(kind = K::NAME, error = %e, "column conversion failed");
            FromSqlError::Other(Box::new(e))
        })?;
        Ok(wrapper)
    }
}
