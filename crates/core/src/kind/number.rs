use serde::{Deserialize, Deserializer, Serializer};

use super::Kind;
use crate::driver::{self, DriverValue};
use crate::error::{Error, Result};

macro_rules! integer_kind {
    ($(#[$doc:meta])* $kind:ident, $ty:ty, $name:literal, $serialize:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $kind {}

        impl Kind for $kind {
            type Value = $ty;
            const NAME: &'static str = $name;

            /// Parses as 64-bit, then truncates to the target width
            fn parse(input: &str) -> Result<$ty> {
                input
                    .parse::<i64>()
                    .map(|wide| wide as $ty)
                    .map_err(|e| Error::parse(Self::NAME, input, e))
            }

            fn render(value: &$ty) -> String {
                value.to_string()
            }

            fn encode<S>(value: &$ty, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.$serialize(*value)
            }

            fn decode<'de, D>(deserializer: D) -> std::result::Result<$ty, D::Error>
            where
                D: Deserializer<'de>,
            {
                <$ty>::deserialize(deserializer)
            }

            fn from_driver(value: DriverValue) -> Result<$ty> {
                driver::to_int::<$ty>(Self::NAME, value)
            }

            fn to_driver(value: &$ty) -> DriverValue {
                DriverValue::Int(i64::from(*value))
            }
        }
    };
}

integer_kind!(
    /// 16-bit integer kind
    Int16, i16, "Int16", serialize_i16
);
integer_kind!(
    /// 32-bit integer kind
    Int, i32, "Int", serialize_i32
);
integer_kind!(
    /// 64-bit integer kind
    Int64, i64, "Int64", serialize_i64
);

/// 64-bit float kind
///
/// Text rendering is for display: rounded to two decimals, shortest form,
/// decimal comma. It does not parse back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Float64 {}

impl Kind for Float64 {
    type Value = f64;
    const NAME: &'static str = "Float64";

    fn parse(input: &str) -> Result<f64> {
        input
            .parse::<f64>()
            .map_err(|e| Error::parse(Self::NAME, input, e))
    }

    fn render(value: &f64) -> String {
        display_decimal(*value).replacen('.', ",", 1)
    }

    fn encode<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !value.is_finite() {
            return Err(serde::ser::Error::custom(format!(
                "unsupported Float64 value: {}",
                display_decimal(*value)
            )));
        }
        serializer.serialize_f64(*value)
    }

    fn decode<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer)
    }

    fn from_driver(value: DriverValue) -> Result<f64> {
        driver::to_float(Self::NAME, value)
    }

    fn to_driver(value: &f64) -> DriverValue {
        DriverValue::Float(*value)
    }
}

/// Round to two decimals and print in the shortest general form
///
/// Switches to exponent notation (`1.5e+06`) when the decimal exponent is
/// below -4 or at least 6.
fn display_decimal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let rounded: f64 = format!("{value:.2}").parse().unwrap_or(value);
    let scientific = format!("{rounded:e}");
    let (mantissa, exp) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if rounded != 0.0 && (exp < -4 || exp >= 6) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    } else {
        rounded.to_string()
    }
}
