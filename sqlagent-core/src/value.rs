//! Cell values returned by the database and their display-safe form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

/// A single cell as decoded from a driver row.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Decimal(Decimal),
    Bytes(Vec<u8>),
    Json(JsonValue),
    /// Anything the driver could only give us as text.
    Other(String),
}

impl SqlValue {
    /// Convert to a JSON-safe primitive.
    ///
    /// Temporal values become ISO-8601 strings, decimals become floats,
    /// bytes are decoded as UTF-8 with replacement characters.
    pub fn normalize(self) -> JsonValue {
        match self {
            SqlValue::Null => JsonValue::Null,
            SqlValue::Bool(b) => JsonValue::Bool(b),
            SqlValue::Int(i) => JsonValue::from(i),
            SqlValue::Float(f) => float_to_json(f),
            SqlValue::Text(s) | SqlValue::Other(s) => JsonValue::String(s),
            SqlValue::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
            SqlValue::Time(t) => JsonValue::String(t.format("%H:%M:%S%.f").to_string()),
            SqlValue::Timestamp(ts) => {
                JsonValue::String(ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            SqlValue::TimestampTz(ts) => JsonValue::String(ts.to_rfc3339()),
            SqlValue::Decimal(d) => d.to_f64().map(float_to_json).unwrap_or(JsonValue::Null),
            SqlValue::Bytes(bytes) => JsonValue::String(String::from_utf8_lossy(&bytes).into_owned()),
            SqlValue::Json(v) => v,
        }
    }
}

// NaN and infinities have no JSON form.
fn float_to_json(f: f64) -> JsonValue {
    serde_json::Number::from_f64(f)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

macro_rules! impl_from_for_sql_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    SqlValue::$variant(value.into())
                }
            }
        )*
    };
}

impl_from_for_sql_value!(
    bool => Bool,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    String => Text,
    &str => Text,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    DateTime<Utc> => TimestampTz,
    Decimal => Decimal,
    Vec<u8> => Bytes,
    JsonValue => Json,
);
