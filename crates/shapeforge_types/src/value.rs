//! Dynamic values held by backing fields.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use thiserror::Error;

use crate::data_type::DataType;

/// A value stored in, or written to, a synthesized property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    String(String),
    Binary(Vec<u8>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Time(NaiveTime),
    Duration(chrono::Duration),
    List(Vec<Value>),
}

/// Text could not be parsed as the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot parse '{raw}' as {expected}")]
pub struct ValueParseError {
    pub expected: String,
    pub raw: String,
}

impl ValueParseError {
    pub(crate) fn new(expected: &DataType, raw: &str) -> Self {
        Self {
            expected: expected.to_string(),
            raw: raw.to_string(),
        }
    }
}

/// A value did not hold the variant a typed read asked for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Expected {expected} value, found {found}")]
pub struct ValueTypeError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl Value {
    /// Name of the variant, matching [`DataType::name`].
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int64(_) => "int64",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Binary(_) => "binary",
            Value::Date(_) => "date",
            Value::Timestamp(_) => "timestamp",
            Value::Time(_) => "time",
            Value::Duration(_) => "duration",
            Value::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// JSON rendering used by reporting surfaces.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Boolean(b) => Json::Bool(*b),
            Value::Int64(i) => Json::from(*i),
            Value::Float64(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            other => Json::String(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Int64(i) => write!(f, "{}", i),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
            Value::Binary(bytes) => {
                use base64::Engine as _;
                write!(f, "{}", base64::engine::general_purpose::STANDARD.encode(bytes))
            }
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%dT%H:%M:%S")),
            Value::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            Value::Duration(d) => write!(f, "{}s", d.num_seconds()),
            Value::List(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

macro_rules! value_conversions {
    ($($ty:ty => $variant:ident : $name:literal),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl TryFrom<&Value> for $ty {
                type Error = ValueTypeError;

                fn try_from(value: &Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::$variant(v) => Ok(v.clone()),
                        other => Err(ValueTypeError {
                            expected: $name,
                            found: other.kind_name(),
                        }),
                    }
                }
            }
        )*
    };
}

value_conversions! {
    bool => Boolean: "boolean",
    i64 => Int64: "int64",
    f64 => Float64: "float64",
    String => String: "string",
    Vec<u8> => Binary: "binary",
    NaiveDate => Date: "date",
    NaiveDateTime => Timestamp: "timestamp",
    NaiveTime => Time: "time",
    chrono::Duration => Duration: "duration",
    Vec<Value> => List: "list",
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}
