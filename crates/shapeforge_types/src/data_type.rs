//! Semantic property types.
//!
//! A [`DataType`] names the kind of value a synthesized property stores.
//! Primitives serialize as a lowercase string (`"int64"`); composite types use
//! an object form (`{"kind": "list", "item": "string"}`).

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value::{Value, ValueParseError};

/// Canonical semantic type of a schema property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// The absence of a type. Never representable as a backing field.
    Null,

    /// true/false
    Boolean,

    /// 64-bit signed integer
    Int64,

    /// 64-bit floating point
    Float64,

    /// UTF-8 string
    #[default]
    String,

    /// Raw bytes (base64 in text form)
    Binary,

    /// Calendar date without time
    Date,

    /// Timestamp without timezone
    Timestamp,

    /// Time of day
    Time,

    /// Signed duration
    Duration,

    /// Homogeneous list of a single item type
    List { item: Box<DataType> },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataTypeRepr {
    Name(String),
    Object(DataTypeObject),
}

#[derive(Debug, Deserialize)]
struct DataTypeObject {
    kind: String,
    #[serde(default)]
    item: Option<Box<DataType>>,
}

impl Serialize for DataType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DataType::List { item } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("kind", "list")?;
                map.serialize_entry("item", item)?;
                map.end()
            }
            primitive => serializer.serialize_str(primitive.name()),
        }
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match DataTypeRepr::deserialize(deserializer)? {
            DataTypeRepr::Name(raw) => DataType::from_str(&raw).map_err(de::Error::custom),
            DataTypeRepr::Object(obj) => DataType::from_object(obj).map_err(de::Error::custom),
        }
    }
}

impl DataType {
    /// Shorthand for a list of `item`.
    pub fn list(item: DataType) -> Self {
        DataType::List {
            item: Box::new(item),
        }
    }

    /// Canonical lowercase name. Lists report `"list"`; use `Display` for the
    /// full `list<item>` form.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Null => "null",
            DataType::Boolean => "boolean",
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::String => "string",
            DataType::Binary => "binary",
            DataType::Date => "date",
            DataType::Timestamp => "timestamp",
            DataType::Time => "time",
            DataType::Duration => "duration",
            DataType::List { .. } => "list",
        }
    }

    /// Returns all primitive data types.
    pub fn primitives() -> Vec<DataType> {
        vec![
            DataType::Null,
            DataType::Boolean,
            DataType::Int64,
            DataType::Float64,
            DataType::String,
            DataType::Binary,
            DataType::Date,
            DataType::Timestamp,
            DataType::Time,
            DataType::Duration,
        ]
    }

    /// Whether a backing field can be declared with this type.
    ///
    /// `Null` has no storage representation, and a list is only as
    /// representable as its item type.
    pub fn is_field_representable(&self) -> bool {
        match self {
            DataType::Null => false,
            DataType::List { item } => item.is_field_representable(),
            _ => true,
        }
    }

    /// Zero value a freshly created backing field holds.
    pub fn default_value(&self) -> Value {
        match self {
            DataType::Null => Value::Null,
            DataType::Boolean => Value::Boolean(false),
            DataType::Int64 => Value::Int64(0),
            DataType::Float64 => Value::Float64(0.0),
            DataType::String => Value::String(String::new()),
            DataType::Binary => Value::Binary(Vec::new()),
            DataType::Date => Value::Date(chrono::NaiveDate::default()),
            DataType::Timestamp => Value::Timestamp(chrono::NaiveDateTime::default()),
            DataType::Time => Value::Time(chrono::NaiveTime::default()),
            DataType::Duration => Value::Duration(chrono::Duration::zero()),
            DataType::List { .. } => Value::List(Vec::new()),
        }
    }

    /// Check whether `value` may be stored in a field of this type.
    ///
    /// `Value::Null` is never accepted: every field holds a value of its type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (DataType::Boolean, Value::Boolean(_))
            | (DataType::Int64, Value::Int64(_))
            | (DataType::Float64, Value::Float64(_))
            | (DataType::String, Value::String(_))
            | (DataType::Binary, Value::Binary(_))
            | (DataType::Date, Value::Date(_))
            | (DataType::Timestamp, Value::Timestamp(_))
            | (DataType::Time, Value::Time(_))
            | (DataType::Duration, Value::Duration(_)) => true,
            (DataType::List { item }, Value::List(values)) => {
                values.iter().all(|v| item.accepts(v))
            }
            _ => false,
        }
    }

    /// Parse text into a value of this type.
    pub fn parse_value(&self, raw: &str) -> Result<Value, ValueParseError> {
        let invalid = || ValueParseError::new(self, raw);
        let trimmed = raw.trim();

        match self {
            DataType::Null => Err(invalid()),
            DataType::Boolean => match trimmed.to_lowercase().as_str() {
                "true" | "1" | "yes" | "t" => Ok(Value::Boolean(true)),
                "false" | "0" | "no" | "f" => Ok(Value::Boolean(false)),
                _ => Err(invalid()),
            },
            DataType::Int64 => trimmed.parse().map(Value::Int64).map_err(|_| invalid()),
            DataType::Float64 => trimmed.parse().map(Value::Float64).map_err(|_| invalid()),
            DataType::String => Ok(Value::String(raw.to_string())),
            DataType::Binary => {
                use base64::Engine as _;
                base64::engine::general_purpose::STANDARD
                    .decode(trimmed)
                    .map(Value::Binary)
                    .map_err(|_| invalid())
            }
            DataType::Date => chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|_| invalid()),
            DataType::Timestamp => chrono::DateTime::parse_from_rfc3339(trimmed)
                .map(|dt| dt.naive_utc())
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S"))
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
                .map(Value::Timestamp)
                .map_err(|_| invalid()),
            DataType::Time => chrono::NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
                .or_else(|_| chrono::NaiveTime::parse_from_str(trimmed, "%H:%M"))
                .map(Value::Time)
                .map_err(|_| invalid()),
            DataType::Duration => parse_duration(trimmed)
                .map(Value::Duration)
                .ok_or_else(invalid),
            DataType::List { item } => {
                let parsed: serde_json::Value =
                    serde_json::from_str(trimmed).map_err(|_| invalid())?;
                let elements = parsed.as_array().ok_or_else(invalid)?;
                elements
                    .iter()
                    .map(|elem| match elem {
                        serde_json::Value::String(s) => item.parse_value(s),
                        other => item.parse_value(&other.to_string()),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List)
            }
        }
    }

    fn from_object(obj: DataTypeObject) -> Result<Self, String> {
        match obj.kind.to_lowercase().as_str() {
            "list" => {
                let item = obj.item.ok_or_else(|| "list.item is required".to_string())?;
                Ok(DataType::List { item })
            }
            other if obj.item.is_some() => Err(format!(
                "Invalid data type: kind '{}' does not take an item type",
                other
            )),
            other => DataType::from_str(other),
        }
    }
}

/// Parse `3600`, `90s`, `1h30m`, or `PT1H30M` style durations.
///
/// Returns `None` for malformed input and for amounts outside the range
/// `chrono::Duration` can hold.
fn parse_duration(raw: &str) -> Option<chrono::Duration> {
    if let Ok(secs) = raw.parse::<i64>() {
        return chrono::Duration::try_seconds(secs);
    }

    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let body = rest
        .strip_prefix("PT")
        .or_else(|| rest.strip_prefix("pt"))
        .unwrap_or(rest);
    if body.is_empty() {
        return None;
    }

    let mut total = chrono::Duration::zero();
    let mut digits = String::new();
    for ch in body.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let amount: i64 = digits.parse().ok()?;
        digits.clear();
        let part = match ch.to_ascii_lowercase() {
            'h' => chrono::Duration::try_hours(amount)?,
            'm' => chrono::Duration::try_minutes(amount)?,
            's' => chrono::Duration::try_seconds(amount)?,
            _ => return None,
        };
        total = total.checked_add(&part)?;
    }
    if !digits.is_empty() {
        return None;
    }

    Some(if negative { -total } else { total })
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::List { item } => write!(f, "list<{}>", item),
            primitive => write!(f, "{}", primitive.name()),
        }
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "null" => Ok(DataType::Null),
            "boolean" | "bool" => Ok(DataType::Boolean),
            "int64" | "integer" | "int" | "long" => Ok(DataType::Int64),
            "float64" | "float" | "double" => Ok(DataType::Float64),
            "string" | "str" | "utf8" | "text" => Ok(DataType::String),
            "binary" | "bytes" => Ok(DataType::Binary),
            "date" => Ok(DataType::Date),
            "timestamp" | "datetime" => Ok(DataType::Timestamp),
            "time" => Ok(DataType::Time),
            "duration" | "interval" => Ok(DataType::Duration),
            _ => Err(format!(
                "Invalid data type: '{}'. Expected: null, boolean, int64, float64, string, binary, date, timestamp, time, duration. Use object format for list.",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("integer".parse::<DataType>().unwrap(), DataType::Int64);
        assert_eq!("Text".parse::<DataType>().unwrap(), DataType::String);
        assert_eq!("datetime".parse::<DataType>().unwrap(), DataType::Timestamp);
        assert!("decimal".parse::<DataType>().is_err());
    }

    #[test]
    fn test_serde_primitive_and_list() {
        let json = serde_json::to_string(&DataType::Int64).unwrap();
        assert_eq!(json, "\"int64\"");

        let list = DataType::list(DataType::String);
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"{"kind":"list","item":"string"}"#);
        let back: DataType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);

        let legacy: DataType = serde_json::from_str(r#"{"kind":"bool"}"#).unwrap();
        assert_eq!(legacy, DataType::Boolean);
        assert!(serde_json::from_str::<DataType>(r#"{"kind":"list"}"#).is_err());
    }

    #[test]
    fn test_item_only_allowed_on_list() {
        let err = serde_json::from_str::<DataType>(r#"{"kind":"int64","item":"string"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("does not take an item type"));
        assert!(serde_json::from_str::<DataType>(r#"{"kind":"int64"}"#).is_ok());
    }

    #[test]
    fn test_field_representable() {
        assert!(DataType::String.is_field_representable());
        assert!(!DataType::Null.is_field_representable());
        assert!(DataType::list(DataType::Int64).is_field_representable());
        assert!(!DataType::list(DataType::Null).is_field_representable());
    }

    #[test]
    fn test_default_values_are_accepted() {
        for ty in DataType::primitives()
            .into_iter()
            .chain([DataType::list(DataType::Date)])
            .filter(DataType::is_field_representable)
        {
            assert!(ty.accepts(&ty.default_value()), "{} rejects its default", ty);
        }
        assert!(!DataType::Null.accepts(&Value::Null));
    }

    #[test]
    fn test_accepts_checks_list_items() {
        let ty = DataType::list(DataType::Int64);
        assert!(ty.accepts(&Value::List(vec![Value::Int64(1), Value::Int64(2)])));
        assert!(!ty.accepts(&Value::List(vec![Value::Int64(1), Value::from("x")])));
        assert!(!DataType::Int64.accepts(&Value::Float64(1.0)));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(DataType::Int64.parse_value(" 42 ").unwrap(), Value::Int64(42));
        assert_eq!(DataType::Boolean.parse_value("yes").unwrap(), Value::Boolean(true));
        assert_eq!(
            DataType::Binary.parse_value("aGk=").unwrap(),
            Value::Binary(b"hi".to_vec())
        );
        assert_eq!(
            DataType::list(DataType::String)
                .parse_value(r#"["a", "b"]"#)
                .unwrap(),
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
        assert_eq!(
            DataType::list(DataType::Int64).parse_value("[1, 2]").unwrap(),
            Value::List(vec![Value::Int64(1), Value::Int64(2)])
        );
        assert!(DataType::Int64.parse_value("forty").is_err());
        assert!(DataType::Null.parse_value("").is_err());
    }

    #[test]
    fn test_parse_duration_forms() {
        assert_eq!(parse_duration("90"), Some(chrono::Duration::seconds(90)));
        assert_eq!(
            parse_duration("1h30m"),
            Some(chrono::Duration::minutes(90))
        );
        assert_eq!(
            parse_duration("PT2M5S"),
            Some(chrono::Duration::seconds(125))
        );
        assert_eq!(parse_duration("-10s"), Some(chrono::Duration::seconds(-10)));
        assert_eq!(parse_duration("10x"), None);
        assert_eq!(parse_duration("5h3"), None);
    }

    #[test]
    fn test_parse_duration_out_of_range() {
        assert_eq!(parse_duration("99999999999999h"), None);
        assert_eq!(parse_duration("9223372036854775807"), None);
        assert_eq!(parse_duration("PT999999999999999M"), None);
        assert_eq!(
            parse_duration("9000000000000000s9000000000000000s"),
            None
        );

        let err = DataType::Duration.parse_value("99999999999999h").unwrap_err();
        assert_eq!(err.raw, "99999999999999h");
        assert_eq!(err.expected, "duration");
    }
}
