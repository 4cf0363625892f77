//! Raw field values and record access

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single raw field value read from an example
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Text(String),
    Missing,
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{}", s),
            Value::Missing => write!(f, "<missing>"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Opaque labeled example exposing its fields by name
pub trait Record: Sync {
    /// Returns the named field, or `None` when the record has no such field
    fn field(&self, name: &str) -> Option<Value>;
}

/// A materialized record, as produced by the tabular adapter
pub type Row = HashMap<String, Value>;

impl Record for HashMap<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Option<Value> {
        let v = self.as_object()?.get(name)?;
        Some(match v {
            serde_json::Value::Null => Value::Missing,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Missing),
            serde_json::Value::String(s) => Value::Text(s.clone()),
            // nested structures carry no scalar meaning
            _ => Value::Missing,
        })
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_field() {
        let mut row = Row::new();
        row.insert("height".to_string(), Value::Number(1.8));
        assert_eq!(row.field("height"), Some(Value::Number(1.8)));
        assert_eq!(row.field("weight"), None);
    }

    #[test]
    fn test_json_field() {
        let record = json!({ "a": 1.5, "b": true, "c": "Yes", "d": null, "e": [1, 2] });
        assert_eq!(record.field("a"), Some(Value::Number(1.5)));
        assert_eq!(record.field("b"), Some(Value::Bool(true)));
        assert_eq!(record.field("c"), Some(Value::Text("Yes".to_string())));
        assert_eq!(record.field("d"), Some(Value::Missing));
        assert_eq!(record.field("e"), Some(Value::Missing));
        assert_eq!(record.field("z"), None);
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Value::from("x").as_text(), Some("x"));
        assert!(Value::Missing.is_missing());
        assert_eq!(Value::Text("x".into()).as_f64(), None);
    }
}
