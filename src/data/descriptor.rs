//! Feature/label schema
//!
//! A [`Descriptor`] maps raw records onto numeric vectors. Text properties
//! encode to their index in a dictionary built by [`Descriptor::fit`];
//! decoding a raw prediction maps back into the property's native value.

use crate::data::value::{Record, Value};
use crate::error::{NumlError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Normalize free text the same way at training and evaluation time.
///
/// `.` and `-` survive so numeric-looking labels such as `1.5` and `-1`
/// stay distinct from `15` and `1`.
pub fn sanitize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '.' | '-'))
        .collect::<String>()
        .to_lowercase();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Encoding kind of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Plain numeric value
    Number,
    /// true → 1.0, false → 0.0
    Boolean,
    /// Index into a sorted dictionary of sanitized values
    Text { dictionary: Vec<String> },
}

/// A named field of the schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub kind: PropertyKind,
}

impl Property {
    pub fn number(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: PropertyKind::Number }
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: PropertyKind::Boolean }
    }

    /// Text property with an empty dictionary; fill it with [`Descriptor::fit`]
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Text { dictionary: Vec::new() },
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, PropertyKind::Text { .. })
    }

    /// Encode a raw value into its numeric code.
    /// Missing values encode to 0.0 (or -1.0 for text, which no dictionary entry uses).
    pub fn encode(&self, value: &Value) -> Result<f64> {
        match &self.kind {
            PropertyKind::Number => match value {
                Value::Number(v) => Ok(*v),
                Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
                Value::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                    NumlError::InvalidInput(format!("{}: '{}' is not numeric", self.name, s))
                }),
                Value::Missing => Ok(0.0),
            },
            PropertyKind::Boolean => Ok(match parse_bool(value) {
                Some(true) => 1.0,
                _ => 0.0,
            }),
            PropertyKind::Text { dictionary } => match value {
                Value::Missing => Ok(-1.0),
                other => {
                    let key = sanitize(&other.to_string());
                    Ok(dictionary
                        .binary_search(&key)
                        .map(|i| i as f64)
                        .unwrap_or(-1.0))
                }
            },
        }
    }

    /// Decode a raw model output back into the native representation
    pub fn decode(&self, raw: f64) -> Value {
        match &self.kind {
            PropertyKind::Number => Value::Number(raw),
            PropertyKind::Boolean if raw.is_nan() => Value::Missing,
            PropertyKind::Boolean => Value::Bool(raw >= 0.5),
            PropertyKind::Text { dictionary } => {
                if raw.is_nan() || raw < 0.0 {
                    return Value::Missing;
                }
                dictionary
                    .get(raw.round() as usize)
                    .map(|s| Value::Text(s.clone()))
                    .unwrap_or(Value::Missing)
            }
        }
    }

    /// Normalize a raw truth value so it compares equal to a decoded prediction
    pub fn normalize(&self, value: &Value) -> Value {
        match &self.kind {
            PropertyKind::Number => value.as_f64().map(Value::Number).unwrap_or_else(|| value.clone()),
            PropertyKind::Boolean => parse_bool(value).map(Value::Bool).unwrap_or(Value::Missing),
            PropertyKind::Text { .. } => match value {
                Value::Missing => Value::Missing,
                other => Value::Text(sanitize(&other.to_string())),
            },
        }
    }
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(v) => Some(*v != 0.0),
        Value::Text(s) => match sanitize(s).as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Missing => None,
    }
}

/// Schema of features and label used to convert records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    pub features: Vec<Property>,
    pub label: Option<Property>,
}

impl Descriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feature(mut self, property: Property) -> Self {
        self.features.push(property);
        self
    }

    pub fn with_label(mut self, property: Property) -> Self {
        self.label = Some(property);
        self
    }

    /// Number of feature columns produced by [`Descriptor::convert`]
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    pub fn label(&self) -> Result<&Property> {
        self.label
            .as_ref()
            .ok_or_else(|| NumlError::InvalidConfiguration("descriptor has no label".to_string()))
    }

    /// Returns a copy whose text dictionaries cover every value in `examples`
    pub fn fit<R: Record>(&self, examples: &[R]) -> Result<Descriptor> {
        let mut fitted = self.clone();
        let properties = fitted.features.iter_mut().chain(fitted.label.iter_mut());
        for property in properties {
            if let PropertyKind::Text { dictionary } = &mut property.kind {
                for example in examples {
                    match example.field(&property.name) {
                        Some(Value::Missing) => {}
                        Some(value) => dictionary.push(sanitize(&value.to_string())),
                        None => return Err(NumlError::MissingField(property.name.clone())),
                    }
                }
                dictionary.sort();
                dictionary.dedup();
            }
        }
        Ok(fitted)
    }

    /// Convert a single record; appends the label code when `include_label` is set
    pub fn convert_one<R: Record + ?Sized>(&self, example: &R, include_label: bool) -> Result<Array1<f64>> {
        let mut row = Vec::with_capacity(self.features.len() + include_label as usize);
        for property in &self.features {
            row.push(property.encode(&read(example, &property.name)?)?);
        }
        if include_label {
            let label = self.label()?;
            row.push(label.encode(&read(example, &label.name)?)?);
        }
        Ok(Array1::from_vec(row))
    }

    /// Convert every record into a design matrix and label vector
    pub fn convert<R: Record>(&self, examples: &[R]) -> Result<(Array2<f64>, Array1<f64>)> {
        let label = self.label()?;
        let n_cols = self.features.len();
        let mut data = Vec::with_capacity(examples.len() * n_cols);
        let mut labels = Vec::with_capacity(examples.len());
        for example in examples {
            let row = self.convert_one(example, false)?;
            data.extend(row.iter().copied());
            labels.push(label.encode(&read(example, &label.name)?)?);
        }
        let x = Array2::from_shape_vec((examples.len(), n_cols), data)?;
        Ok((x, Array1::from_vec(labels)))
    }
}

fn read<R: Record + ?Sized>(example: &R, name: &str) -> Result<Value> {
    example
        .field(name)
        .ok_or_else(|| NumlError::MissingField(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Row;

    fn row(height: f64, member: bool, color: &str, label: &str) -> Row {
        let mut r = Row::new();
        r.insert("height".into(), Value::Number(height));
        r.insert("member".into(), Value::Bool(member));
        r.insert("color".into(), Value::Text(color.into()));
        r.insert("class".into(), Value::Text(label.into()));
        r
    }

    fn descriptor() -> Descriptor {
        Descriptor::new()
            .with_feature(Property::number("height"))
            .with_feature(Property::boolean("member"))
            .with_feature(Property::text("color"))
            .with_label(Property::text("class"))
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("  Hello,   World! "), "hello world");
        assert_eq!(sanitize("YES"), "yes");
        assert_eq!(sanitize("-1.5 kg"), "-1.5 kg");
    }

    #[test]
    fn test_fit_builds_sorted_dictionary() {
        let examples = vec![row(1.0, true, "Red", "B"), row(2.0, false, "blue", "a"), row(3.0, true, "red!", "b")];
        let fitted = descriptor().fit(&examples).unwrap();
        match &fitted.features[2].kind {
            PropertyKind::Text { dictionary } => assert_eq!(dictionary, &vec!["blue".to_string(), "red".to_string()]),
            _ => panic!("expected text property"),
        }
        match &fitted.label().unwrap().kind {
            PropertyKind::Text { dictionary } => assert_eq!(dictionary, &vec!["a".to_string(), "b".to_string()]),
            _ => panic!("expected text label"),
        }
        let original = descriptor();
        assert_eq!(original.features[2].kind, PropertyKind::Text { dictionary: Vec::new() });
    }

    #[test]
    fn test_convert() {
        let examples = vec![row(1.0, true, "Red", "B"), row(2.0, false, "blue", "a")];
        let fitted = descriptor().fit(&examples).unwrap();
        let (x, y) = fitted.convert(&examples).unwrap();
        assert_eq!(x.dim(), (2, 3));
        assert_eq!(x.row(0).to_vec(), vec![1.0, 1.0, 1.0]);
        assert_eq!(x.row(1).to_vec(), vec![2.0, 0.0, 0.0]);
        assert_eq!(y.to_vec(), vec![1.0, 0.0]);

        let one = fitted.convert_one(&examples[0], true).unwrap();
        assert_eq!(one.to_vec(), vec![1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_missing_field() {
        let mut r = row(1.0, true, "red", "a");
        r.remove("height");
        let err = descriptor().convert_one(&r, false).unwrap_err();
        assert!(matches!(err, NumlError::MissingField(name) if name == "height"));
    }

    #[test]
    fn test_numeric_text_labels_stay_distinct() {
        let examples: Vec<Row> = ["1.5", "15", "-1", "1"]
            .iter()
            .map(|label| {
                let mut r = Row::new();
                r.insert("grade".to_string(), Value::Text(label.to_string()));
                r
            })
            .collect();
        let fitted = Descriptor::new()
            .with_label(Property::text("grade"))
            .fit(&examples)
            .unwrap();
        match &fitted.label().unwrap().kind {
            PropertyKind::Text { dictionary } => assert_eq!(dictionary, &["-1", "1", "1.5", "15"]),
            other => panic!("expected text label, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_and_normalize() {
        let examples = vec![row(1.0, true, "Red", "B"), row(2.0, false, "blue", "a")];
        let fitted = descriptor().fit(&examples).unwrap();
        let label = fitted.label().unwrap();
        assert_eq!(label.decode(1.0), Value::Text("b".into()));
        assert_eq!(label.decode(7.0), Value::Missing);
        assert_eq!(label.normalize(&Value::Text(" B ".into())), Value::Text("b".into()));

        let flag = Property::boolean("member");
        assert_eq!(flag.decode(0.7), Value::Bool(true));
        assert_eq!(flag.decode(f64::NAN), Value::Missing);
        assert_eq!(flag.normalize(&Value::Text("No".into())), Value::Bool(false));
        assert_eq!(Property::number("n").decode(2.5), Value::Number(2.5));
    }

    #[test]
    fn test_convert_requires_label() {
        let d = Descriptor::new().with_feature(Property::number("height"));
        let examples = vec![row(1.0, true, "red", "a")];
        assert!(matches!(d.convert(&examples), Err(NumlError::InvalidConfiguration(_))));
    }
}
