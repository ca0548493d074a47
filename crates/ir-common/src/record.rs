//! Installation record data.

use crate::columns::DisplayType;
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A single primitive cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// JSON `null`.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer or floating-point number.
    Number(Number),
    /// Free text.
    Text(String),
}

impl CellValue {
    /// Text shown in a table cell.
    ///
    /// Whole floats print without a fractional part so spreadsheet exports
    /// (`3.0`) read the same as integer input (`3`).
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(true) => "Yes".to_string(),
            CellValue::Bool(false) => "No".to_string(),
            CellValue::Number(n) => format_number(n),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Whether the value carries no information (null or whitespace text).
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Display classification used for column alignment.
    pub fn display_type(&self) -> DisplayType {
        match self {
            CellValue::Null => DisplayType::Empty,
            CellValue::Bool(_) => DisplayType::Boolean,
            CellValue::Number(_) => DisplayType::Number,
            CellValue::Text(_) => DisplayType::Text,
        }
    }

    fn from_json(key: &str, value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Null => Ok(CellValue::Null),
            Value::Bool(b) => Ok(CellValue::Bool(b)),
            Value::Number(n) => Ok(CellValue::Number(n)),
            Value::String(s) => Ok(CellValue::Text(s)),
            Value::Array(_) => Err(ModelError::UnsupportedValue {
                key: key.to_string(),
                kind: "array",
            }),
            Value::Object(_) => Err(ModelError::UnsupportedValue {
                key: key.to_string(),
                kind: "object",
            }),
        }
    }

    fn into_json(self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(b),
            CellValue::Number(n) => Value::Number(n),
            CellValue::Text(s) => Value::String(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(Number::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

fn format_number(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}

/// One installation row: ordered `(column, value)` pairs.
///
/// Keys keep the order they had in the stored JSON object; the first record's
/// key order decides the displayed columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct InstallationRecord {
    fields: Vec<(String, CellValue)>,
}

impl InstallationRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value; new keys go to the end.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up a value by column name.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Cell text for a column, empty when the key is absent.
    pub fn cell_text(&self, key: &str) -> String {
        self.get(key).map(CellValue::display_text).unwrap_or_default()
    }

    /// Column names in stored order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate `(column, value)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Map<String, Value>> for InstallationRecord {
    type Error = ModelError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut fields = Vec::with_capacity(map.len());
        for (key, value) in map {
            let cell = CellValue::from_json(&key, value)?;
            fields.push((key, cell));
        }
        Ok(Self { fields })
    }
}

impl From<InstallationRecord> for Map<String, Value> {
    fn from(record: InstallationRecord) -> Self {
        record
            .fields
            .into_iter()
            .map(|(k, v)| (k, v.into_json()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order_preserved_from_json() {
        let json = r#"{"Unit": "101", "Zeta": 1, "Alpha": "x", "Kitchen Aerator": 2}"#;
        let record: InstallationRecord = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["Unit", "Zeta", "Alpha", "Kitchen Aerator"]);
    }

    #[test]
    fn test_nested_values_rejected() {
        let json = r#"{"Unit": "101", "Notes": ["a", "b"]}"#;
        let err = serde_json::from_str::<InstallationRecord>(json).unwrap_err();
        assert!(err.to_string().contains("Notes"));
    }

    #[test]
    fn test_cell_text_absent_key_is_empty() {
        let record = InstallationRecord::new().with("Unit", "101");
        assert_eq!(record.cell_text("Unit"), "101");
        assert_eq!(record.cell_text("Showerhead"), "");
    }

    #[test]
    fn test_number_display() {
        let record: InstallationRecord =
            serde_json::from_str(r#"{"a": 3.0, "b": 2.5, "c": 0, "d": null, "e": true}"#).unwrap();
        assert_eq!(record.cell_text("a"), "3");
        assert_eq!(record.cell_text("b"), "2.5");
        assert_eq!(record.cell_text("c"), "0");
        assert_eq!(record.cell_text("d"), "");
        assert_eq!(record.cell_text("e"), "Yes");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = InstallationRecord::new().with("Unit", "101").with("Toilet", 1);
        record.insert("Unit", "102");
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["Unit", "Toilet"]);
        assert_eq!(record.cell_text("Unit"), "102");
    }

    #[test]
    fn test_serialize_keeps_order() {
        let record = InstallationRecord::new().with("B", "1").with("A", 2);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"B":"1","A":2}"#);
    }

    #[test]
    fn test_blank_detection() {
        assert!(CellValue::Null.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(!CellValue::from(0).is_blank());
        assert!(!CellValue::from(false).is_blank());
    }
}
