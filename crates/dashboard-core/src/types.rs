use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Raw content of one spreadsheet cell.
///
/// `Empty` and an absent key are equivalent: both read as null everywhere in
/// the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Empty text and zero read as falsy, matching how blank sheet cells
    /// behave in the Stock/Ticker identity check.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Number(v) => *v != 0.0,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Empty => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
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

/// One (entity, period) observation keyed by original header label.
/// Enrichment inserts derived keys; existing keys are never removed.
#[derive(Debug, Clone, Default)]
pub struct Row {
    values: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Cell lookup; `Empty` cells read as absent.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        match self.values.get(key) {
            Some(CellValue::Empty) | None => None,
            Some(v) => Some(v),
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_f64())
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    /// True when the cell exists and is truthy.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).map_or(false, |v| v.is_truthy())
    }
}

impl From<HashMap<String, CellValue>> for Row {
    fn from(values: HashMap<String, CellValue>) -> Self {
        Self { values }
    }
}
