//! Row access used for persistence
//!
//! The storage layer hands the location a row with typed get/update by
//! column name. Transactions, connections and schema live outside this crate;
//! [`MemoryRow`] is a self-contained implementation used by tests and tools.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CoordinateError, Result};

/// A record of named, typed columns
pub trait Row {
    fn get_i16(&self, column: &str) -> Result<i16>;

    fn get_f64(&self, column: &str) -> Result<f64>;

    fn update_i16(&mut self, column: &str, value: i16) -> Result<()>;

    fn update_f64(&mut self, column: &str, value: f64) -> Result<()>;
}

/// Value stored in a [`MemoryRow`] column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    Short(i16),
    Double(f64),
}

/// In-memory row keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryRow {
    columns: BTreeMap<String, RowValue>,
}

impl MemoryRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a column, if present
    pub fn value(&self, column: &str) -> Option<RowValue> {
        self.columns.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Serializes the row as a JSON object of column name to value
    ///
    /// Non-finite doubles have no JSON form and are written as `null`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a row previously produced by [`MemoryRow::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn lookup(&self, column: &str) -> Result<RowValue> {
        self.value(column)
            .ok_or_else(|| CoordinateError::MissingColumn(column.to_string()))
    }
}

impl Row for MemoryRow {
    fn get_i16(&self, column: &str) -> Result<i16> {
        match self.lookup(column)? {
            RowValue::Short(value) => Ok(value),
            RowValue::Double(_) => Err(CoordinateError::ColumnType {
                column: column.to_string(),
                expected: "short",
            }),
        }
    }

    fn get_f64(&self, column: &str) -> Result<f64> {
        match self.lookup(column)? {
            RowValue::Double(value) => Ok(value),
            // Integral columns widen losslessly
            RowValue::Short(value) => Ok(f64::from(value)),
        }
    }

    fn update_i16(&mut self, column: &str, value: i16) -> Result<()> {
        self.columns.insert(column.to_string(), RowValue::Short(value));
        Ok(())
    }

    fn update_f64(&mut self, column: &str, value: f64) -> Result<()> {
        self.columns.insert(column.to_string(), RowValue::Double(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_access() {
        let mut row = MemoryRow::new();
        assert!(row.is_empty());

        row.update_i16("kind", 2).unwrap();
        row.update_f64("a", 1.5).unwrap();

        assert_eq!(row.len(), 2);
        assert_eq!(row.get_i16("kind").unwrap(), 2);
        assert_eq!(row.get_f64("a").unwrap(), 1.5);
        assert_eq!(row.get_f64("kind").unwrap(), 2.0);
    }

    #[test]
    fn test_missing_and_mistyped_columns() {
        let mut row = MemoryRow::new();
        row.update_f64("a", 0.5).unwrap();

        assert!(matches!(
            row.get_f64("b"),
            Err(CoordinateError::MissingColumn(column)) if column == "b"
        ));
        assert!(matches!(
            row.get_i16("a"),
            Err(CoordinateError::ColumnType { expected: "short", .. })
        ));
    }

    #[test]
    fn test_update_overwrites() {
        let mut row = MemoryRow::new();
        row.update_f64("a", 1.0).unwrap();
        row.update_f64("a", 2.0).unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.value("a"), Some(RowValue::Double(2.0)));
    }

    #[test]
    fn test_json_round_trip() {
        let mut row = MemoryRow::new();
        row.update_i16("location_coordinate_type", 1).unwrap();
        row.update_f64("location_coordinate_a", -0.25).unwrap();

        let json = row.to_json().unwrap();
        assert!(json.contains("\"location_coordinate_type\": 1"));
        assert!(json.contains("\"location_coordinate_a\": -0.25"));

        let parsed = MemoryRow::from_json(&json).unwrap();
        assert_eq!(parsed, row);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            MemoryRow::from_json("{\"a\": \"text\"}"),
            Err(CoordinateError::Json(_))
        ));
    }
}
