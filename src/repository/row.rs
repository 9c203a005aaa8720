//! Driver rows flattened into JSON values keyed by column label.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRow(Map<String, Value>);

impl RawRow {
    pub fn new(cells: Map<String, Value>) -> Self {
        RawRow(cells)
    }

    /// Read a cell. Absent and NULL cells both read as `None`.
    pub fn get<T: DeserializeOwned>(&self, column: &str) -> AppResult<Option<T>> {
        match self.0.get(column) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => serde_json::from_value(v.clone())
                .map(Some)
                .map_err(|e| AppError::Internal(format!("column {}: {}", column, e))),
        }
    }

    pub fn require<T: DeserializeOwned>(&self, column: &str) -> AppResult<T> {
        self.get(column)?
            .ok_or_else(|| AppError::Internal(format!("column {} is missing or null", column)))
    }

    pub fn is_null(&self, column: &str) -> bool {
        matches!(self.0.get(column), None | Some(Value::Null))
    }
}

impl From<&PgRow> for RawRow {
    fn from(row: &PgRow) -> Self {
        let cells = row
            .columns()
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name().to_string(), cell_to_value(row, i)))
            .collect();
        RawRow(cells)
    }
}

/// Decode one cell, trying the types the grid tables use.
fn cell_to_value(row: &PgRow, i: usize) -> Value {
    if let Ok(v) = row.try_get::<Option<i32>, _>(i) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(i) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<bool>, _>(i) {
        return v.map(Value::Bool).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<DateTime<Utc>>, _>(i) {
        return v.map(|t| Value::String(t.to_rfc3339())).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(i) {
        return v.map(Value::String).unwrap_or(Value::Null);
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(v: Value) -> RawRow {
        match v {
            Value::Object(m) => RawRow::new(m),
            _ => unreachable!(),
        }
    }

    #[test]
    fn null_and_absent_read_as_none() {
        let r = row(json!({ "e_caption": null }));
        assert_eq!(r.get::<String>("e_caption").unwrap(), None);
        assert_eq!(r.get::<String>("e_format").unwrap(), None);
        assert!(r.is_null("e_format"));
    }

    #[test]
    fn require_fails_on_missing_column() {
        let r = row(json!({ "e_id": 4 }));
        assert_eq!(r.require::<i64>("e_id").unwrap(), 4);
        assert!(matches!(r.require::<String>("e_data_field"), Err(AppError::Internal(_))));
    }

    #[test]
    fn wrong_type_is_a_mapping_error() {
        let r = row(json!({ "e_width": "wide" }));
        assert!(r.get::<i32>("e_width").is_err());
    }
}
