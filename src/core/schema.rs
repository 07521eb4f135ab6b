//! Boundary checks for the loosely typed search responses.
//!
//! The search endpoints hand back plain JSON arrays. Each element is checked
//! here before it reaches grouping or sorting; the first element missing a
//! required field fails the whole batch.

use crate::domain::model::{FlatItem, TableRow};
use crate::utils::error::{CatalogError, Result};
use serde_json::{Map, Value};

pub fn parse_flat_items(values: &[Value]) -> Result<Vec<FlatItem>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let obj = as_object(index, value)?;
            Ok(FlatItem {
                part_number: required_string(index, obj, "part_number")?,
                description: required_string(index, obj, "description")?,
                image: required_string(index, obj, "image")?,
            })
        })
        .collect()
}

pub fn parse_table_rows(values: &[Value]) -> Result<Vec<TableRow>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let obj = as_object(index, value)?;
            Ok(TableRow {
                part_number: required_string(index, obj, "part_number")?,
                description: required_string(index, obj, "description")?,
                price: required_string_or_number(index, obj, "price")?,
                date: required_string(index, obj, "date")?,
            })
        })
        .collect()
}

fn as_object(index: usize, value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or_else(|| CatalogError::MalformedRecord {
        index,
        field: "<record>".to_string(),
        reason: format!("expected a JSON object, got {}", type_name(value)),
    })
}

fn required<'a>(index: usize, obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    match obj.get(field) {
        None => Err(malformed(index, field, "is missing".to_string())),
        Some(Value::Null) => Err(malformed(index, field, "is null".to_string())),
        Some(value) => Ok(value),
    }
}

fn required_string(index: usize, obj: &Map<String, Value>, field: &str) -> Result<String> {
    match required(index, obj, field)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(malformed(
            index,
            field,
            format!("expected a string, got {}", type_name(other)),
        )),
    }
}

// Decimal columns arrive either quoted or as bare JSON numbers.
fn required_string_or_number(index: usize, obj: &Map<String, Value>, field: &str) -> Result<String> {
    match required(index, obj, field)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(malformed(
            index,
            field,
            format!("expected a string or number, got {}", type_name(other)),
        )),
    }
}

fn malformed(index: usize, field: &str, reason: String) -> CatalogError {
    CatalogError::MalformedRecord {
        index,
        field: field.to_string(),
        reason,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
