//! Typed cell values and the data-row decoder.
//!
//! Array cells use a brace literal: `{1,2,3}` for `int[]`,
//! `{{1,2},{3,4}}` for `int[][]`, and `{}` (optionally quoted) for an empty
//! sequence.

use std::{
    collections::BTreeMap,
    num::{ParseFloatError, ParseIntError},
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{error::SchemaError, field::Field, types::FieldType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    List(Vec<CellValue>),
}

/// One decoded data row keyed by raw field name.
pub type Record = BTreeMap<String, CellValue>;

#[derive(Debug, Error)]
pub enum CellDecodeError {
    #[error("invalid integer '{value}': {source}")]
    Integer {
        value: String,
        source: ParseIntError,
    },
    #[error("invalid float '{value}': {source}")]
    Float {
        value: String,
        source: ParseFloatError,
    },
    #[error("float '{0}' is not finite")]
    NonFinite(String),
    #[error("invalid boolean '{0}'")]
    Boolean(String),
    #[error("invalid brace literal '{value}': {source}")]
    BraceLiteral {
        value: String,
        source: serde_json::Error,
    },
}

impl CellValue {
    pub fn zero(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Integer => CellValue::Integer(0),
            FieldType::Float => CellValue::Float(0.0),
            FieldType::Boolean => CellValue::Boolean(false),
            FieldType::String => CellValue::String(String::new()),
            FieldType::IntList | FieldType::IntGrid => CellValue::List(Vec::new()),
        }
    }
}

impl From<Vec<i64>> for CellValue {
    fn from(values: Vec<i64>) -> Self {
        CellValue::List(values.into_iter().map(CellValue::Integer).collect())
    }
}

impl From<Vec<Vec<i64>>> for CellValue {
    fn from(rows: Vec<Vec<i64>>) -> Self {
        CellValue::List(rows.into_iter().map(CellValue::from).collect())
    }
}

/// Decodes a trimmed cell. Empty text yields the type's zero value.
pub fn decode_cell(field_type: FieldType, text: &str) -> Result<CellValue, CellDecodeError> {
    if text.is_empty() {
        return Ok(CellValue::zero(field_type));
    }
    let value = match field_type {
        FieldType::Integer => {
            let parsed = text.parse::<i64>().map_err(|source| CellDecodeError::Integer {
                value: text.to_string(),
                source,
            })?;
            CellValue::Integer(parsed)
        }
        FieldType::Float => {
            let parsed = text.parse::<f64>().map_err(|source| CellDecodeError::Float {
                value: text.to_string(),
                source,
            })?;
            if !parsed.is_finite() {
                return Err(CellDecodeError::NonFinite(text.to_string()));
            }
            CellValue::Float(parsed)
        }
        FieldType::Boolean => CellValue::Boolean(parse_bool(text)?),
        FieldType::String => CellValue::String(text.to_string()),
        FieldType::IntList => CellValue::from(parse_brace_literal::<Vec<i64>>(text)?),
        FieldType::IntGrid => CellValue::from(parse_brace_literal::<Vec<Vec<i64>>>(text)?),
    };
    Ok(value)
}

fn parse_bool(text: &str) -> Result<bool, CellDecodeError> {
    match text.to_ascii_lowercase().as_str() {
        "1" | "true" | "t" => Ok(true),
        "0" | "false" | "f" => Ok(false),
        _ => Err(CellDecodeError::Boolean(text.to_string())),
    }
}

/// Rewrites a brace literal into JSON array syntax and deserializes it.
pub fn parse_brace_literal<T: DeserializeOwned>(text: &str) -> Result<T, CellDecodeError> {
    let unquoted = text.trim().trim_matches('"');
    let bracketed = if unquoted.is_empty() || unquoted == "{}" {
        "[]".to_string()
    } else {
        unquoted.replace('{', "[").replace('}', "]")
    };
    let wrapped = if bracketed.trim_start().starts_with('[') {
        bracketed
    } else {
        format!("[{bracketed}]")
    };
    serde_json::from_str(&wrapped).map_err(|source| CellDecodeError::BraceLiteral {
        value: text.to_string(),
        source,
    })
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Decodes every non-blank row from the 1-based `first_data_row` onwards.
pub fn decode_rows(
    rows: &[Vec<String>],
    first_data_row: usize,
    fields: &[Field],
) -> Result<Vec<Record>, SchemaError> {
    let start = first_data_row.saturating_sub(1);
    rows.iter()
        .enumerate()
        .skip(start)
        .filter(|(_, row)| !is_blank_row(row))
        .map(|(idx, row)| decode_record(idx + 1, row, fields))
        .collect()
}

fn decode_record(row_number: usize, row: &[String], fields: &[Field]) -> Result<Record, SchemaError> {
    let mut record = Record::new();
    for field in fields {
        let cell = row.get(field.column).map(|c| c.trim()).unwrap_or("");
        let value = decode_cell(field.field_type, cell).map_err(|err| SchemaError::CellParse {
            row: row_number,
            column: field.column + 1,
            field: field.raw_name.clone(),
            message: err.to_string(),
        })?;
        record.insert(field.raw_name.clone(), value);
    }
    Ok(record)
}
