//! Raw field types and their per-target type names.
//!
//! Raw type tokens are matched case-insensitively. The Go table doubles as the
//! canonical existence check used while parsing the define row.

use std::{fmt, str::FromStr};

use crate::error::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
    Boolean,
    String,
    IntList,
    IntGrid,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Integer => "int",
            FieldType::Float => "float",
            FieldType::Boolean => "bool",
            FieldType::String => "string",
            FieldType::IntList => "int[]",
            FieldType::IntGrid => "int[][]",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "int" | "int32" | "int64" => Ok(FieldType::Integer),
            "float" | "float32" | "float64" => Ok(FieldType::Float),
            "bool" => Ok(FieldType::Boolean),
            "string" => Ok(FieldType::String),
            "int[]" => Ok(FieldType::IntList),
            "int[][]" => Ok(FieldType::IntGrid),
            _ => Err(unsupported(raw)),
        }
    }
}

fn unsupported(raw: &str) -> SchemaError {
    SchemaError::UnsupportedType {
        raw_type: raw.to_string(),
    }
}

pub fn go_type(raw: &str) -> Result<&'static str, SchemaError> {
    match raw.to_ascii_lowercase().as_str() {
        "int" | "int32" | "int64" => Ok("int"),
        "int[]" => Ok("[]int"),
        "int[][]" => Ok("[][]int"),
        "float" | "float32" | "float64" => Ok("float64"),
        "bool" => Ok("bool"),
        "string" => Ok("string"),
        _ => Err(unsupported(raw)),
    }
}

pub fn csharp_type(raw: &str) -> Result<&'static str, SchemaError> {
    match raw.to_ascii_lowercase().as_str() {
        "int" | "int32" | "int64" => Ok("int"),
        "int[]" => Ok("List<int>"),
        "int[][]" => Ok("List<List<int>>"),
        "float" | "float32" | "float64" => Ok("double"),
        "bool" => Ok("bool"),
        "string" => Ok("string"),
        _ => Err(unsupported(raw)),
    }
}

pub fn typescript_type(raw: &str) -> Result<&'static str, SchemaError> {
    match raw.to_ascii_lowercase().as_str() {
        "int" | "int32" | "int64" | "float" | "float32" | "float64" => Ok("number"),
        "int[]" => Ok("number[]"),
        "int[][]" => Ok("number[][]"),
        "bool" => Ok("boolean"),
        "string" => Ok("string"),
        _ => Err(unsupported(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_TYPES: &[&str] = &[
        "int", "INT32", "int64", "float", "Float32", "float64", "bool", "string", "int[]",
        "Int[][]",
    ];

    #[test]
    fn every_table_resolves_the_same_raw_types() {
        for raw in RAW_TYPES {
            assert!(raw.parse::<FieldType>().is_ok(), "{raw}");
            assert!(go_type(raw).is_ok(), "{raw}");
            assert!(csharp_type(raw).is_ok(), "{raw}");
            assert!(typescript_type(raw).is_ok(), "{raw}");
        }
    }

    #[test]
    fn array_types_map_to_sequences() {
        assert_eq!(go_type("int[][]").unwrap(), "[][]int");
        assert_eq!(csharp_type("int[]").unwrap(), "List<int>");
        assert_eq!(typescript_type("int[][]").unwrap(), "number[][]");
    }

    #[test]
    fn typescript_collapses_numeric_types() {
        assert_eq!(typescript_type("int").unwrap(), "number");
        assert_eq!(typescript_type("float64").unwrap(), "number");
        assert_eq!(csharp_type("float").unwrap(), "double");
    }

    #[test]
    fn unknown_types_are_rejected_everywhere() {
        let expected = SchemaError::UnsupportedType {
            raw_type: "long".to_string(),
        };
        assert_eq!(go_type("long").unwrap_err(), expected);
        assert_eq!(csharp_type("long").unwrap_err(), expected);
        assert_eq!(typescript_type("long").unwrap_err(), expected);
        assert_eq!("long".parse::<FieldType>().unwrap_err(), expected);
        assert!(go_type("float[]").is_err());
    }
}
