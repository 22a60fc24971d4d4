//! Error taxonomy for the sheet pipeline.
//!
//! Core stages (header detection, field parsing, cell decoding, aggregation,
//! emission) return [`SchemaError`]. Once a failure leaves the sheet it was
//! raised in, it is wrapped in a [`SheetError`] that names the originating
//! file/sheet so the diagnostic can be located without re-running.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("cannot detect header: no row among the first three contains a field definition")]
    HeaderDetection,

    #[error("vertical orientation (A1=2) is not supported")]
    UnsupportedOrientation,

    #[error("invalid field definition '{cell}' at row {row} (expected name#type[,s|c])")]
    InvalidFieldDefinition { cell: String, row: usize },

    #[error("invalid export flag '{flag}' (expected server|client)")]
    InvalidFlag { flag: String },

    #[error("unsupported type '{raw_type}'")]
    UnsupportedType { raw_type: String },

    #[error("duplicate field '{name}' in define row {row}")]
    DuplicateField { name: String, row: usize },

    #[error("no exported fields found")]
    EmptySchema,

    #[error("empty sheet name")]
    EmptySheetName,

    #[error("duplicate sheet key '{key}' (already used by {previous})")]
    DuplicateKey {
        key: String,
        origin: String,
        previous: String,
    },

    #[error("row {row} col {column} ({field}): {message}")]
    CellParse {
        row: usize,
        column: usize,
        field: String,
        message: String,
    },
}

/// A [`SchemaError`] tagged with the file/sheet it came from. The message
/// already embeds the inner error, so it is not exposed as a source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{origin}: {error}")]
pub struct SheetError {
    pub origin: String,
    pub error: SchemaError,
}

impl SheetError {
    pub fn new(origin: impl Into<String>, error: SchemaError) -> Self {
        Self {
            origin: origin.into(),
            error,
        }
    }

    pub fn kind(&self) -> &SchemaError {
        &self.error
    }
}
