//! Header layout detection.
//!
//! A sheet carries one to three header rows. The last of them is the define
//! row (`name#type[,flag]` cells). With a three-row header, cell A1 selects
//! the table orientation.

use crate::error::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpec {
    pub header_rows: usize,
    pub orientation: Orientation,
    /// 1-based row number of the define row.
    pub define_row: usize,
}

impl HeaderSpec {
    /// 1-based row number of the first data row.
    pub fn first_data_row(&self) -> usize {
        self.define_row + 1
    }
}

/// Predicate deciding whether a row holds field definitions.
pub type DefineRowPredicate = fn(&[String]) -> bool;

/// A row looks like a define row when any cell contains `#`.
pub fn row_has_field_defs(row: &[String]) -> bool {
    row.iter().any(|cell| cell.contains('#'))
}

pub fn detect_header_spec(rows: &[Vec<String>]) -> Result<HeaderSpec, SchemaError> {
    detect_header_spec_with(rows, row_has_field_defs)
}

pub fn detect_header_spec_with(
    rows: &[Vec<String>],
    looks_like_define_row: DefineRowPredicate,
) -> Result<HeaderSpec, SchemaError> {
    if rows.len() >= 3 && looks_like_define_row(&rows[2]) {
        let a1 = rows[0].first().map(|c| c.trim()).unwrap_or("");
        let orientation = match a1 {
            "2" => Orientation::Vertical,
            _ => Orientation::Horizontal,
        };
        return Ok(HeaderSpec {
            header_rows: 3,
            orientation,
            define_row: 3,
        });
    }
    if rows.len() >= 2 && looks_like_define_row(&rows[1]) {
        return Ok(HeaderSpec {
            header_rows: 2,
            orientation: Orientation::Horizontal,
            define_row: 2,
        });
    }
    if !rows.is_empty() && looks_like_define_row(&rows[0]) {
        return Ok(HeaderSpec {
            header_rows: 1,
            orientation: Orientation::Horizontal,
            define_row: 1,
        });
    }
    Err(SchemaError::HeaderDetection)
}
