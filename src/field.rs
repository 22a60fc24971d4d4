//! Define-row parsing.
//!
//! Each non-blank define-row cell is either a comment marker (`#comment`,
//! `#common`) or a field definition of the form `name#type[,flag]`, where the
//! optional flag restricts the field to server (`s`) or client (`c`) exports.

use std::{collections::HashSet, fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::{
    error::SchemaError,
    types::{self, FieldType},
};

static FIELD_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*#\s*([^,\s]+)\s*(?:,\s*([sc]))?\s*$")
        .expect("field definition pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    All,
    ServerOnly,
    ClientOnly,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::All => "all",
            Visibility::ServerOnly => "server",
            Visibility::ClientOnly => "client",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Export build selected for a run. `Server` drops client-only fields and
/// `Client` drops server-only fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFilter {
    #[default]
    All,
    Server,
    Client,
}

impl ExportFilter {
    /// Resolves an optional `--flag` value; blank means no filtering.
    pub fn parse(value: Option<&str>) -> Result<Self, SchemaError> {
        match value.map(str::trim) {
            None | Some("") => Ok(ExportFilter::All),
            Some(other) => other.parse(),
        }
    }

    pub fn keeps(&self, visibility: Visibility) -> bool {
        !matches!(
            (self, visibility),
            (ExportFilter::Server, Visibility::ClientOnly)
                | (ExportFilter::Client, Visibility::ServerOnly)
        )
    }
}

impl FromStr for ExportFilter {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "server" => Ok(ExportFilter::Server),
            "client" => Ok(ExportFilter::Client),
            other => Err(SchemaError::InvalidFlag {
                flag: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub raw_name: String,
    pub name: String,
    pub raw_type: String,
    pub field_type: FieldType,
    /// 0-based column shared by every data row of the sheet.
    pub column: usize,
    pub visibility: Visibility,
}

/// Parses the define row (1-based `row`) into the fields exported under `filter`.
pub fn parse_define_row(
    cells: &[String],
    row: usize,
    filter: ExportFilter,
) -> Result<Vec<Field>, SchemaError> {
    let mut fields = Vec::new();
    let mut raw_names = HashSet::new();
    let mut exported_names = HashSet::new();

    for (column, cell) in cells.iter().enumerate() {
        let cell = cell.trim();
        if cell.is_empty() || is_comment_cell(cell) {
            continue;
        }

        let captures = FIELD_DEF
            .captures(cell)
            .ok_or_else(|| SchemaError::InvalidFieldDefinition {
                cell: cell.to_string(),
                row,
            })?;
        let raw_name = &captures[1];
        let raw_type = &captures[2];
        if is_comment_type(raw_type) {
            continue;
        }
        let visibility = match captures.get(3).map(|m| m.as_str()) {
            Some("s") => Visibility::ServerOnly,
            Some("c") => Visibility::ClientOnly,
            _ => Visibility::All,
        };
        if !filter.keeps(visibility) {
            continue;
        }

        types::go_type(raw_type)?;
        let field_type = raw_type.parse::<FieldType>()?;
        let name = export_name(raw_name);
        if !raw_names.insert(raw_name.to_string()) || !exported_names.insert(name.clone()) {
            return Err(SchemaError::DuplicateField {
                name: raw_name.to_string(),
                row,
            });
        }

        fields.push(Field {
            raw_name: raw_name.to_string(),
            name,
            raw_type: raw_type.to_string(),
            field_type,
            column,
            visibility,
        });
    }

    if fields.is_empty() {
        return Err(SchemaError::EmptySchema);
    }
    Ok(fields)
}

fn is_comment_cell(cell: &str) -> bool {
    let lowered = cell.to_lowercase();
    lowered.contains("#comment") || lowered.contains("#common")
}

fn is_comment_type(raw_type: &str) -> bool {
    raw_type.eq_ignore_ascii_case("comment") || raw_type.eq_ignore_ascii_case("common")
}

/// Converts a raw field or sheet name into an exported type/member name.
///
/// Names without `_`/`-` only get their first character upper-cased
/// (`dataId` -> `DataId`). Otherwise every separated part is capitalised and
/// the rest of the part lower-cased (`DATA_ID` -> `DataId`).
pub fn export_name(name: &str) -> String {
    if !name.contains(['_', '-']) {
        return upper_first(name);
    }
    name.split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
