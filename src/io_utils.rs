//! Input discovery, sheet reading, and artifact writing.
//!
//! - **Path resolution**: a file, a directory of `.xls`/`.xlsx` workbooks, or a
//!   bare name looked up under `./xls/`.
//! - **Workbooks**: every worksheet is read through `calamine`, in workbook
//!   order, and padded so cell positions stay anchored at A1.
//! - **Tab-separated text**: the fallback when a file is not a workbook. Lines
//!   are split on tabs without quote handling and decoded with the requested
//!   `encoding_rs` encoding.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use calamine::{Data, Reader, open_workbook_auto};
use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::aggregate::SheetSource;

pub const DEFAULT_INPUT_DIR: &str = "xls";
const WORKBOOK_EXTENSIONS: &[&str] = &["xls", "xlsx"];

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

/// Resolves `--in` to the ordered list of files to read.
pub fn resolve_input_paths(input: &Path) -> Result<Vec<PathBuf>> {
    if input.as_os_str().is_empty() {
        bail!("empty --in");
    }
    if input.is_dir() {
        return list_workbooks(input);
    }
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let cwd = std::env::current_dir().context("Resolving working directory")?;
    let candidate = match input.file_name() {
        Some(name) => cwd.join(DEFAULT_INPUT_DIR).join(name),
        None => cwd.join(DEFAULT_INPUT_DIR),
    };
    if candidate.is_dir() {
        return list_workbooks(&candidate);
    }
    if candidate.is_file() {
        return Ok(vec![candidate]);
    }
    bail!(
        "input file not found: {} (also tried {})",
        input.display(),
        candidate.display()
    )
}

fn list_workbooks(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Reading directory {dir:?}"))? {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }
        let is_workbook = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                WORKBOOK_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if is_workbook {
            paths.push(path);
        }
    }
    paths.sort();
    if paths.is_empty() {
        bail!("no .xls/.xlsx files in {}", dir.display());
    }
    Ok(paths)
}

/// Reads every sheet of `path`, trying the workbook reader first.
pub fn read_sheets(path: &Path, encoding: &'static Encoding) -> Result<Vec<SheetSource>> {
    match read_workbook(path) {
        Ok(sheets) => Ok(sheets),
        Err(workbook_err) => {
            debug!("{path:?} is not a workbook ({workbook_err:#}); reading as tab-separated text");
            let sheet = read_tsv(path, encoding)
                .with_context(|| format!("Opening {path:?} (not a workbook: {workbook_err})"))?;
            Ok(vec![sheet])
        }
    }
}

pub fn read_workbook(path: &Path) -> Result<Vec<SheetSource>> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("Opening workbook {path:?}"))?;
    let names = workbook.sheet_names();
    if names.is_empty() {
        bail!("{}: workbook has no sheets", path.display());
    }

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let origin = format!("{}[{}]", path.display(), name);
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("Reading {origin}"))?;
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows = vec![Vec::new(); start_row as usize];
        for row in range.rows() {
            let mut cells = vec![String::new(); start_col as usize];
            cells.extend(row.iter().map(render_cell));
            rows.push(cells);
        }
        sheets.push(SheetSource::new(origin, name, rows));
    }
    Ok(sheets)
}

fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        other => other.to_string(),
    }
}

pub fn read_tsv(path: &Path, encoding: &'static Encoding) -> Result<SheetSource> {
    let bytes = fs::read(path).with_context(|| format!("Reading {path:?}"))?;
    let text = decode_bytes(&bytes, encoding)?;
    let rows = parse_tsv(&text)?;
    if rows.is_empty() {
        bail!("{}: empty file", path.display());
    }
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(SheetSource::new(path.display().to_string(), name, rows))
}

/// Splits text into rows of tab-separated cells, dropping blank lines.
pub fn parse_tsv(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Reading line {}", idx + 1))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Writes `contents` into `dir/file_name`, creating `dir` when needed.
pub fn write_artifact(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Creating output directory {dir:?}"))?;
    let path = dir.join(file_name);
    fs::write(&path, contents).with_context(|| format!("Writing {path:?}"))?;
    Ok(path)
}
