//! The `inspect` command: shows how each sheet's header is read without
//! writing any artifacts.

use std::fmt::Write as _;

use anyhow::Result;
use log::info;

use crate::{
    aggregate::{ParsedSheet, SheetSource, parse_sheet},
    cli::InspectArgs,
    error::SheetError,
    field::{ExportFilter, export_name},
    generate::load_sheets,
    io_utils,
};

const COLUMNS: [&str; 5] = ["col", "name", "exported", "type", "visibility"];

pub fn execute(args: &InspectArgs) -> Result<()> {
    let filter = ExportFilter::parse(args.flag.as_deref())?;
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!("Inspecting '{}'", args.input.display());

    let sheets = load_sheets(&args.input, encoding)?;
    for sheet in &sheets {
        let parsed =
            parse_sheet(&sheet.rows, filter).map_err(|err| SheetError::new(&sheet.origin, err))?;
        print!("{}", render_sheet_report(sheet, &parsed));
    }
    info!("Inspected {} sheet(s)", sheets.len());
    Ok(())
}

pub fn render_sheet_report(sheet: &SheetSource, parsed: &ParsedSheet) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{} -> {} ({} header row(s), define row {}, {} record(s))",
        sheet.origin,
        export_name(sheet.name.trim()),
        parsed.header.header_rows,
        parsed.header.define_row,
        parsed.records.len()
    );

    let rows = parsed
        .fields
        .iter()
        .map(|field| {
            [
                (field.column + 1).to_string(),
                field.raw_name.clone(),
                field.name.clone(),
                field.field_type.to_string(),
                field.visibility.to_string(),
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(&mut output, &COLUMNS.map(str::to_string), &widths);
    write_row(&mut output, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &rows {
        write_row(&mut output, row, &widths);
    }
    output.push('\n');
    output
}

fn write_row(output: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let mut line = String::new();
    for (idx, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{cell:<width$}");
    }
    let _ = writeln!(output, "{}", line.trim_end());
}
