//! The `generate` command: read every sheet, fold them into one aggregate,
//! render the requested artifacts, then write them out.

use std::path::Path;

use anyhow::Result;
use encoding_rs::Encoding;
use log::{debug, info};
use thiserror::Error;

use crate::{
    aggregate::{AggregateModel, SheetSource, build_aggregate},
    cli::GenerateArgs,
    config::GenerateOptions,
    emit::{EmitError, EmitOptions, Target, render_all},
    error::SheetError,
    field::ExportFilter,
    io_utils,
};

pub fn execute(args: &GenerateArgs) -> Result<()> {
    let options = GenerateOptions::resolve(args)?;
    info!(
        "Generating {} from '{}'",
        options
            .targets
            .iter()
            .map(Target::file_name)
            .collect::<Vec<_>>()
            .join(", "),
        options.input.display()
    );

    let sheets = load_sheets(&options.input, options.encoding)?;
    let artifacts = generate_artifacts(&sheets, options.filter, &options.targets, &options.emit)?;
    for (target, contents) in &artifacts {
        let path = io_utils::write_artifact(&options.out, target.file_name(), contents)?;
        info!("Generated {}", path.display());
    }
    Ok(())
}

/// Reads all sheets of every resolved input, in path order then sheet order.
pub fn load_sheets(input: &Path, encoding: &'static Encoding) -> Result<Vec<SheetSource>> {
    let paths = io_utils::resolve_input_paths(input)?;
    let mut sheets = Vec::new();
    for path in &paths {
        let loaded = io_utils::read_sheets(path, encoding)?;
        debug!("{}: {} sheet(s)", path.display(), loaded.len());
        sheets.extend(loaded);
    }
    Ok(sheets)
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// The in-memory pipeline: aggregate, then render each target.
pub fn generate_artifacts<'a, I>(
    sheets: &[SheetSource],
    filter: ExportFilter,
    targets: I,
    emit: &EmitOptions,
) -> Result<Vec<(Target, String)>, GenerateError>
where
    I: IntoIterator<Item = &'a Target>,
{
    let model: AggregateModel = build_aggregate(sheets, filter)?;
    info!("Aggregated {} sheet type(s)", model.len());
    let rendered = render_all(&model, targets, emit)?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;

    fn sheet(origin: &str, name: &str, raw: &[&[&str]]) -> SheetSource {
        let rows = raw
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        SheetSource::new(origin, name, rows)
    }

    #[test]
    fn item_sheet_flows_into_every_artifact() {
        let item = sheet(
            "config.xlsx[Item]",
            "Item",
            &[
                &["id", "count", "text", "list"],
                &["cid#int", "count#int", "data#string", "dt#int[]"],
                &["1", "5", "hello", "\"{1,2,3}\""],
            ],
        );
        let targets = [Target::Go, Target::CSharp, Target::TypeScript, Target::Data];
        let artifacts =
            generate_artifacts(&[item], ExportFilter::All, &targets, &EmitOptions::default())
                .unwrap();
        let by_target = |target: Target| {
            artifacts
                .iter()
                .find(|(t, _)| *t == target)
                .map(|(_, text)| text.as_str())
                .unwrap()
        };

        let data: serde_json::Value = serde_json::from_str(by_target(Target::Data)).unwrap();
        assert_eq!(
            data.to_string(),
            r#"{"items":[{"cid":1,"count":5,"data":"hello","dt":[1,2,3]}]}"#
        );
        assert!(by_target(Target::Go).contains("\tItems []Item `json:\"items\"`"));
        assert!(by_target(Target::Go).contains("\tDt []int `json:\"dt\"`"));
        assert!(by_target(Target::CSharp).contains("public List<Item> Items { get; set; }"));
        assert!(by_target(Target::TypeScript).contains("  items: Item[];"));
    }

    #[test]
    fn sheet_failures_keep_their_origin() {
        let broken = sheet("bad.tsv", "Bad", &[&["cid-int"]]);
        let err = generate_artifacts(&[broken], ExportFilter::All, &[Target::Go], &EmitOptions::default())
            .unwrap_err();
        match err {
            GenerateError::Sheet(sheet_err) => {
                assert_eq!(sheet_err.origin, "bad.tsv");
                assert!(matches!(
                    sheet_err.kind(),
                    SchemaError::HeaderDetection
                ));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
