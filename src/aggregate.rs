//! Cross-sheet schema aggregation.
//!
//! Sheets are folded, in input order, into one [`AggregateModel`]. Each sheet
//! contributes a type named after the sheet plus its decoded records, stored
//! under a pluralised lower-camel key that must be unique across the run.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::{
    error::{SchemaError, SheetError},
    field::{ExportFilter, Field, export_name, parse_define_row},
    header::{HeaderSpec, Orientation, detect_header_spec},
    value::{Record, decode_rows},
};

/// Rows of one sheet as handed over by the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSource {
    /// `path` or `path[sheet]`, used only in diagnostics.
    pub origin: String,
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetSource {
    pub fn new(origin: impl Into<String>, name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            origin: origin.into(),
            name: name.into(),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSchema {
    pub name: String,
    pub plural: String,
    pub json_key: String,
    pub origin: String,
    pub fields: Vec<Field>,
}

/// Schema and data of a single sheet before it joins the aggregate.
#[derive(Debug, Clone)]
pub struct ParsedSheet {
    pub header: HeaderSpec,
    pub fields: Vec<Field>,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Default)]
pub struct AggregateModel {
    types: Vec<TypeSchema>,
    index: HashMap<String, usize>,
    data: BTreeMap<String, Vec<Record>>,
    seen_keys: HashMap<String, String>,
}

impl AggregateModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type declarations in first-seen order.
    pub fn types(&self) -> &[TypeSchema] {
        &self.types
    }

    pub fn ordered_type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|ty| ty.name.as_str())
    }

    pub fn schema(&self, type_name: &str) -> Option<&TypeSchema> {
        self.index.get(type_name).map(|&idx| &self.types[idx])
    }

    /// Decoded records keyed by JSON key.
    pub fn data(&self) -> &BTreeMap<String, Vec<Record>> {
        &self.data
    }

    pub fn records(&self, json_key: &str) -> Option<&[Record]> {
        self.data.get(json_key).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Fold step: parses `sheet` and registers it, failing on a key collision.
    pub fn with_sheet(mut self, sheet: &SheetSource, filter: ExportFilter) -> Result<Self, SheetError> {
        let parsed =
            parse_sheet(&sheet.rows, filter).map_err(|err| SheetError::new(&sheet.origin, err))?;
        debug!(
            "{}: define row {} ({} header row(s)), {} field(s), {} record(s)",
            sheet.origin,
            parsed.header.define_row,
            parsed.header.header_rows,
            parsed.fields.len(),
            parsed.records.len()
        );
        self.insert(&sheet.origin, &sheet.name, parsed.fields, parsed.records)
            .map_err(|err| SheetError::new(&sheet.origin, err))?;
        Ok(self)
    }

    pub fn insert(
        &mut self,
        origin: &str,
        sheet_name: &str,
        fields: Vec<Field>,
        records: Vec<Record>,
    ) -> Result<(), SchemaError> {
        let name = export_name(sheet_name.trim());
        if name.is_empty() {
            return Err(SchemaError::EmptySheetName);
        }
        let plural = pluralize(&name);
        let json_key = lower_first(&plural);
        if let Some(previous) = self.seen_keys.get(&json_key) {
            return Err(SchemaError::DuplicateKey {
                key: json_key,
                origin: origin.to_string(),
                previous: previous.clone(),
            });
        }

        self.seen_keys.insert(json_key.clone(), origin.to_string());
        self.data.insert(json_key.clone(), records);
        self.index.insert(name.clone(), self.types.len());
        self.types.push(TypeSchema {
            name,
            plural,
            json_key,
            origin: origin.to_string(),
            fields,
        });
        Ok(())
    }
}

#[cfg(test)]
impl AggregateModel {
    pub(crate) fn override_first_field_type(&mut self, raw_type: &str) {
        if let Some(field) = self.types.first_mut().and_then(|ty| ty.fields.first_mut()) {
            field.raw_type = raw_type.to_string();
        }
    }
}

/// Builds the aggregate by folding every sheet in order, stopping at the first failure.
pub fn build_aggregate<'a, I>(sheets: I, filter: ExportFilter) -> Result<AggregateModel, SheetError>
where
    I: IntoIterator<Item = &'a SheetSource>,
{
    sheets
        .into_iter()
        .try_fold(AggregateModel::new(), |model, sheet| model.with_sheet(sheet, filter))
}

/// Header detection, field parsing, and row decoding for one sheet.
pub fn parse_sheet(rows: &[Vec<String>], filter: ExportFilter) -> Result<ParsedSheet, SchemaError> {
    let header = detect_header_spec(rows)?;
    if header.orientation == Orientation::Vertical {
        return Err(SchemaError::UnsupportedOrientation);
    }
    let define_cells = &rows[header.define_row - 1];
    let fields = parse_define_row(define_cells, header.define_row, filter)?;
    let records = decode_rows(rows, header.first_data_row(), &fields)?;
    Ok(ParsedSheet {
        header,
        fields,
        records,
    })
}

/// Minimal English plural for type names: `Item` -> `Items`, `Box` -> `Boxes`.
pub fn pluralize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| name.ends_with(suffix))
    {
        format!("{name}es")
    } else {
        format!("{name}s")
    }
}

pub fn lower_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    fn sheet(origin: &str, name: &str, raw: &[&[&str]]) -> SheetSource {
        let rows = raw
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        SheetSource::new(origin, name, rows)
    }

    fn item_sheet(origin: &str, name: &str) -> SheetSource {
        sheet(
            origin,
            name,
            &[
                &["id", "count"],
                &["cid#int", "count#int"],
                &["1", "5"],
                &["2", ""],
            ],
        )
    }

    #[test]
    fn pluralize_examples() {
        assert_eq!(pluralize("Item"), "Items");
        assert_eq!(pluralize("Quest"), "Quests");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Bus"), "Buses");
        assert_eq!(pluralize("Quiz"), "Quizes");
        assert_eq!(pluralize("Match"), "Matches");
        assert_eq!(pluralize("Wish"), "Wishes");
        assert_eq!(lower_first("Items"), "items");
        assert_eq!(lower_first("DropTables"), "dropTables");
    }

    #[test]
    fn aggregate_preserves_input_order() {
        let sheets = vec![
            item_sheet("b.xlsx[Quest]", "Quest"),
            item_sheet("a.xlsx[Item]", "Item"),
            item_sheet("a.xlsx[drop_table]", "drop_table"),
        ];
        let model = build_aggregate(&sheets, ExportFilter::All).expect("aggregate");
        assert_eq!(model.len(), 3);
        let names: Vec<_> = model.ordered_type_names().collect();
        assert_eq!(names, vec!["Quest", "Item", "DropTable"]);

        let drop_table = model.schema("DropTable").expect("schema");
        assert_eq!(drop_table.plural, "DropTables");
        assert_eq!(drop_table.json_key, "dropTables");

        let items = model.records("items").expect("records");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["count"], CellValue::Integer(0));
    }

    #[test]
    fn duplicate_keys_name_both_origins() {
        let sheets = vec![item_sheet("a.xlsx[Item]", "Item"), item_sheet("b.tsv", "item")];
        let err = build_aggregate(&sheets, ExportFilter::All).unwrap_err();
        assert_eq!(err.origin, "b.tsv");
        assert_eq!(
            err.kind(),
            &SchemaError::DuplicateKey {
                key: "items".to_string(),
                origin: "b.tsv".to_string(),
                previous: "a.xlsx[Item]".to_string(),
            }
        );

        let reversed = vec![item_sheet("b.tsv", "item"), item_sheet("a.xlsx[Item]", "Item")];
        let err = build_aggregate(&reversed, ExportFilter::All).unwrap_err();
        assert!(matches!(
            err.kind(),
            SchemaError::DuplicateKey { origin, previous, .. }
                if origin == "a.xlsx[Item]" && previous == "b.tsv"
        ));
    }

    #[test]
    fn no_sheets_yield_an_empty_model() {
        let model = build_aggregate(&[], ExportFilter::All).unwrap();
        assert!(model.is_empty());
        assert!(model.data().is_empty());
    }

    #[test]
    fn empty_sheet_names_are_rejected() {
        let err = build_aggregate(&[item_sheet("x.tsv", "__")], ExportFilter::All).unwrap_err();
        assert_eq!(err.kind(), &SchemaError::EmptySheetName);
    }

    #[test]
    fn vertical_orientation_fails_before_field_parsing() {
        let vertical = sheet(
            "v.xlsx[Item]",
            "Item",
            &[&["2"], &["desc"], &["cid-int", "#oops"]],
        );
        let err = build_aggregate(&[vertical], ExportFilter::All).unwrap_err();
        assert_eq!(err.kind(), &SchemaError::UnsupportedOrientation);
        assert!(err.to_string().starts_with("v.xlsx[Item]: "));
    }

    #[test]
    fn first_failure_aborts_the_fold() {
        let broken = sheet("bad.tsv", "Bad", &[&["cid#int"], &["oops"]]);
        let sheets = vec![broken, item_sheet("a.xlsx[Item]", "Item")];
        let err = build_aggregate(&sheets, ExportFilter::All).unwrap_err();
        assert_eq!(err.origin, "bad.tsv");
        assert!(matches!(err.kind(), SchemaError::CellParse { row: 2, column: 1, .. }));
    }
}
