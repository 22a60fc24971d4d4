use std::fmt::Write as _;

use super::{EmitError, Emitter, Target, finish};
use crate::{aggregate::AggregateModel, types::typescript_type};

/// TypeScript interfaces keyed by raw field names; the root interface comes last.
#[derive(Debug, Clone)]
pub struct TypeScriptEmitter {
    root_name: String,
}

impl TypeScriptEmitter {
    pub fn new(root_name: &str) -> Self {
        Self {
            root_name: root_name.to_string(),
        }
    }
}

impl Emitter for TypeScriptEmitter {
    fn target(&self) -> Target {
        Target::TypeScript
    }

    fn render(&self, model: &AggregateModel) -> Result<String, EmitError> {
        let mut out = String::new();
        for ty in model.types() {
            let _ = writeln!(out, "export interface {} {{", ty.name);
            for field in &ty.fields {
                let mapped = typescript_type(&field.raw_type)?;
                let _ = writeln!(out, "  {}: {};", field.raw_name, mapped);
            }
            let _ = writeln!(out, "}}\n");
        }

        let _ = writeln!(out, "export interface {} {{", self.root_name);
        for ty in model.types() {
            let _ = writeln!(out, "  {}: {}[];", ty.json_key, ty.name);
        }
        let _ = writeln!(out, "}}");

        Ok(finish(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::fixtures;

    #[test]
    fn renders_interfaces_then_root() {
        let model = fixtures::item_model();
        let rendered = TypeScriptEmitter::new("AllConfig").render(&model).unwrap();
        let expected = concat!(
            "export interface Item {\n",
            "  cid: number;\n",
            "  count: number;\n",
            "  data: string;\n",
            "  dt: number[];\n",
            "}\n",
            "\n",
            "export interface AllConfig {\n",
            "  items: Item[];\n",
            "}\n",
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn keys_root_members_by_json_key() {
        let model = fixtures::two_type_model();
        let rendered = TypeScriptEmitter::new("Tables").render(&model).unwrap();
        assert!(rendered.contains("  rate: number;\n  open: boolean;\n  grid_cells: number[][];\n"));
        assert!(rendered.contains("export interface Tables {\n  boxes: Box[];\n  quests: Quest[];\n}\n"));
    }

    #[test]
    fn rechecks_types_at_render_time() {
        let mut model = fixtures::item_model();
        model.override_first_field_type("uint");
        assert!(TypeScriptEmitter::new("AllConfig").render(&model).is_err());
    }
}
