use std::fmt::Write as _;

use super::{EmitError, Emitter, Target, finish};
use crate::{aggregate::AggregateModel, types::csharp_type};

/// C# classes annotated for `System.Text.Json`.
#[derive(Debug, Clone)]
pub struct CSharpEmitter {
    root_name: String,
}

impl CSharpEmitter {
    pub fn new(root_name: &str) -> Self {
        Self {
            root_name: root_name.to_string(),
        }
    }
}

impl Emitter for CSharpEmitter {
    fn target(&self) -> Target {
        Target::CSharp
    }

    fn render(&self, model: &AggregateModel) -> Result<String, EmitError> {
        let mut out = String::new();
        let _ = writeln!(out, "using System.Collections.Generic;");
        let _ = writeln!(out, "using System.Text.Json.Serialization;\n");

        let _ = writeln!(out, "public class {}\n{{", self.root_name);
        for ty in model.types() {
            let _ = writeln!(out, "    [JsonPropertyName(\"{}\")]", ty.json_key);
            let _ = writeln!(
                out,
                "    public List<{}> {} {{ get; set; }}\n",
                ty.name, ty.plural
            );
        }
        let _ = writeln!(out, "}}\n");

        for ty in model.types() {
            let _ = writeln!(out, "public class {}\n{{", ty.name);
            for field in &ty.fields {
                let mapped = csharp_type(&field.raw_type)?;
                let _ = writeln!(out, "    [JsonPropertyName(\"{}\")]", field.raw_name);
                let _ = writeln!(out, "    public {} {} {{ get; set; }}\n", mapped, field.name);
            }
            let _ = writeln!(out, "}}\n");
        }

        Ok(finish(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::fixtures;

    #[test]
    fn renders_root_class_and_properties() {
        let model = fixtures::item_model();
        let rendered = CSharpEmitter::new("AllConfig").render(&model).unwrap();
        assert!(rendered.starts_with(
            "using System.Collections.Generic;\nusing System.Text.Json.Serialization;\n\n"
        ));
        assert!(rendered.contains(
            "public class AllConfig\n{\n    [JsonPropertyName(\"items\")]\n    public List<Item> Items { get; set; }\n\n}\n"
        ));
        assert!(rendered.contains(
            "    [JsonPropertyName(\"dt\")]\n    public List<int> Dt { get; set; }\n"
        ));
        assert!(rendered.contains("    public string Data { get; set; }"));
        assert!(rendered.ends_with("}\n"));
    }

    #[test]
    fn maps_floats_and_grids() {
        let model = fixtures::two_type_model();
        let rendered = CSharpEmitter::new("AllConfig").render(&model).unwrap();
        assert!(rendered.contains("    public double Rate { get; set; }"));
        assert!(rendered.contains("    public bool Open { get; set; }"));
        assert!(rendered.contains("    public List<List<int>> GridCells { get; set; }"));
        assert!(rendered.contains("    public List<Box> Boxes { get; set; }"));
    }

    #[test]
    fn rechecks_types_at_render_time() {
        let mut model = fixtures::item_model();
        model.override_first_field_type("decimal");
        assert!(CSharpEmitter::new("AllConfig").render(&model).is_err());
    }
}
