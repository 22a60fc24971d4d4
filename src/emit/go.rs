use std::fmt::Write as _;

use super::{EmitError, Emitter, Target, finish};
use crate::{aggregate::AggregateModel, types::go_type};

/// Go structs with `json` tags; the root struct comes first.
#[derive(Debug, Clone)]
pub struct GoEmitter {
    package: String,
    root_name: String,
}

impl GoEmitter {
    pub fn new(package: &str, root_name: &str) -> Self {
        Self {
            package: package.to_string(),
            root_name: root_name.to_string(),
        }
    }
}

impl Emitter for GoEmitter {
    fn target(&self) -> Target {
        Target::Go
    }

    fn render(&self, model: &AggregateModel) -> Result<String, EmitError> {
        let mut out = String::new();
        let _ = writeln!(out, "package {}\n", self.package);

        let _ = writeln!(out, "type {} struct {{", self.root_name);
        for ty in model.types() {
            let _ = writeln!(out, "\t{} []{} `json:\"{}\"`", ty.plural, ty.name, ty.json_key);
        }
        let _ = writeln!(out, "}}\n");

        for ty in model.types() {
            let _ = writeln!(out, "type {} struct {{", ty.name);
            for field in &ty.fields {
                let mapped = go_type(&field.raw_type)?;
                let _ = writeln!(
                    out,
                    "\t{} {} `json:\"{}\"`",
                    field.name, mapped, field.raw_name
                );
            }
            let _ = writeln!(out, "}}\n");
        }

        Ok(finish(out))
    }
}
