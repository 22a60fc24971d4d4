//! Artifact emitters.
//!
//! Every emitter renders the whole [`AggregateModel`] to one text blob and
//! re-resolves field types through its own table, so a type that slipped past
//! parsing still fails here. Types are emitted in aggregate order and fields
//! in column order.

mod csharp;
mod go;
mod json;
mod typescript;

use std::{collections::BTreeSet, fmt, str::FromStr};

use anyhow::{Result, anyhow, bail};
use itertools::Itertools;
use thiserror::Error;

use crate::{aggregate::AggregateModel, error::SchemaError};

pub use csharp::CSharpEmitter;
pub use go::GoEmitter;
pub use json::JsonEmitter;
pub use typescript::TypeScriptEmitter;

pub const DEFAULT_ROOT_NAME: &str = "AllConfig";
pub const DEFAULT_GO_PACKAGE: &str = "config";

#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("serializing data")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    Go,
    CSharp,
    TypeScript,
    Data,
}

impl Target {
    pub const CODE: [Target; 3] = [Target::Go, Target::CSharp, Target::TypeScript];

    pub fn token(&self) -> &'static str {
        match self {
            Target::Go => "go",
            Target::CSharp => "cs",
            Target::TypeScript => "ts",
            Target::Data => "json",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Target::Go => "go.gen.go",
            Target::CSharp => "cs.gen.cs",
            Target::TypeScript => "ts.gen.ts",
            Target::Data => "all.json",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Target {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "go" => Ok(Target::Go),
            "cs" => Ok(Target::CSharp),
            "ts" => Ok(Target::TypeScript),
            other => Err(anyhow!("unknown target '{other}'")),
        }
    }
}

/// Parses `--lang`: `all`/blank, or a comma list of `go`, `cs`, `ts`.
pub fn parse_langs(value: &str) -> Result<BTreeSet<Target>> {
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() || normalized == "all" {
        return Ok(Target::CODE.into_iter().collect());
    }
    let mut targets = BTreeSet::new();
    for token in normalized.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let target = token.parse::<Target>().map_err(|_| {
            anyhow!(
                "invalid --lang '{value}' (expect {}|all or comma-separated)",
                Target::CODE.iter().join("|")
            )
        })?;
        targets.insert(target);
    }
    if targets.is_empty() {
        bail!("invalid --lang '{value}' (no targets)");
    }
    Ok(targets)
}

/// Renders one artifact from the aggregate.
pub trait Emitter {
    fn target(&self) -> Target;

    fn render(&self, model: &AggregateModel) -> Result<String, EmitError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub go_package: String,
    pub root_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            go_package: DEFAULT_GO_PACKAGE.to_string(),
            root_name: DEFAULT_ROOT_NAME.to_string(),
        }
    }
}

pub fn emitter_for(target: Target, options: &EmitOptions) -> Box<dyn Emitter> {
    match target {
        Target::Go => Box::new(GoEmitter::new(&options.go_package, &options.root_name)),
        Target::CSharp => Box::new(CSharpEmitter::new(&options.root_name)),
        Target::TypeScript => Box::new(TypeScriptEmitter::new(&options.root_name)),
        Target::Data => Box::new(JsonEmitter),
    }
}

/// Renders every requested target; nothing is returned unless all succeed.
pub fn render_all<'a, I>(
    model: &AggregateModel,
    targets: I,
    options: &EmitOptions,
) -> Result<Vec<(Target, String)>, EmitError>
where
    I: IntoIterator<Item = &'a Target>,
{
    targets
        .into_iter()
        .map(|&target| {
            let emitter = emitter_for(target, options);
            Ok((emitter.target(), emitter.render(model)?))
        })
        .collect()
}

fn finish(mut output: String) -> String {
    let trimmed = output.trim_end_matches('\n').len();
    output.truncate(trimmed);
    output.push('\n');
    output
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_langs_accepts_all_and_lists() {
        assert_eq!(parse_langs("all").unwrap().len(), 3);
        assert_eq!(parse_langs("").unwrap().len(), 3);
        let picked = parse_langs(" TS, go ,").unwrap();
        assert_eq!(
            picked.into_iter().collect::<Vec<_>>(),
            vec![Target::Go, Target::TypeScript]
        );
    }

    #[test]
    fn parse_langs_rejects_unknown_or_empty_lists() {
        let err = parse_langs("go,rust").unwrap_err();
        assert!(err.to_string().contains("invalid --lang"));
        assert!(parse_langs(",,").unwrap_err().to_string().contains("no targets"));
    }

    #[test]
    fn render_all_produces_every_artifact() {
        let model = fixtures::item_model();
        let targets = [Target::Go, Target::CSharp, Target::TypeScript, Target::Data];
        let rendered = render_all(&model, &targets, &EmitOptions::default()).unwrap();
        assert_eq!(rendered.len(), 4);
        for (_, text) in &rendered {
            assert!(text.ends_with('\n'));
            assert!(!text.ends_with("\n\n"));
        }
    }
}
