//! Run configuration.
//!
//! Values come from three layers, highest precedence first: explicit CLI
//! flags, an optional YAML file passed with `--config`, and built-in defaults.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use encoding_rs::Encoding;
use serde::Deserialize;

use crate::{
    cli::GenerateArgs,
    emit::{DEFAULT_GO_PACKAGE, DEFAULT_ROOT_NAME, EmitOptions, Target, parse_langs},
    field::ExportFilter,
    io_utils,
};

/// Keys accepted in a `--config` YAML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(rename = "in")]
    pub input: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub flag: Option<String>,
    pub lang: Option<String>,
    pub pkg: Option<String>,
    pub json: Option<bool>,
    pub root_name: Option<String>,
    pub input_encoding: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Opening config file {path:?}"))?;
        Self::from_yaml(&raw).with_context(|| format!("Parsing config file {path:?}"))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub out: PathBuf,
    pub filter: ExportFilter,
    pub targets: BTreeSet<Target>,
    pub emit: EmitOptions,
    pub encoding: &'static Encoding,
}

impl GenerateOptions {
    pub fn resolve(args: &GenerateArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Self::merge(args, file)
    }

    pub fn merge(args: &GenerateArgs, file: ConfigFile) -> Result<Self> {
        let input = args
            .input
            .clone()
            .or(file.input)
            .unwrap_or_else(|| PathBuf::from(io_utils::DEFAULT_INPUT_DIR));
        let out = args
            .out
            .clone()
            .or(file.out)
            .unwrap_or_else(|| PathBuf::from("."));
        let filter = ExportFilter::parse(args.flag.as_deref().or(file.flag.as_deref()))?;

        let mut targets = parse_langs(args.lang.as_deref().or(file.lang.as_deref()).unwrap_or("all"))?;
        if args.json.or(file.json).unwrap_or(true) {
            targets.insert(Target::Data);
        }

        let go_package = args
            .pkg
            .clone()
            .or(file.pkg)
            .unwrap_or_else(|| DEFAULT_GO_PACKAGE.to_string());
        let root_name = args
            .root_name
            .clone()
            .or(file.root_name)
            .unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string());
        ensure!(!go_package.trim().is_empty(), "Go package name cannot be empty");
        ensure!(!root_name.trim().is_empty(), "Root type name cannot be empty");

        let encoding =
            io_utils::resolve_encoding(args.input_encoding.as_deref().or(file.input_encoding.as_deref()))?;

        Ok(Self {
            input,
            out,
            filter,
            targets,
            emit: EmitOptions {
                go_package,
                root_name,
            },
            encoding,
        })
    }
}
