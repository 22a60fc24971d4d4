use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Generate typed config models and JSON data from annotated spreadsheets",
    long_about = None
)]
pub struct Cli {
    /// Enable debug logging for sheet detection and emission
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate Go, C#, and TypeScript models plus all.json from every input sheet
    Generate(GenerateArgs),
    /// Show the detected header layout and field definitions of each sheet
    Inspect(InspectArgs),
}

#[derive(Debug, Args, Default)]
pub struct GenerateArgs {
    /// Input workbook, tab-separated file, or directory of workbooks (default: xls)
    #[arg(short = 'i', long = "in")]
    pub input: Option<PathBuf>,
    /// Output directory for generated files (default: .)
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,
    /// Export flag restricting fields to a build: server|client
    #[arg(long = "flag")]
    pub flag: Option<String>,
    /// Target languages: go|cs|ts|all or a comma-separated list (default: all)
    #[arg(long = "lang")]
    pub lang: Option<String>,
    /// Go package name written into go.gen.go (default: config)
    #[arg(long = "pkg")]
    pub pkg: Option<String>,
    /// Export all.json data (default: true)
    #[arg(long = "json")]
    pub json: Option<bool>,
    /// Name of the root type holding every sheet (default: AllConfig)
    #[arg(long = "root-name")]
    pub root_name: Option<String>,
    /// Character encoding of tab-separated inputs (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// YAML run configuration; explicit flags take precedence
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Input workbook, tab-separated file, or directory of workbooks
    #[arg(short = 'i', long = "in", default_value = "xls")]
    pub input: PathBuf,
    /// Export flag restricting fields to a build: server|client
    #[arg(long = "flag")]
    pub flag: Option<String>,
    /// Character encoding of tab-separated inputs (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}
