pub mod aggregate;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod field;
pub mod generate;
pub mod header;
pub mod inspect;
pub mod io_utils;
pub mod types;
pub mod value;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging(verbose: bool) {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            let level = if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            };
            builder.filter_module("sheetgen", level);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("Parsed command line: {:?}", cli.command);
    match cli.command {
        Commands::Generate(args) => generate::execute(&args),
        Commands::Inspect(args) => inspect::execute(&args),
    }
}
