pub mod check;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod fields;
pub mod header;
pub mod integrity;
pub mod io_utils;
pub mod parser;
pub mod preview;
pub mod record;
pub mod session;
pub mod stats;
pub mod table;
pub mod validate;
pub mod verify;
pub mod writer;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_integrity", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(args) => preview::execute(&args),
        Commands::Validate(args) => verify::execute(&args),
        Commands::Check(args) => check::execute(&args),
        Commands::Export(args) => export::execute(&args),
        Commands::Stats(args) => stats::execute(&args),
    }
}
