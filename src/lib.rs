//! sessiongen library root.
//! Exposes the CLI parser, the high-level run() function and the
//! generator/verification modules used by the binary and the tests.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        None => cli::commands::generate::run(cfg, true),
        Some(Commands::Init) => cli::commands::init::handle(cfg),
        Some(cmd @ Commands::Generate { .. }) => cli::commands::generate::handle(cmd, cfg),
        Some(cmd @ Commands::Verify { .. }) => cli::commands::verify::handle(cmd, cfg),
        Some(cmd @ Commands::Config { .. }) => cli::commands::config::handle(cmd, cfg),
        Some(cmd @ Commands::Log { .. }) => cli::commands::log::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load(cli.config.as_deref())?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(custom_schema) = &cli.schema {
        cfg.schema = custom_schema.clone();
    }

    dispatch(&cli, &cfg)
}
