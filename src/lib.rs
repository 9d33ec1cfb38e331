//! shopload library root.
//! Load report and free/busy schedule for machines and work units,
//! backed by SQLite and driven from the command line.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
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
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Resource { .. } => cli::commands::resource::handle(&cli.command, cfg),
        Commands::Order { .. } => cli::commands::order::handle(&cli.command, cfg),
        Commands::Slot { .. } => cli::commands::slot::handle(&cli.command, cfg),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; command line overrides win
    let mut cfg = Config::load()?;
    cfg.apply_overrides(cli.db.as_deref(), cli.tz.as_deref())?;

    dispatch(&cli, &cfg)
}
