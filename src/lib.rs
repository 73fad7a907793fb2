//! shiftlog library root.
//! Exposes the CLI parser, the high-level run() function and the core
//! time-tracking modules (shift lifecycle, history, analytics, screenshots).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod notify;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use notify::{LogMailer, Mailer};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, mailer: &dyn Mailer) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Shift { .. } => cli::commands::shift::handle(cli, cfg),
        Commands::Analytics { .. } => cli::commands::analytics::handle(cli, cfg),
        Commands::Screenshot { .. } => cli::commands::screenshot::handle(cli, cfg),
        Commands::Employee { .. } => cli::commands::employee::handle(cli, cfg, mailer),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init()
        .ok();

    let cli = Cli::parse();

    // load the config once
    let mut cfg = Config::load()?;

    // --db overrides the configured database
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    let mailer = LogMailer::from_config(&cfg);

    dispatch(&cli, &cfg, &mailer)
}
