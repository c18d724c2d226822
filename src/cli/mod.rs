//! CLI module for the member search service
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API
//! - `seed`: insert the demo member/team data set

pub mod seed;
pub mod serve;

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Member Search - dynamic member/team queries over HTTP
#[derive(Parser)]
#[command(name = "member-search")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(ServeArgs),

    /// Insert demo teams and members into the configured store
    Seed(SeedArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Seed this many demo members before serving (useful with the memory backend)
    #[arg(long)]
    pub seed: Option<usize>,
}

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Number of members to insert
    #[arg(long, default_value_t = 4)]
    pub count: usize,
}

/// Load `.env`, then configuration, then initialize logging
fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    config
}
