//! fundnav - approximate a mutual fund's daily NAV change from its holdings.
//!
//! # Usage
//!
//! ```bash
//! # List the funds in the holdings file
//! fundnav funds
//!
//! # Per-stock breakdown and total for one fund
//! fundnav calculate "Quant Small Cap Fund"
//!
//! # Every fund, as JSON
//! fundnav --format json calculate --all
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod console_sink;
mod error;
mod main_lib;
mod output;

use cli::{Cli, Commands};
use config::CliConfig;
use main_lib::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let config = CliConfig::from_env();
    init_tracing();
    let cli = Cli::parse();

    let config = config.with_overrides(&cli.settings);
    tracing::debug!("Holdings file: {}", config.holdings_path.display());

    match cli.command {
        Commands::Funds => commands::funds::execute(&config, cli.format)?,
        Commands::Calculate(args) => {
            commands::calculate::execute(args, &config, cli.format, cli.quiet).await?
        }
    }

    Ok(())
}
