//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::CalculateArgs;

/// fundnav - daily NAV change of a mutual fund from its disclosed holdings
#[derive(Parser)]
#[command(name = "fundnav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress per-ticker warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for values otherwise read from the environment.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Holdings file (JSON) [env: FUNDNAV_HOLDINGS]
    #[arg(long, global = true, value_name = "PATH")]
    pub holdings: Option<PathBuf>,

    /// Calendar days of price history to request [env: FUNDNAV_LOOKBACK_DAYS]
    #[arg(long, global = true, value_name = "DAYS")]
    pub lookback_days: Option<i64>,

    /// Per-ticker request timeout in seconds [env: FUNDNAV_REQUEST_TIMEOUT_SECS]
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Concurrent price requests [env: FUNDNAV_MAX_CONCURRENCY]
    #[arg(long, global = true, value_name = "N")]
    pub concurrency: Option<usize>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the funds in the holdings file
    Funds,

    /// Calculate the NAV contribution breakdown for a fund
    Calculate(CalculateArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
