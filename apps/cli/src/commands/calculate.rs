//! Calculate command implementation.
//!
//! Prices a fund's holdings and prints the per-stock breakdown together
//! with the fund-level NAV change.

use anyhow::Result;
use clap::Args;

use fundnav_core::{FundCatalog, NavServiceTrait};

use crate::cli::OutputFormat;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::main_lib::{build_service, load_catalog};
use crate::output::print_breakdowns;

/// Arguments for the calculate command.
#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Fund name, exactly as listed by `fundnav funds`
    #[arg(conflicts_with = "all")]
    pub fund: Option<String>,

    /// Calculate every fund in the holdings file
    #[arg(long)]
    pub all: bool,
}

/// Execute the calculate command.
pub async fn execute(
    args: CalculateArgs,
    config: &CliConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let catalog = load_catalog(config)?;
    let selected = select_funds(&args, &catalog)?;
    let service = build_service(config, catalog, quiet)?;

    let mut breakdowns = Vec::with_capacity(selected.len());
    for name in &selected {
        breakdowns.push(service.calculate(name).await?);
    }

    print_breakdowns(&breakdowns, format)
}

/// Resolve the command line selection against the catalog before any
/// price is requested.
fn select_funds(args: &CalculateArgs, catalog: &FundCatalog) -> CliResult<Vec<String>> {
    if args.all {
        return Ok(catalog.fund_names());
    }

    let name = args.fund.as_deref().ok_or(CliError::NoFundSelected)?;
    match catalog.get(name) {
        Some(fund) => Ok(vec![fund.name.clone()]),
        None => Err(CliError::UnknownFund {
            name: name.to_string(),
            available: catalog.fund_names().join(", "),
        }),
    }
}
