//! Funds command implementation.
//!
//! Lists the funds in the holdings file. Needs no network access.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use fundnav_core::nav::{format_percent, CHANGE_DECIMALS};
use fundnav_core::Fund;

use crate::cli::OutputFormat;
use crate::config::CliConfig;
use crate::main_lib::load_catalog;
use crate::output::{print_csv, print_json, print_table};

/// One selectable fund.
#[derive(Debug, Serialize, Tabled)]
pub struct FundSummary {
    #[serde(rename = "Fund")]
    #[tabled(rename = "Fund")]
    pub name: String,
    #[serde(rename = "Holdings")]
    #[tabled(rename = "Holdings")]
    pub holdings: usize,
    #[serde(rename = "Total Weight")]
    #[tabled(rename = "Total Weight")]
    pub total_weight: String,
}

impl From<&Fund> for FundSummary {
    fn from(fund: &Fund) -> Self {
        Self {
            name: fund.name.clone(),
            holdings: fund.holdings.len(),
            total_weight: format_percent(fund.total_weight(), CHANGE_DECIMALS),
        }
    }
}

/// Execute the funds command.
pub fn execute(config: &CliConfig, format: OutputFormat) -> Result<()> {
    let catalog = load_catalog(config)?;
    let summaries: Vec<FundSummary> = catalog.funds().iter().map(FundSummary::from).collect();

    match format {
        OutputFormat::Table => print_table(&summaries),
        OutputFormat::Json => print_json(&summaries)?,
        OutputFormat::Csv => print_csv(&summaries)?,
    }
    Ok(())
}
