//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use fundnav_core::{BreakdownRow, NavBreakdown};

use crate::cli::OutputFormat;

/// One breakdown line as shown to the user, every figure already rounded.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct BreakdownLine {
    #[serde(rename = "Fund")]
    #[tabled(skip)]
    pub fund: String,
    #[serde(rename = "Stock")]
    #[tabled(rename = "Stock")]
    pub stock: String,
    #[serde(rename = "Weight")]
    #[tabled(rename = "Weight")]
    pub weight: String,
    #[serde(rename = "Daily Change")]
    #[tabled(rename = "Daily Change")]
    pub daily_change: String,
    #[serde(rename = "NAV Contribution")]
    #[tabled(rename = "NAV Contribution")]
    pub nav_contribution: String,
    #[serde(rename = "Cumulative NAV Contribution")]
    #[tabled(rename = "Cumulative NAV Contribution")]
    pub cumulative_nav_contribution: String,
}

impl BreakdownLine {
    pub fn new(fund: &str, row: &BreakdownRow) -> Self {
        Self {
            fund: fund.to_string(),
            stock: row.ticker.clone(),
            weight: row.weight_display(),
            daily_change: row.daily_change_display(),
            nav_contribution: row.contribution_display(),
            cumulative_nav_contribution: row.cumulative_display(),
        }
    }
}

pub fn breakdown_lines(breakdown: &NavBreakdown) -> Vec<BreakdownLine> {
    breakdown
        .rows
        .iter()
        .map(|row| BreakdownLine::new(&breakdown.fund_name, row))
        .collect()
}

/// Prints the calculated breakdowns in the requested format.
///
/// JSON keeps full precision; table and CSV show rounded figures.
pub fn print_breakdowns(breakdowns: &[NavBreakdown], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            for breakdown in breakdowns {
                print_breakdown_table(breakdown);
            }
            Ok(())
        }
        OutputFormat::Json => match breakdowns {
            [single] => print_json(single),
            many => print_json(many),
        },
        OutputFormat::Csv => {
            let lines: Vec<BreakdownLine> = breakdowns.iter().flat_map(breakdown_lines).collect();
            print_csv(&lines)
        }
    }
}

fn print_breakdown_table(breakdown: &NavBreakdown) {
    print_header(&breakdown.fund_name);
    println!(
        "{} {}",
        "Total NAV Change:".bold(),
        colorize_signed(&breakdown.total_display())
    );
    println!();
    if breakdown.is_empty() {
        println!("No holdings.");
    } else {
        print_table(&breakdown_lines(breakdown));
    }
}

/// Green for gains, red for losses, plain for flat.
fn colorize_signed(value: &str) -> String {
    if value.starts_with('-') {
        value.red().to_string()
    } else if value.trim_end_matches('%').chars().any(|c| c.is_ascii_digit() && c != '0') {
        value.green().to_string()
    } else {
        value.to_string()
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

/// Prints data as JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
pub fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
