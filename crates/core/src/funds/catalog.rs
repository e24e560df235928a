use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use super::funds_model::Fund;
use crate::errors::{ConfigError, Result};

/// On-disk shape of the holdings file.
#[derive(Deserialize)]
struct CatalogFile {
    funds: Vec<Fund>,
}

/// Read-only catalog of the funds a user can pick from.
///
/// Funds keep the order they were declared in. Names are unique and
/// compared exactly.
#[derive(Debug, Clone, Default)]
pub struct FundCatalog {
    funds: Vec<Fund>,
}

impl FundCatalog {
    /// Build a catalog, rejecting duplicate or empty fund names and empty tickers.
    pub fn new(funds: Vec<Fund>) -> Result<Self> {
        let mut seen = HashSet::new();
        for fund in &funds {
            if fund.name.trim().is_empty() {
                return Err(ConfigError::EmptyFundName.into());
            }
            if !seen.insert(fund.name.as_str()) {
                return Err(ConfigError::DuplicateFund(fund.name.clone()).into());
            }
            if fund.holdings.iter().any(|h| h.ticker.trim().is_empty()) {
                return Err(ConfigError::EmptyTicker {
                    fund: fund.name.clone(),
                }
                .into());
            }
        }
        Ok(Self { funds })
    }

    /// Parse a catalog from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        Self::new(file.funds)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&contents)?;
        debug!(
            "Loaded {} funds from holdings file {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn fund_names(&self) -> Vec<String> {
        self.funds.iter().map(|f| f.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Fund> {
        self.funds.iter().find(|f| f.name == name)
    }

    pub fn funds(&self) -> &[Fund] {
        &self.funds
    }

    pub fn len(&self) -> usize {
        self.funds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }
}
