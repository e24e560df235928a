use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::nav_aggregator::NavAggregator;
use super::nav_model::NavBreakdown;
use crate::errors::{Error, Result};
use crate::funds::FundCatalog;

/// What a presentation layer needs: pick a fund, calculate it.
#[async_trait]
pub trait NavServiceTrait: Send + Sync {
    /// Selectable fund names, in catalog order.
    fn fund_names(&self) -> Vec<String>;

    /// Calculate the NAV breakdown for the named fund.
    async fn calculate(&self, fund_name: &str) -> Result<NavBreakdown>;
}

pub struct NavService {
    catalog: Arc<FundCatalog>,
    aggregator: NavAggregator,
}

impl NavService {
    pub fn new(catalog: Arc<FundCatalog>, aggregator: NavAggregator) -> Self {
        Self {
            catalog,
            aggregator,
        }
    }

    pub fn catalog(&self) -> &FundCatalog {
        &self.catalog
    }
}

#[async_trait]
impl NavServiceTrait for NavService {
    fn fund_names(&self) -> Vec<String> {
        self.catalog.fund_names()
    }

    async fn calculate(&self, fund_name: &str) -> Result<NavBreakdown> {
        let fund = self
            .catalog
            .get(fund_name)
            .ok_or_else(|| Error::FundNotFound(fund_name.to_string()))?;

        info!(
            "Calculating NAV change for '{}' ({} holdings)",
            fund.name,
            fund.holdings.len()
        );
        Ok(self.aggregator.aggregate(fund).await)
    }
}
