use std::path::PathBuf;
use std::time::Duration;

use fundnav_core::nav::{
    ResolverOptions, DEFAULT_LOOKBACK_DAYS, DEFAULT_REQUEST_TIMEOUT, MAX_LOOKBACK_DAYS,
};

use crate::cli::SettingsArgs;

const DEFAULT_HOLDINGS_PATH: &str = "config/funds.json";

pub struct CliConfig {
    pub holdings_path: PathBuf,
    pub lookback_days: i64,
    pub request_timeout: Duration,
    pub max_concurrency: Option<usize>,
}

impl CliConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparsable or non-positive numbers fall back to their defaults, as
    /// does a lookback longer than [`MAX_LOOKBACK_DAYS`].
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let holdings_path = get("FUNDNAV_HOLDINGS")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HOLDINGS_PATH));
        let lookback_days = get("FUNDNAV_LOOKBACK_DAYS")
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(lookback_in_range)
            .unwrap_or(DEFAULT_LOOKBACK_DAYS);
        let request_timeout = get("FUNDNAV_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let max_concurrency = get("FUNDNAV_MAX_CONCURRENCY")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0);
        Self {
            holdings_path,
            lookback_days,
            request_timeout,
            max_concurrency,
        }
    }

    /// Command-line flags win over the environment.
    pub fn with_overrides(mut self, args: &SettingsArgs) -> Self {
        if let Some(path) = &args.holdings {
            self.holdings_path = path.clone();
        }
        if let Some(days) = args.lookback_days.filter(lookback_in_range) {
            self.lookback_days = days;
        }
        if let Some(secs) = args.timeout_secs.filter(|s| *s > 0) {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(n) = args.concurrency.filter(|n| *n > 0) {
            self.max_concurrency = Some(n);
        }
        self
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            lookback_days: self.lookback_days,
            request_timeout: self.request_timeout,
            max_concurrency: self.max_concurrency,
        }
    }
}

fn lookback_in_range(days: &i64) -> bool {
    (1..=MAX_LOOKBACK_DAYS).contains(days)
}
