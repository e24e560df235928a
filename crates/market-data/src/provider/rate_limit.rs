//! Rate limiting configuration for providers.

use std::time::Duration;

/// Rate limiting configuration for a provider.
///
/// Controls how aggressively callers fan out requests to a provider to
/// avoid hitting its rate limits and getting blocked.
#[derive(Clone, Debug, PartialEq)]
pub struct RateLimit {
    /// Maximum concurrent requests to this provider.
    pub max_concurrency: usize,

    /// Minimum delay between request batches.
    pub min_delay: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            min_delay: Duration::from_millis(100),
        }
    }
}
