use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fundnav_core::diagnostics::{DiagnosticSink, NoOpDiagnosticSink};
use fundnav_core::{FundCatalog, NavAggregator, NavService, PriceResolver};
use fundnav_market_data::YahooProvider;

use crate::config::CliConfig;
use crate::console_sink::ConsoleDiagnosticSink;

/// Logs go to stderr so that JSON and CSV output on stdout stays parseable.
pub fn init_tracing() {
    let log_format = std::env::var("FUNDNAV_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn load_catalog(config: &CliConfig) -> anyhow::Result<FundCatalog> {
    FundCatalog::load(&config.holdings_path).with_context(|| {
        format!(
            "Could not load holdings from {} (set FUNDNAV_HOLDINGS or pass --holdings)",
            config.holdings_path.display()
        )
    })
}

/// Wire the catalog, the Yahoo provider and a diagnostic sink into a service.
pub fn build_service(
    config: &CliConfig,
    catalog: FundCatalog,
    quiet: bool,
) -> anyhow::Result<NavService> {
    let provider = Arc::new(YahooProvider::new()?);
    let sink: Arc<dyn DiagnosticSink> = if quiet {
        Arc::new(NoOpDiagnosticSink)
    } else {
        Arc::new(ConsoleDiagnosticSink)
    };
    let resolver = PriceResolver::new(provider, sink).with_options(config.resolver_options());
    tracing::debug!("Resolver options: {:?}", resolver.options());

    Ok(NavService::new(
        Arc::new(catalog),
        NavAggregator::new(resolver),
    ))
}
