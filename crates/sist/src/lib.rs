//! SIST - Strategic Intelligence & Stock Tracker
//!
//! Two independent pipelines behind one CLI: an LLM-backed competitive
//! strategy report generator and a daily closing-price tracker.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use sist::models::{FiscalPeriod, ReportRequest, SistConfig};
//! use sist::report::{generate_report, CompletionBackend};
//! use sist::market::MarketDataFetcher;
//! ```

pub use sist_cache as cache;
pub use sist_market as market;
pub use sist_models as models;
pub use sist_report as report;

use std::sync::Arc;
use std::time::Duration;

use sist_market::{MarketDataFetcher, YahooConfig, YahooProvider};
use sist_models::SistConfig;
use sist_report::{CompletionConfig, OpenAiClient};

/// Build the completion backend from configuration.
pub fn build_backend(config: &SistConfig) -> OpenAiClient {
    OpenAiClient::new(CompletionConfig {
        model: config.report.model.clone(),
        base_url: config.report.base_url.clone(),
        timeout: Duration::from_secs(config.report.timeout_seconds),
    })
}

/// Build the memoizing market data fetcher from configuration.
pub fn build_fetcher(config: &SistConfig) -> MarketDataFetcher {
    let provider = Arc::new(YahooProvider::new(YahooConfig {
        base_url: config.market.base_url.clone(),
        timeout: Duration::from_secs(config.market.timeout_seconds),
    }));
    MarketDataFetcher::new(
        provider,
        config.market.cache_max_capacity,
        Duration::from_secs(config.market.cache_ttl_seconds),
    )
}
