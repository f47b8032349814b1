use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use sist_cache::MemoryCache;
use sist_models::PriceSeries;
use tracing::{debug, info};

use crate::error::MarketError;
use crate::provider::PriceProvider;

/// Fetches daily closing prices and memoizes results per exact request.
///
/// Identical (tickers, start, end) requests within the cache TTL are served
/// from memory without a second provider round trip.
pub struct MarketDataFetcher {
    provider: Arc<dyn PriceProvider>,
    cache: MemoryCache<PriceSeries>,
}

impl MarketDataFetcher {
    pub fn new(provider: Arc<dyn PriceProvider>, cache_capacity: u64, cache_ttl: Duration) -> Self {
        Self {
            provider,
            cache: MemoryCache::new(cache_capacity, cache_ttl),
        }
    }

    /// Trim whitespace, uppercase, drop empties, and dedupe preserving the
    /// first occurrence.
    pub fn canonicalize_tickers(raw: &[String]) -> Vec<String> {
        let mut canonical: Vec<String> = Vec::new();
        for ticker in raw {
            let symbol = ticker.trim().to_uppercase();
            if !symbol.is_empty() && !canonical.contains(&symbol) {
                canonical.push(symbol);
            }
        }
        canonical
    }

    fn memo_key(tickers: &[String], start: NaiveDate, end: NaiveDate) -> String {
        format!("{}:{start}:{end}", tickers.join(","))
    }

    /// Fetch the daily closing-price series for the inclusive date range.
    pub async fn fetch(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MarketError> {
        let tickers = Self::canonicalize_tickers(tickers);
        if tickers.is_empty() {
            return Err(MarketError::InvalidInput(
                "no ticker symbols given".to_string(),
            ));
        }
        if start > end {
            return Err(MarketError::InvalidInput(format!(
                "start {start} is after end {end}"
            )));
        }

        let key = Self::memo_key(&tickers, start, end);
        if let Some(series) = self.cache.get(&key).await {
            debug!(key = %key, "Serving price series from memo cache");
            return Ok(series);
        }

        info!(
            tickers = %tickers.join(","),
            %start,
            %end,
            provider = self.provider.name(),
            "Fetching daily prices"
        );
        let frame = self.provider.fetch_daily(&tickers, start, end).await?;
        if frame.is_empty() {
            return Err(MarketError::NoData);
        }

        let series = frame.into_series(&tickers)?;
        if series.is_empty() {
            return Err(MarketError::NoData);
        }

        self.cache.insert(key, series.clone()).await;
        Ok(series)
    }

    /// Number of memoized series currently held.
    pub fn cached_entries(&self) -> u64 {
        self.cache.entry_count()
    }
}
