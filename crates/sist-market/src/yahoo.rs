use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::MarketError;
use crate::provider::{PriceColumn, PriceField, PriceFrame, PriceProvider};

/// Configuration for the Yahoo chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

// The chart endpoint rejects clients without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
    #[serde(default)]
    adjclose: Vec<AdjCloseBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseBlock {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Daily price provider backed by the Yahoo v8 chart API.
///
/// One GET per symbol; responses are merged into a two-level frame
/// (field × ticker) for the normalizer to collapse.
pub struct YahooProvider {
    http: reqwest::Client,
    config: YahooConfig,
}

impl YahooProvider {
    pub fn new(config: YahooConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch one symbol's chart. `Ok(None)` means the endpoint answered but
    /// has no data for the symbol (unknown or delisted).
    async fn fetch_symbol(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<ChartResult>, MarketError> {
        // period2 is exclusive upstream; push it one day past the inclusive end.
        let period1 = start.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc().timestamp();
        let period2 = end
            .checked_add_days(Days::new(1))
            .unwrap_or(end)
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc()
            .timestamp();

        debug!(symbol, period1, period2, "Requesting daily chart");

        let envelope = tokio::time::timeout(self.config.timeout, async {
            let response = self
                .http
                .get(format!("{}/{symbol}", self.config.base_url))
                .header("User-Agent", USER_AGENT)
                .query(&[
                    ("period1", period1.to_string()),
                    ("period2", period2.to_string()),
                    ("interval", "1d".to_string()),
                    ("events", "div,split".to_string()),
                    ("includeAdjustedClose", "true".to_string()),
                ])
                .send()
                .await
                .map_err(|e| MarketError::Network(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| MarketError::Network(e.to_string()))?;

            serde_json::from_str::<ChartEnvelope>(&body).map_err(|e| {
                if status.is_success() {
                    MarketError::Decode(format!("{symbol}: {e}"))
                } else {
                    MarketError::Provider(format!("{symbol}: HTTP {status}"))
                }
            })
        })
        .await
        .map_err(|_| MarketError::Timeout(self.config.timeout.as_secs()))??;

        if let Some(error) = envelope.chart.error {
            warn!(symbol, code = %error.code, description = %error.description, "No chart data");
            return Ok(None);
        }

        Ok(envelope
            .chart
            .result
            .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0))))
    }
}

/// Merge one symbol's chart result into the two-level field × ticker map.
/// The close column prefers the adjusted close when the endpoint sends one.
fn append_symbol_columns(
    fields: &mut BTreeMap<PriceField, BTreeMap<String, PriceColumn>>,
    symbol: &str,
    result: &ChartResult,
) {
    let dates: Vec<Option<NaiveDate>> = result
        .timestamp
        .iter()
        .map(|ts| DateTime::from_timestamp(*ts, 0).map(|dt| dt.date_naive()))
        .collect();

    let empty = QuoteBlock::default();
    let quote = result.indicators.quote.first().unwrap_or(&empty);
    let closes = result
        .indicators
        .adjclose
        .first()
        .map(|block| &block.adjclose)
        .unwrap_or(&quote.close);

    let columns: [(PriceField, &Vec<Option<f64>>); 4] = [
        (PriceField::Open, &quote.open),
        (PriceField::High, &quote.high),
        (PriceField::Low, &quote.low),
        (PriceField::Close, closes),
    ];

    for (field, values) in columns {
        let column = fields
            .entry(field)
            .or_default()
            .entry(symbol.to_string())
            .or_default();
        for (i, date) in dates.iter().enumerate() {
            let observation = values.get(i).copied().flatten();
            if let (Some(date), Some(value)) = (date, observation) {
                if let Ok(price) = Decimal::try_from(value) {
                    column.insert(*date, price);
                }
            }
        }
    }
}

#[async_trait]
impl PriceProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_daily(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceFrame, MarketError> {
        let mut fields = BTreeMap::new();

        for symbol in tickers {
            match self.fetch_symbol(symbol, start, end).await? {
                Some(result) => append_symbol_columns(&mut fields, symbol, &result),
                None => continue,
            }
        }

        Ok(PriceFrame::Fields(fields))
    }
}
