//! Market data pipeline: provider abstraction, Yahoo chart client, and the
//! memoizing fetcher that normalizes responses into a `PriceSeries`.

pub mod error;
pub mod fetcher;
pub mod provider;
pub mod yahoo;

pub use error::MarketError;
pub use fetcher::MarketDataFetcher;
pub use provider::{PriceColumn, PriceField, PriceFrame, PriceProvider};
pub use yahoo::{YahooConfig, YahooProvider};
