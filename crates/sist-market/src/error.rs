use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Invalid ticker input: {0}")]
    InvalidInput(String),

    #[error("Market data provider error: {0}")]
    Provider(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Market data request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Malformed provider response: {0}")]
    Decode(String),

    /// The request succeeded but the range contained no observations.
    /// Distinct from failure so callers never render an empty table silently.
    #[error("No data returned for the requested tickers and date range")]
    NoData,
}
