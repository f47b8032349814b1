use serde::{Deserialize, Serialize};

/// Top-level configuration for SIST.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SistConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub market: MarketConfig,
}

/// Configuration for the strategy report pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Completion model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the chat-completion API.
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,
    /// Timeout in seconds for one completion request.
    #[serde(default = "default_report_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_completion_base_url(),
            timeout_seconds: default_report_timeout(),
        }
    }
}

/// Configuration for the market data pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketConfig {
    /// Base URL of the daily-chart endpoint.
    #[serde(default = "default_chart_base_url")]
    pub base_url: String,
    /// Timeout in seconds for one price request.
    #[serde(default = "default_market_timeout")]
    pub timeout_seconds: u64,
    /// Maximum number of memoized price series kept in memory.
    #[serde(default = "default_cache_capacity")]
    pub cache_max_capacity: u64,
    /// TTL in seconds for memoized price series.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: default_chart_base_url(),
            timeout_seconds: default_market_timeout(),
            cache_max_capacity: default_cache_capacity(),
            cache_ttl_seconds: default_cache_ttl(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}
fn default_completion_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_report_timeout() -> u64 {
    60
}
fn default_chart_base_url() -> String {
    "https://query1.finance.yahoo.com/v8/finance/chart".to_string()
}
fn default_market_timeout() -> u64 {
    30
}
fn default_cache_capacity() -> u64 {
    64
}
fn default_cache_ttl() -> u64 {
    900
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_example_config() {
        let toml_str = r#"
[report]
model = "gpt-4o-mini"
base_url = "https://api.openai.com/v1"
timeout_seconds = 45

[market]
base_url = "https://query1.finance.yahoo.com/v8/finance/chart"
timeout_seconds = 20
cache_max_capacity = 32
cache_ttl_seconds = 600
"#;
        let config: SistConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.report.model, "gpt-4o-mini");
        assert_eq!(config.report.timeout_seconds, 45);
        assert_eq!(config.market.cache_max_capacity, 32);
    }

    #[test]
    fn deserialize_minimal_config() {
        let config: SistConfig = toml::from_str("").unwrap();
        assert_eq!(config.report.model, "gpt-4o");
        assert_eq!(config.market.timeout_seconds, 30);
        assert_eq!(config.market.cache_ttl_seconds, 900);
    }

    #[test]
    fn partial_section_keeps_field_defaults() {
        let toml_str = r#"
[report]
model = "gpt-4o-mini"
"#;
        let config: SistConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.report.model, "gpt-4o-mini");
        assert_eq!(config.report.base_url, "https://api.openai.com/v1");
        assert_eq!(config.report.timeout_seconds, 60);
    }

    #[test]
    fn roundtrip_config() {
        let config = SistConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: SistConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
