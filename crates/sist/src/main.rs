use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sist::{build_backend, build_fetcher};
use sist_market::MarketError;
use sist_models::{FiscalPeriod, ReportRequest, SistConfig};
use sist_report::{generate_report, ReportError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sist", about = "Strategic Intelligence & Stock Tracker")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/sist.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a competitive strategy report for three companies
    Report {
        /// Company to analyze; pass three times (defaults: Apple, Google, Microsoft)
        #[arg(long = "company", default_values = ["Apple", "Google", "Microsoft"])]
        companies: Vec<String>,

        /// Fiscal period: 2022-2023, 2023-2024, 2024-2025 or 2022-2025
        #[arg(long, default_value = "2022-2025")]
        period: FiscalPeriod,

        /// API key for the completion endpoint (falls back to OPENAI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Write the report CSV to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Load daily closing prices for a set of tickers
    Prices {
        /// Ticker symbol; pass up to three times (defaults: AAPL, GOOGL, MSFT)
        #[arg(long = "ticker", default_values = ["AAPL", "GOOGL", "MSFT"])]
        tickers: Vec<String>,

        /// Fiscal period: 2022-2023, 2023-2024, 2024-2025 or 2022-2025
        #[arg(long, default_value = "2022-2025")]
        period: FiscalPeriod,

        /// Write the price CSV to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("Failed to read config: {}", cli.config))?;
    let config: SistConfig =
        toml::from_str(&config_str).with_context(|| "Failed to parse config")?;

    match cli.command {
        Command::Report {
            companies,
            period,
            api_key,
            output,
        } => run_report(&config, companies, period, api_key, output).await,
        Command::Prices {
            tickers,
            period,
            output,
        } => run_prices(&config, tickers, period, output).await,
    }
}

async fn run_report(
    config: &SistConfig,
    companies: Vec<String>,
    period: FiscalPeriod,
    api_key: Option<String>,
    output: Option<String>,
) -> Result<()> {
    let companies: [String; 3] = companies.try_into().map_err(|got: Vec<String>| {
        anyhow::anyhow!("Expected exactly three --company values, got {}", got.len())
    })?;
    let request = ReportRequest::new(
        [
            companies[0].as_str(),
            companies[1].as_str(),
            companies[2].as_str(),
        ],
        period,
    )?;

    // Credential is resolved once here and threaded down explicitly.
    let api_key = api_key
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .unwrap_or_default();

    let backend = build_backend(config);
    let report = match generate_report(&backend, &api_key, &request).await {
        Ok(report) => report,
        Err(err) => {
            // Show the raw response before the failure message so a bad
            // model reply can be diagnosed.
            if let ReportError::Parse { raw, .. } | ReportError::ColumnCount { raw, .. } = &err {
                eprintln!("--- raw model response ---");
                eprintln!("{raw}");
                eprintln!("--------------------------");
            }
            return Err(anyhow::anyhow!("AI analysis failed: {err}"));
        }
    };

    let csv_text = report.to_csv().context("Failed to serialize report CSV")?;
    write_output(&csv_text, output.as_deref())
}

async fn run_prices(
    config: &SistConfig,
    tickers: Vec<String>,
    period: FiscalPeriod,
    output: Option<String>,
) -> Result<()> {
    let fetcher = build_fetcher(config);
    let (start, end) = period.date_range();

    let series = match fetcher.fetch(&tickers, start, end).await {
        Ok(series) => series,
        Err(MarketError::NoData) => {
            return Err(anyhow::anyhow!(
                "No data found. Check your ticker symbols and date range."
            ));
        }
        Err(err) => return Err(anyhow::anyhow!("Market fetch failed: {err}")),
    };

    let csv_text = series.to_csv().context("Failed to serialize price CSV")?;
    write_output(&csv_text, output.as_deref())
}

fn write_output(csv_text: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, csv_text).with_context(|| format!("Failed to write {path}"))?;
            tracing::info!(path, "Wrote CSV");
        }
        None => print!("{csv_text}"),
    }
    Ok(())
}
