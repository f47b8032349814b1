//! Strategy report pipeline: prompt builder, completion client, and the
//! tabular normalizer that turns raw model text into a `StrategyReport`.

pub mod client;
pub mod error;
pub mod parser;
pub mod prompts;

pub use client::{CompletionBackend, CompletionConfig, OpenAiClient};
pub use error::ReportError;
pub use parser::{parse_report, strip_code_fences};
pub use prompts::report_prompt;

use sist_models::{ReportRequest, StrategyReport};
use tracing::info;

/// Run the full report pipeline: build the prompt, call the completion
/// backend, and normalize the response into a report.
pub async fn generate_report(
    backend: &dyn CompletionBackend,
    api_key: &str,
    request: &ReportRequest,
) -> Result<StrategyReport, ReportError> {
    let prompt = prompts::report_prompt(request);
    info!(period = %request.period, "Requesting strategy report");

    let raw = backend.complete(api_key, &prompt).await?;
    let report = parser::parse_report(&raw)?;

    info!(rows = report.rows.len(), "Strategy report ready");
    Ok(report)
}
