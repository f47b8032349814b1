use sist_models::{StrategyReport, StrategyRow, REPORT_COLUMNS};
use tracing::debug;

use crate::error::ReportError;

/// Strip markdown code-fence markers from a model response.
///
/// Handles the common completion formats:
/// - ```` ```csv ... ``` ````
/// - ```` ``` ... ``` ````
/// - fence-free text (returned unchanged apart from outer trimming)
pub fn strip_code_fences(text: &str) -> &str {
    let mut stripped = text.trim();

    for marker in ["```csv", "```"] {
        if let Some(rest) = stripped.strip_prefix(marker) {
            stripped = rest;
            break;
        }
    }
    if let Some(rest) = stripped.strip_suffix("```") {
        stripped = rest;
    }

    stripped.trim()
}

/// Normalize raw completion text into a strategy report.
///
/// The text must parse as CSV with exactly the four canonical columns in
/// every record. A shape mismatch is a hard error, not a best-effort table.
pub fn parse_report(raw: &str) -> Result<StrategyReport, ReportError> {
    let stripped = strip_code_fences(raw);
    if stripped.is_empty() {
        return Err(ReportError::Parse {
            message: "response is empty".to_string(),
            raw: raw.to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(stripped.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ReportError::Parse {
            message: e.to_string(),
            raw: raw.to_string(),
        })?
        .clone();
    if headers.len() != REPORT_COLUMNS.len() {
        return Err(ReportError::ColumnCount {
            expected: REPORT_COLUMNS.len(),
            found: headers.len(),
            row: 0,
            raw: raw.to_string(),
        });
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ReportError::Parse {
            message: e.to_string(),
            raw: raw.to_string(),
        })?;
        if record.len() != REPORT_COLUMNS.len() {
            return Err(ReportError::ColumnCount {
                expected: REPORT_COLUMNS.len(),
                found: record.len(),
                row: idx + 1,
                raw: raw.to_string(),
            });
        }
        rows.push(StrategyRow {
            company: record[0].to_string(),
            product_description: record[1].to_string(),
            marketing_strategy: record[2].to_string(),
            financial_summary: record[3].to_string(),
        });
    }

    if rows.is_empty() {
        return Err(ReportError::Empty);
    }

    debug!(rows = rows.len(), "Parsed strategy report");
    Ok(StrategyReport { rows })
}
