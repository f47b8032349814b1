use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::period::FiscalPeriod;

/// Column headers of a strategy report, in order.
pub const REPORT_COLUMNS: [&str; 4] = [
    "Company Name",
    "Product Description",
    "Marketing Strategy",
    "Financial Summary",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("Company {0} is empty")]
    EmptyCompany(usize),
}

/// One report request: three companies compared over a fiscal period.
///
/// Transient input for a single analysis run; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRequest {
    pub companies: [String; 3],
    pub period: FiscalPeriod,
}

impl ReportRequest {
    /// Build a request, trimming each company name.
    /// Empty or whitespace-only names are rejected.
    pub fn new(companies: [&str; 3], period: FiscalPeriod) -> Result<Self, RequestError> {
        let mut trimmed: [String; 3] = Default::default();
        for (i, company) in companies.iter().enumerate() {
            let name = company.trim();
            if name.is_empty() {
                return Err(RequestError::EmptyCompany(i + 1));
            }
            trimmed[i] = name.to_string();
        }
        Ok(Self {
            companies: trimmed,
            period,
        })
    }
}

/// One parsed row of a strategy report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyRow {
    pub company: String,
    pub product_description: String,
    pub marketing_strategy: String,
    pub financial_summary: String,
}

/// A normalized strategy report: ordered rows under the four fixed columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyReport {
    pub rows: Vec<StrategyRow>,
}

impl StrategyReport {
    /// Serialize to CSV text with the canonical header row.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(REPORT_COLUMNS)?;
        for row in &self.rows {
            writer.write_record([
                &row.company,
                &row.product_description,
                &row.marketing_strategy,
                &row.financial_summary,
            ])?;
        }
        writer.flush()?;
        match writer.into_inner() {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()).into()),
        }
    }
}
