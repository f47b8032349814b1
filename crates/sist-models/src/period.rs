use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed set of fiscal-period labels offered by the dashboard.
///
/// The label doubles as prompt text for the report pipeline and as the
/// source of the market-data date range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FiscalPeriod {
    #[serde(rename = "2022-2023")]
    Fy2022To2023,
    #[serde(rename = "2023-2024")]
    Fy2023To2024,
    #[serde(rename = "2024-2025")]
    Fy2024To2025,
    #[serde(rename = "2022-2025")]
    Fy2022To2025,
}

/// All selectable periods, in display order.
pub const ALL_PERIODS: [FiscalPeriod; 4] = [
    FiscalPeriod::Fy2022To2023,
    FiscalPeriod::Fy2023To2024,
    FiscalPeriod::Fy2024To2025,
    FiscalPeriod::Fy2022To2025,
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Malformed period label {0:?} (expected YYYY-YYYY)")]
    Malformed(String),

    #[error("Invalid year token {0:?} (expected a 4-digit year starting with 20)")]
    Year(String),

    #[error("Unknown fiscal period {0}-{1}")]
    Unknown(i32, i32),
}

impl FiscalPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            FiscalPeriod::Fy2022To2023 => "2022-2023",
            FiscalPeriod::Fy2023To2024 => "2023-2024",
            FiscalPeriod::Fy2024To2025 => "2024-2025",
            FiscalPeriod::Fy2022To2025 => "2022-2025",
        }
    }

    pub fn start_year(&self) -> i32 {
        match self {
            FiscalPeriod::Fy2022To2023 | FiscalPeriod::Fy2022To2025 => 2022,
            FiscalPeriod::Fy2023To2024 => 2023,
            FiscalPeriod::Fy2024To2025 => 2024,
        }
    }

    pub fn end_year(&self) -> i32 {
        match self {
            FiscalPeriod::Fy2022To2023 => 2023,
            FiscalPeriod::Fy2023To2024 => 2024,
            FiscalPeriod::Fy2024To2025 | FiscalPeriod::Fy2022To2025 => 2025,
        }
    }

    /// Expand the period to an inclusive calendar date range:
    /// start-of-start-year through end-of-end-year.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let start = NaiveDate::from_ymd_opt(self.start_year(), 1, 1).unwrap_or_default();
        let end = NaiveDate::from_ymd_opt(self.end_year(), 12, 31).unwrap_or_default();
        (start, end)
    }
}

/// Validate a single year token: exactly four ASCII digits starting "20".
fn parse_year_token(token: &str) -> Result<i32, PeriodError> {
    let token = token.trim();
    if token.len() != 4 || !token.starts_with("20") || !token.chars().all(|c| c.is_ascii_digit()) {
        return Err(PeriodError::Year(token.to_string()));
    }
    token
        .parse()
        .map_err(|_| PeriodError::Year(token.to_string()))
}

impl FromStr for FiscalPeriod {
    type Err = PeriodError;

    /// Parse a period label by splitting on `-` into start and end year
    /// tokens. Unrecognized tokens are a hard error, never a fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (start_token, end_token) = trimmed
            .split_once('-')
            .ok_or_else(|| PeriodError::Malformed(trimmed.to_string()))?;

        let start = parse_year_token(start_token)?;
        let end = parse_year_token(end_token)?;

        ALL_PERIODS
            .iter()
            .copied()
            .find(|p| p.start_year() == start && p.end_year() == end)
            .ok_or(PeriodError::Unknown(start, end))
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
