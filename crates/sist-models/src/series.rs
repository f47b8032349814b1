use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Row {row} has {found} values for {expected} tickers")]
    ColumnMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Dates must be strictly increasing: {prev} followed by {next}")]
    OutOfOrder { prev: NaiveDate, next: NaiveDate },
}

/// One dated observation: an optional closing price per tracked ticker,
/// aligned with `PriceSeries::tickers`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub closes: Vec<Option<Decimal>>,
}

/// A date-indexed table of daily closing prices, one column per ticker.
///
/// Construction enforces the series invariants: every row carries exactly
/// one value slot per ticker, and dates are unique and strictly increasing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceSeries {
    tickers: Vec<String>,
    rows: Vec<PriceRow>,
}

impl PriceSeries {
    pub fn new(tickers: Vec<String>, rows: Vec<PriceRow>) -> Result<Self, SeriesError> {
        for (i, row) in rows.iter().enumerate() {
            if row.closes.len() != tickers.len() {
                return Err(SeriesError::ColumnMismatch {
                    row: i,
                    found: row.closes.len(),
                    expected: tickers.len(),
                });
            }
        }
        for pair in rows.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::OutOfOrder {
                    prev: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self { tickers, rows })
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The closing-price column for one ticker, if tracked.
    pub fn column(&self, ticker: &str) -> Option<Vec<Option<Decimal>>> {
        let idx = self.tickers.iter().position(|t| t == ticker)?;
        Some(self.rows.iter().map(|row| row.closes[idx]).collect())
    }

    /// Serialize to CSV text: a `Date` column followed by one column per
    /// ticker. Missing observations become empty cells.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["Date".to_string()];
        header.extend(self.tickers.iter().cloned());
        writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![row.date.to_string()];
            record.extend(
                row.closes
                    .iter()
                    .map(|close| close.map(|c| c.to_string()).unwrap_or_default()),
            );
            writer.write_record(&record)?;
        }

        writer.flush()?;
        match writer.into_inner() {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_series() -> PriceSeries {
        PriceSeries::new(
            vec!["AAPL".to_string(), "MSFT".to_string()],
            vec![
                PriceRow {
                    date: date(2024, 1, 2),
                    closes: vec![Some(dec!(185.64)), Some(dec!(370.87))],
                },
                PriceRow {
                    date: date(2024, 1, 3),
                    closes: vec![Some(dec!(184.25)), None],
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn rows_must_match_ticker_count() {
        let err = PriceSeries::new(
            vec!["AAPL".to_string()],
            vec![PriceRow {
                date: date(2024, 1, 2),
                closes: vec![Some(dec!(185.64)), Some(dec!(370.87))],
            }],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SeriesError::ColumnMismatch {
                row: 0,
                found: 2,
                expected: 1
            }
        );
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let err = PriceSeries::new(
            vec!["AAPL".to_string()],
            vec![
                PriceRow {
                    date: date(2024, 1, 2),
                    closes: vec![Some(dec!(185.64))],
                },
                PriceRow {
                    date: date(2024, 1, 2),
                    closes: vec![Some(dec!(184.25))],
                },
            ],
        )
        .unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { .. }));
    }

    #[test]
    fn out_of_order_dates_are_rejected() {
        let err = PriceSeries::new(
            vec!["AAPL".to_string()],
            vec![
                PriceRow {
                    date: date(2024, 1, 3),
                    closes: vec![Some(dec!(184.25))],
                },
                PriceRow {
                    date: date(2024, 1, 2),
                    closes: vec![Some(dec!(185.64))],
                },
            ],
        )
        .unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { .. }));
    }

    #[test]
    fn column_lookup_by_ticker() {
        let series = sample_series();
        let msft = series.column("MSFT").unwrap();
        assert_eq!(msft, vec![Some(dec!(370.87)), None]);
        assert!(series.column("GOOGL").is_none());
    }

    #[test]
    fn csv_export_uses_empty_cells_for_gaps() {
        let csv_text = sample_series().to_csv().unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(lines.next().unwrap(), "Date,AAPL,MSFT");
        assert_eq!(lines.next().unwrap(), "2024-01-02,185.64,370.87");
        assert_eq!(lines.next().unwrap(), "2024-01-03,184.25,");
    }

    #[test]
    fn empty_series_is_empty() {
        let series = PriceSeries::new(vec!["AAPL".to_string()], vec![]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }
}
