use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sist_models::{PriceRow, PriceSeries};

use crate::error::MarketError;

/// One price column: date → observed value.
pub type PriceColumn = BTreeMap<NaiveDate, Decimal>;

/// The per-observation price fields a provider may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

/// Raw tabular response from a provider, before normalization.
///
/// Providers return one of two column shapes: a single-level table that is
/// already one closing-price column per ticker, or a two-level table whose
/// outer level is the price field and inner level is the ticker.
#[derive(Debug, Clone)]
pub enum PriceFrame {
    Close(BTreeMap<String, PriceColumn>),
    Fields(BTreeMap<PriceField, BTreeMap<String, PriceColumn>>),
}

impl PriceFrame {
    pub fn is_empty(&self) -> bool {
        match self {
            PriceFrame::Close(columns) => columns.values().all(|c| c.is_empty()),
            PriceFrame::Fields(fields) => fields
                .values()
                .all(|tickers| tickers.values().all(|c| c.is_empty())),
        }
    }

    /// Collapse to one closing-price column per requested ticker.
    ///
    /// Two-level frames keep only the close field and discard the rest.
    /// Tickers are aligned on the sorted union of their observation dates;
    /// gaps become `None`. Column order follows `tickers`.
    pub fn into_series(self, tickers: &[String]) -> Result<PriceSeries, MarketError> {
        let columns = match self {
            PriceFrame::Close(columns) => columns,
            PriceFrame::Fields(mut fields) => fields.remove(&PriceField::Close).ok_or_else(|| {
                MarketError::Decode("provider response has no closing-price field".to_string())
            })?,
        };

        let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
        for column in columns.values() {
            dates.extend(column.keys().copied());
        }

        let rows: Vec<PriceRow> = dates
            .into_iter()
            .map(|date| PriceRow {
                date,
                closes: tickers
                    .iter()
                    .map(|t| columns.get(t).and_then(|c| c.get(&date)).copied())
                    .collect(),
            })
            .collect();

        PriceSeries::new(tickers.to_vec(), rows).map_err(|e| MarketError::Decode(e.to_string()))
    }
}

/// Trait for daily price providers. Mockable for testing.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch daily observations for the inclusive date range, adjusted for
    /// splits and dividends.
    async fn fetch_daily(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceFrame, MarketError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn column(values: &[(u32, Decimal)]) -> PriceColumn {
        values.iter().map(|(d, v)| (date(*d), *v)).collect()
    }

    fn two_level_frame() -> PriceFrame {
        let mut fields = BTreeMap::new();
        for field in [PriceField::Open, PriceField::High, PriceField::Low] {
            let mut tickers = BTreeMap::new();
            tickers.insert("AAPL".to_string(), column(&[(2, dec!(1.0))]));
            fields.insert(field, tickers);
        }

        let mut close = BTreeMap::new();
        close.insert(
            "AAPL".to_string(),
            column(&[(2, dec!(185.64)), (3, dec!(184.25))]),
        );
        close.insert("MSFT".to_string(), column(&[(3, dec!(370.87))]));
        fields.insert(PriceField::Close, close);

        PriceFrame::Fields(fields)
    }

    #[test]
    fn two_level_frame_keeps_only_close_columns() {
        let tickers = vec!["AAPL".to_string(), "MSFT".to_string()];
        let series = two_level_frame().into_series(&tickers).unwrap();

        // One column per requested ticker, nothing field-level left over.
        assert_eq!(series.tickers(), &["AAPL".to_string(), "MSFT".to_string()]);
        assert_eq!(series.len(), 2);
        assert_eq!(
            series.column("AAPL").unwrap(),
            vec![Some(dec!(185.64)), Some(dec!(184.25))]
        );
    }

    #[test]
    fn tickers_are_aligned_on_the_date_union() {
        let tickers = vec!["AAPL".to_string(), "MSFT".to_string()];
        let series = two_level_frame().into_series(&tickers).unwrap();

        // MSFT has no Jan 2 observation: the row survives with a gap.
        assert_eq!(series.rows()[0].date, date(2));
        assert_eq!(series.column("MSFT").unwrap(), vec![None, Some(dec!(370.87))]);
    }

    #[test]
    fn column_order_follows_the_request() {
        let tickers = vec!["MSFT".to_string(), "AAPL".to_string()];
        let series = two_level_frame().into_series(&tickers).unwrap();
        assert_eq!(series.tickers(), &["MSFT".to_string(), "AAPL".to_string()]);
        assert_eq!(series.rows()[1].closes[1], Some(dec!(184.25)));
    }

    #[test]
    fn missing_close_field_is_a_decode_error() {
        let mut fields = BTreeMap::new();
        let mut tickers = BTreeMap::new();
        tickers.insert("AAPL".to_string(), column(&[(2, dec!(1.0))]));
        fields.insert(PriceField::Open, tickers);

        let err = PriceFrame::Fields(fields)
            .into_series(&["AAPL".to_string()])
            .unwrap_err();
        assert!(matches!(err, MarketError::Decode(_)));
    }

    #[test]
    fn single_level_frame_passes_through() {
        let mut columns = BTreeMap::new();
        columns.insert("GOOGL".to_string(), column(&[(2, dec!(139.56))]));
        let series = PriceFrame::Close(columns)
            .into_series(&["GOOGL".to_string()])
            .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.column("GOOGL").unwrap(), vec![Some(dec!(139.56))]);
    }

    #[test]
    fn emptiness_checks_both_shapes() {
        assert!(PriceFrame::Close(BTreeMap::new()).is_empty());
        assert!(PriceFrame::Fields(BTreeMap::new()).is_empty());

        let mut columns = BTreeMap::new();
        columns.insert("AAPL".to_string(), PriceColumn::new());
        assert!(PriceFrame::Close(columns).is_empty());

        let mut columns = BTreeMap::new();
        columns.insert("AAPL".to_string(), column(&[(2, dec!(1.0))]));
        assert!(!PriceFrame::Close(columns).is_empty());
    }
}
