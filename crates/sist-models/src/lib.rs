pub mod config;
pub mod period;
pub mod report;
pub mod series;

pub use config::{MarketConfig, ReportConfig, SistConfig};
pub use period::{FiscalPeriod, PeriodError, ALL_PERIODS};
pub use report::{ReportRequest, RequestError, StrategyReport, StrategyRow, REPORT_COLUMNS};
pub use series::{PriceRow, PriceSeries, SeriesError};
