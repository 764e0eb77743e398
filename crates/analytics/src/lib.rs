//! Return, volatility and distribution diagnostics for a daily price series.
//!
//! The computation is a straight line:
//! prices → returns → rolling volatility → summary and hypothesis tests → report.

pub mod charts;
pub mod error;
pub mod hypothesis;
pub mod pipeline;
pub mod report;
pub mod returns;
pub mod stats;
pub mod summary;
pub mod volatility;

pub use charts::{
    histogram, price_chart, returns_histogram, volatility_chart, ChartData, ChartSpec,
    ChartSummary, HistogramBin, DEFAULT_HISTOGRAM_BINS,
};
pub use error::{StatsError, StatsResult};
pub use hypothesis::{test_mean_zero, test_normality, TestResult, TestType, DEFAULT_ALPHA};
pub use pipeline::Analysis;
pub use report::format_report;
pub use returns::{compute_returns, ReturnPoint, ReturnSeries};
pub use stats::Moments;
pub use summary::{summarize, SummaryStatistics};
pub use volatility::{
    compute_rolling_volatility, rolling_volatility, VolatilityPoint, VolatilitySeries,
    DAYS_PER_YEAR, DEFAULT_WINDOW,
};
