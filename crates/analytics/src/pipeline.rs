//! The full computation from a cleaned price series to every derived result.

use crate::charts::{price_chart, returns_histogram, volatility_chart, ChartSpec};
use crate::error::StatsResult;
use crate::hypothesis::{test_mean_zero, test_normality, TestResult, TestType};
use crate::returns::{compute_returns, ReturnSeries};
use crate::stats::Moments;
use crate::summary::{summarize, SummaryStatistics};
use crate::volatility::{compute_rolling_volatility, VolatilitySeries};
use retvol_core::AnalysisConfig;
use retvol_data::PriceSeries;

/// Everything derived from one price series. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub asset: String,
    pub significance_level: f64,
    pub returns: ReturnSeries,
    pub volatility: VolatilitySeries,
    pub summary: SummaryStatistics,
    /// Skewness and kurtosis of the returns, when defined
    pub moments: StatsResult<Moments>,
    pub normality: StatsResult<TestResult>,
    pub mean_test: StatsResult<TestResult>,
    /// Price, rolling volatility and return histogram, in that order
    pub charts: Vec<ChartSpec>,
}

impl Analysis {
    /// Derives returns, rolling volatility, summary statistics, both
    /// hypothesis tests and the chart specifications.
    ///
    /// Undefined tests are kept as errors inside the result so the report can
    /// say so; only a sample too small to summarize fails the whole run.
    ///
    /// # Errors
    /// `InsufficientData` when fewer than two present returns exist.
    pub fn run(prices: &PriceSeries, config: &AnalysisConfig) -> StatsResult<Self> {
        tracing::info!(
            asset = %config.asset,
            bars = prices.len(),
            window = config.rolling_window,
            "Running return and volatility analysis"
        );

        let returns = compute_returns(prices);
        let volatility =
            compute_rolling_volatility(&returns, config.rolling_window, config.periods_per_year);

        let sample = returns.simple_values();
        let summary = summarize(&sample, config.periods_per_year)?;
        let moments = Moments::from_sample(&sample);
        let normality = test_normality(&sample);
        let mean_test = test_mean_zero(&sample);

        for (test_type, result) in [
            (TestType::JarqueBera, &normality),
            (TestType::TTest, &mean_test),
        ] {
            if let Err(err) = result {
                tracing::warn!(
                    test = test_type.name(),
                    error = %err,
                    "Hypothesis test undefined"
                );
            }
        }
        if let Err(err) = summary.sharpe_ratio() {
            tracing::warn!(error = %err, "Sharpe ratio undefined");
        }

        let charts = vec![
            price_chart(&config.asset, prices),
            volatility_chart(&config.asset, &volatility),
            returns_histogram(&config.asset, &returns, config.histogram_bins),
        ];

        Ok(Self {
            asset: config.asset.clone(),
            significance_level: config.significance_level,
            returns,
            volatility,
            summary,
            moments,
            normality,
            mean_test,
            charts,
        })
    }

    /// True when normality is rejected at the configured level.
    /// `None` when the test is undefined.
    #[must_use]
    pub fn rejects_normality(&self) -> Option<bool> {
        self.normality
            .as_ref()
            .ok()
            .map(|test| test.rejects_null(self.significance_level))
    }
}
