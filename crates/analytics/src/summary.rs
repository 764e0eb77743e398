//! Scalar summary statistics over the present simple returns.

use crate::error::{StatsError, StatsResult};
use crate::stats::{is_zero_dispersion, mean, median, sample_std};
use serde::{Deserialize, Serialize};

/// Aggregates computed once over a return sample.
///
/// The Sharpe ratio is not stored: it is undefined for a zero-variance sample,
/// so it is exposed through [`SummaryStatistics::sharpe_ratio`] which returns
/// an error in that case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of returns the statistics were computed from
    pub observations: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation of one-period returns
    pub std_dev: f64,
    /// `std_dev * sqrt(periods_per_year)`
    pub annualized_volatility: f64,
    /// `(1 + mean)^periods_per_year - 1`
    pub annualized_return: f64,
    pub periods_per_year: u32,
}

impl SummaryStatistics {
    /// Per-period Sharpe ratio, `mean / std_dev`, with a zero risk-free rate.
    ///
    /// # Errors
    /// `DivisionByZero` when the standard deviation is zero or numerically
    /// indistinguishable from it.
    pub fn sharpe_ratio(&self) -> StatsResult<f64> {
        if is_zero_dispersion(self.std_dev, self.mean) {
            return Err(StatsError::DivisionByZero {
                statistic: "Sharpe ratio",
                std_dev: self.std_dev,
            });
        }
        Ok(self.mean / self.std_dev)
    }

    /// Sharpe ratio scaled by `sqrt(periods_per_year)`.
    ///
    /// # Errors
    /// Same as [`SummaryStatistics::sharpe_ratio`].
    pub fn annualized_sharpe_ratio(&self) -> StatsResult<f64> {
        Ok(self.sharpe_ratio()? * f64::from(self.periods_per_year).sqrt())
    }
}

/// Summarizes a sample of present, finite returns.
///
/// # Errors
/// `InsufficientData` for fewer than two returns, since the sample standard
/// deviation is undefined.
pub fn summarize(returns: &[f64], periods_per_year: u32) -> StatsResult<SummaryStatistics> {
    let insufficient = || StatsError::InsufficientData {
        statistic: "summary statistics",
        required: 2,
        actual: returns.len(),
    };

    let std_dev = sample_std(returns).ok_or_else(insufficient)?;
    let mean = mean(returns).ok_or_else(insufficient)?;
    let median = median(returns).ok_or_else(insufficient)?;
    let periods = f64::from(periods_per_year);

    let summary = SummaryStatistics {
        observations: returns.len(),
        mean,
        median,
        std_dev,
        annualized_volatility: std_dev * periods.sqrt(),
        annualized_return: (1.0 + mean).powf(periods) - 1.0,
        periods_per_year,
    };

    tracing::debug!(
        observations = summary.observations,
        mean = summary.mean,
        std_dev = summary.std_dev,
        "Summarized returns"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_pair_has_zero_sharpe() {
        let summary = summarize(&[0.10, -0.10], 365).unwrap();

        assert!(summary.mean.abs() < 1e-15);
        assert!(summary.median.abs() < 1e-15);
        assert!(summary.std_dev > 0.0);
        assert!(summary.sharpe_ratio().unwrap().abs() < 1e-12);
    }

    #[test]
    fn annualization_formulas() {
        let returns = [0.01, 0.02, -0.005, 0.0, 0.015];
        let summary = summarize(&returns, 365).unwrap();

        let mean = 0.008;
        let std = sample_std(&returns).unwrap();
        assert!((summary.mean - mean).abs() < 1e-15);
        assert!((summary.median - 0.01).abs() < 1e-15);
        assert!((summary.annualized_volatility - std * 365f64.sqrt()).abs() < 1e-12);
        assert!((summary.annualized_return - (1.008f64.powi(365) - 1.0)).abs() < 1e-9);
        assert!((summary.sharpe_ratio().unwrap() - mean / std).abs() < 1e-12);
        assert!(
            (summary.annualized_sharpe_ratio().unwrap() - mean / std * 365f64.sqrt()).abs()
                < 1e-9
        );
    }

    #[test]
    fn tiny_scale_returns_keep_sharpe_defined() {
        let summary = summarize(&[1e-14, 3e-14, 2e-14, 4e-14], 365).unwrap();
        assert!(summary.sharpe_ratio().unwrap() > 0.0);
    }

    #[test]
    fn zero_returns_flag_division_by_zero() {
        let summary = summarize(&[0.0; 10], 365).unwrap();
        assert!(summary.sharpe_ratio().unwrap_err().is_division_by_zero());
    }

    #[test]
    fn constant_returns_flag_division_by_zero() {
        let returns = vec![0.01; 100];
        let summary = summarize(&returns, 365).unwrap();

        let err = summary.sharpe_ratio().unwrap_err();
        assert!(err.is_division_by_zero());
        assert!(err.to_string().contains("Sharpe ratio"));
        assert!(summary.annualized_sharpe_ratio().is_err());
    }

    #[test]
    fn too_few_returns() {
        assert!(matches!(
            summarize(&[0.01], 365),
            Err(StatsError::InsufficientData { actual: 1, .. })
        ));
        assert!(summarize(&[], 365).is_err());
    }

    #[test]
    fn recomputation_is_deterministic() {
        let returns: Vec<f64> = (0..200).map(|i| ((i as f64) * 1.3).cos() * 0.02).collect();
        assert_eq!(summarize(&returns, 365), summarize(&returns, 365));
    }
}
