//! Hypothesis tests on the return distribution.
//!
//! Provides:
//! - Jarque–Bera goodness-of-fit test against the normal distribution
//! - One-sample t-test of the mean return against zero

use crate::error::{StatsError, StatsResult};
use crate::stats::{is_zero_dispersion, mean, sample_std, Moments};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};

/// Conventional significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Type of statistical test performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestType {
    /// H0: sample skewness and kurtosis match a normal distribution
    JarqueBera,
    /// H0: mean return = 0
    TTest,
}

impl TestType {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::JarqueBera => "Jarque–Bera",
            Self::TTest => "one-sample t-test",
        }
    }
}

/// Statistic and p-value of one test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test_type: TestType,
    /// JB statistic or t-score
    pub statistic: f64,
    /// JB: upper tail of chi-squared(2); t-test: two-tailed
    pub p_value: f64,
    pub degrees_of_freedom: f64,
    pub sample_size: usize,
}

impl TestResult {
    /// True when H0 is rejected at level `alpha` (p < alpha).
    #[must_use]
    pub fn rejects_null(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Jarque–Bera test for normality.
///
/// JB = n/6 * (S^2 + (K - 3)^2 / 4), using biased skewness S and kurtosis K,
/// compared against chi-squared with 2 degrees of freedom.
///
/// # Errors
/// `InsufficientData` for fewer than two values; `DivisionByZero` for a
/// zero-variance sample, where skewness and kurtosis are undefined.
pub fn test_normality(returns: &[f64]) -> StatsResult<TestResult> {
    const STATISTIC: &str = "Jarque–Bera";

    let moments = Moments::from_sample(returns).map_err(|err| rename(err, STATISTIC))?;
    let n = moments.n as f64;
    let excess = moments.excess_kurtosis();
    let statistic = n / 6.0 * (moments.skewness.powi(2) + excess.powi(2) / 4.0);

    let chi_squared = ChiSquared::new(2.0).map_err(|e| StatsError::Distribution {
        statistic: STATISTIC,
        message: e.to_string(),
    })?;
    let p_value = chi_squared.sf(statistic).clamp(0.0, 1.0);

    tracing::debug!(
        statistic,
        p_value,
        skewness = moments.skewness,
        kurtosis = moments.kurtosis,
        "Jarque–Bera test"
    );

    Ok(TestResult {
        test_type: TestType::JarqueBera,
        statistic,
        p_value,
        degrees_of_freedom: 2.0,
        sample_size: moments.n,
    })
}

/// One-sample two-tailed t-test with H0: population mean = 0.
///
/// t = mean / (s / sqrt(n)) with the sample standard deviation s, compared
/// against Student's t with n - 1 degrees of freedom. Only present values
/// should be passed; a missing return is excluded, never treated as zero.
///
/// # Errors
/// `InsufficientData` for fewer than two values; `DivisionByZero` when the
/// standard error is zero.
pub fn test_mean_zero(returns: &[f64]) -> StatsResult<TestResult> {
    const STATISTIC: &str = "t-test";

    let (Some(mean), Some(std_dev)) = (mean(returns), sample_std(returns)) else {
        return Err(StatsError::InsufficientData {
            statistic: STATISTIC,
            required: 2,
            actual: returns.len(),
        });
    };
    if is_zero_dispersion(std_dev, mean) {
        return Err(StatsError::DivisionByZero {
            statistic: STATISTIC,
            std_dev,
        });
    }

    let n = returns.len() as f64;
    let std_error = std_dev / n.sqrt();
    let statistic = mean / std_error;
    let degrees_of_freedom = n - 1.0;

    let students_t =
        StudentsT::new(0.0, 1.0, degrees_of_freedom).map_err(|e| StatsError::Distribution {
            statistic: STATISTIC,
            message: e.to_string(),
        })?;
    let p_value = (2.0 * students_t.sf(statistic.abs())).clamp(0.0, 1.0);

    tracing::debug!(statistic, p_value, degrees_of_freedom, "one-sample t-test");

    Ok(TestResult {
        test_type: TestType::TTest,
        statistic,
        p_value,
        degrees_of_freedom,
        sample_size: returns.len(),
    })
}

fn rename(err: StatsError, statistic: &'static str) -> StatsError {
    match err {
        StatsError::DivisionByZero { std_dev, .. } => {
            StatsError::DivisionByZero { statistic, std_dev }
        }
        StatsError::InsufficientData {
            required, actual, ..
        } => StatsError::InsufficientData {
            statistic,
            required,
            actual,
        },
        other => other,
    }
}
