//! Descriptive statistics over plain `f64` samples.
//!
//! Callers pass only present, finite observations; missing values are
//! filtered out upstream.

use crate::error::{StatsError, StatsResult};

/// Standard deviations at or below this fraction of |mean| are treated as zero.
pub const MIN_RELATIVE_STD: f64 = 1.0e-10;

/// True when `std_dev` is zero or only rounding noise around `mean`.
///
/// The cutoff scales with the mean, so a genuinely small-scale sample keeps
/// its dispersion while a constant one (whose computed deviation is a few ulps
/// of the mean) does not.
#[must_use]
pub fn is_zero_dispersion(std_dev: f64, mean: f64) -> bool {
    std_dev <= MIN_RELATIVE_STD * mean.abs()
}

#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the average of the two middle values for even-length samples.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample (n - 1) standard deviation. `None` for fewer than two values.
#[must_use]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

/// Population moments used by shape statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub n: usize,
    pub mean: f64,
    /// Biased skewness m3 / m2^1.5
    pub skewness: f64,
    /// Biased (non-excess) kurtosis m4 / m2^2; 3 for a normal distribution
    pub kurtosis: f64,
}

impl Moments {
    /// Computes biased central moments.
    ///
    /// # Errors
    /// `InsufficientData` for fewer than two values, `DivisionByZero` when the
    /// sample has no dispersion.
    pub fn from_sample(values: &[f64]) -> StatsResult<Self> {
        const STATISTIC: &str = "skewness/kurtosis";

        if values.len() < 2 {
            return Err(StatsError::InsufficientData {
                statistic: STATISTIC,
                required: 2,
                actual: values.len(),
            });
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        for value in values {
            let d = value - mean;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }
        m2 /= n;
        m3 /= n;
        m4 /= n;

        let std_dev = m2.sqrt();
        if is_zero_dispersion(std_dev, mean) {
            return Err(StatsError::DivisionByZero {
                statistic: STATISTIC,
                std_dev,
            });
        }

        Ok(Self {
            n: values.len(),
            mean,
            skewness: m3 / m2.powf(1.5),
            kurtosis: m4 / (m2 * m2),
        })
    }

    #[must_use]
    pub fn excess_kurtosis(&self) -> f64 {
        self.kurtosis - 3.0
    }
}
