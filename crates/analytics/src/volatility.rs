//! Rolling annualized volatility of simple returns.

use crate::returns::ReturnSeries;
use crate::stats::sample_std;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW: usize = 30;
pub const DAYS_PER_YEAR: u32 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoint {
    pub date: NaiveDate,
    /// `None` until a full window of present returns is available
    pub value: Option<f64>,
}

/// Rolling volatility aligned one-to-one with a [`ReturnSeries`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySeries {
    pub window: usize,
    points: Vec<VolatilityPoint>,
}

impl VolatilitySeries {
    #[must_use]
    pub fn points(&self) -> &[VolatilityPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points with a defined value, as (date, value).
    #[must_use]
    pub fn defined(&self) -> Vec<(NaiveDate, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.value.map(|v| (p.date, v)))
            .collect()
    }

    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|p| p.value)
    }
}

/// Trailing sample standard deviation over `window` values, scaled by
/// `sqrt(periods_per_year)`.
///
/// Output position `t` covers `values[t + 1 - window..=t]`. A position is
/// `None` when fewer than `window` values precede it or any value in its
/// window is missing. It is never zero-filled.
#[must_use]
pub fn rolling_volatility(
    values: &[Option<f64>],
    window: usize,
    periods_per_year: u32,
) -> Vec<Option<f64>> {
    let scale = f64::from(periods_per_year).sqrt();
    let mut out = vec![None; values.len()];
    if window < 2 || values.len() < window {
        return out;
    }

    let mut buffer = Vec::with_capacity(window);
    for (end, slot) in out.iter_mut().enumerate().skip(window - 1) {
        buffer.clear();
        let slice = &values[end + 1 - window..=end];
        if slice.iter().any(Option::is_none) {
            continue;
        }
        buffer.extend(slice.iter().flatten());
        *slot = sample_std(&buffer).map(|std| std * scale);
    }
    out
}

/// Rolling annualized volatility of the simple returns in `returns`.
#[must_use]
pub fn compute_rolling_volatility(
    returns: &ReturnSeries,
    window: usize,
    periods_per_year: u32,
) -> VolatilitySeries {
    let values = rolling_volatility(&returns.simple(), window, periods_per_year);
    let points: Vec<VolatilityPoint> = returns
        .points()
        .iter()
        .zip(values)
        .map(|(point, value)| VolatilityPoint {
            date: point.date,
            value,
        })
        .collect();

    tracing::debug!(
        window,
        defined = points.iter().filter(|p| p.value.is_some()).count(),
        "Computed rolling volatility"
    );

    VolatilitySeries { window, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::compute_returns;
    use retvol_data::{PriceBar, PriceSeries};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn wave(n: usize) -> Vec<Option<f64>> {
        (0..n)
            .map(|i| Some(((i as f64) * 0.7).sin() * 0.03))
            .collect()
    }

    #[test]
    fn first_window_minus_one_positions_undefined() {
        let values = wave(50);
        let vol = rolling_volatility(&values, DEFAULT_WINDOW, DAYS_PER_YEAR);

        assert_eq!(vol.len(), 50);
        assert!(vol[..29].iter().all(Option::is_none));
        assert!(vol[29..].iter().all(Option::is_some));
    }

    #[test]
    fn values_match_windowed_sample_std() {
        let values = wave(45);
        let vol = rolling_volatility(&values, DEFAULT_WINDOW, DAYS_PER_YEAR);
        let plain: Vec<f64> = values.iter().flatten().copied().collect();

        for t in 29..45 {
            let expected = sample_std(&plain[t - 29..=t]).unwrap() * 365f64.sqrt();
            let actual = vol[t].unwrap();
            assert!((actual - expected).abs() < 1e-12, "t={t}: {actual} vs {expected}");
        }
    }

    #[test]
    fn short_series_is_entirely_undefined() {
        let vol = rolling_volatility(&wave(29), 30, 365);
        assert_eq!(vol.len(), 29);
        assert!(vol.iter().all(Option::is_none));
    }

    #[test]
    fn missing_value_poisons_its_windows() {
        let mut values = wave(10);
        values[4] = None;
        let vol = rolling_volatility(&values, 3, 365);

        assert!(vol[4].is_none());
        assert!(vol[5].is_none());
        assert!(vol[6].is_none());
        assert!(vol[7].is_some());
        assert!(vol[3].is_some());
    }

    #[test]
    fn constant_returns_have_zero_not_missing_volatility() {
        let values = vec![Some(0.01); 5];
        let vol = rolling_volatility(&values, 3, 365);
        assert!(vol[2].unwrap().abs() < 1e-12);
    }

    #[test]
    fn compute_aligns_to_return_dates() {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series: PriceSeries = (0..40)
            .zip(start.iter_days())
            .map(|(i, date)| PriceBar::new(date, Decimal::from(100 + i % 7), dec!(1)))
            .collect();
        let returns = compute_returns(&series);
        let vol = compute_rolling_volatility(&returns, DEFAULT_WINDOW, DAYS_PER_YEAR);

        assert_eq!(vol.len(), returns.len());
        assert_eq!(vol.window, 30);
        assert_eq!(vol.points()[0].date, returns.points()[0].date);
        assert_eq!(vol.defined().len(), returns.len() - 29);
        assert!(vol.latest().is_some());
    }
}
