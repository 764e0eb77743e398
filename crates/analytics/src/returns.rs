//! Simple and logarithmic returns derived from a price series.

use chrono::NaiveDate;
use retvol_data::PriceSeries;
use serde::{Deserialize, Serialize};

/// Return from the previous bar's close to this bar's close.
///
/// A field is `None` when it is undefined, e.g. when the previous close is
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub simple: Option<f64>,
    pub log: Option<f64>,
}

/// Returns aligned to a price series, starting at its second bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    #[must_use]
    pub fn points(&self) -> &[ReturnPoint] {
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

    /// Simple returns with their gaps, one per point.
    #[must_use]
    pub fn simple(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.simple).collect()
    }

    /// Present simple returns only.
    #[must_use]
    pub fn simple_values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.simple).collect()
    }

    /// Present log returns only.
    #[must_use]
    pub fn log_values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.log).collect()
    }

    /// Number of points whose simple return is undefined.
    #[must_use]
    pub fn missing(&self) -> usize {
        self.points.iter().filter(|p| p.simple.is_none()).count()
    }
}

/// (current - previous) / previous, or `None` if that is not finite.
#[must_use]
pub fn simple_return(previous: f64, current: f64) -> Option<f64> {
    let value = (current - previous) / previous;
    value.is_finite().then_some(value)
}

/// ln(current / previous), or `None` if that is not finite.
#[must_use]
pub fn log_return(previous: f64, current: f64) -> Option<f64> {
    let value = (current / previous).ln();
    value.is_finite().then_some(value)
}

/// Computes one return point per bar after the first.
///
/// The result has `series.len() - 1` points (none for fewer than two bars).
#[must_use]
pub fn compute_returns(series: &PriceSeries) -> ReturnSeries {
    let points: Vec<ReturnPoint> = series
        .bars()
        .windows(2)
        .map(|pair| {
            let previous = pair[0].close_f64();
            let current = pair[1].close_f64();
            ReturnPoint {
                date: pair[1].date,
                simple: simple_return(previous, current),
                log: log_return(previous, current),
            }
        })
        .collect();

    let missing = points.iter().filter(|p| p.simple.is_none()).count();
    if missing > 0 {
        tracing::warn!(missing, "Undefined returns (zero previous close)");
    }
    tracing::debug!(points = points.len(), "Computed returns");

    ReturnSeries { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retvol_data::PriceBar;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn series(closes: &[Decimal]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .zip(start.iter_days())
            .map(|(close, date)| PriceBar::new(date, *close, dec!(1000)))
            .collect()
    }

    #[test]
    fn three_price_example() {
        let returns = compute_returns(&series(&[dec!(100), dec!(110), dec!(99)]));

        assert_eq!(returns.len(), 2);
        let simple = returns.simple_values();
        assert!((simple[0] - 0.10).abs() < 1e-12);
        assert!((simple[1] + 0.10).abs() < 1e-12);

        let log = returns.log_values();
        assert!((log[0] - 1.1_f64.ln()).abs() < 1e-12);
        assert!((log[1] - 0.9_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn returns_dated_at_current_bar() {
        let returns = compute_returns(&series(&[dec!(100), dec!(110)]));
        assert_eq!(
            returns.points()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn length_is_one_shorter_than_prices() {
        for n in 0_usize..6 {
            let closes: Vec<Decimal> = (1..=n).map(Decimal::from).collect();
            let returns = compute_returns(&series(&closes));
            assert_eq!(returns.len(), n.saturating_sub(1));
        }
    }

    #[test]
    fn zero_previous_price_is_missing() {
        let returns = compute_returns(&series(&[dec!(100), dec!(0), dec!(50), dec!(0), dec!(0)]));

        let simple = returns.simple();
        assert_eq!(simple[0], Some(-1.0));
        assert_eq!(simple[1], None); // 50 / 0
        assert_eq!(simple[2], Some(-1.0));
        assert_eq!(simple[3], None); // 0 / 0
        assert_eq!(returns.missing(), 2);

        // ln(0) is not finite either
        assert_eq!(returns.points()[0].log, None);
    }

    #[test]
    fn each_value_matches_definition() {
        let closes = [dec!(40000), dec!(41000.5), dec!(39000.25), dec!(39500)];
        let returns = compute_returns(&series(&closes));
        let prices: Vec<f64> = series(&closes).closes();

        for (t, point) in returns.points().iter().enumerate() {
            let expected = (prices[t + 1] - prices[t]) / prices[t];
            assert!((point.simple.unwrap() - expected).abs() < 1e-15);
        }
    }
}
