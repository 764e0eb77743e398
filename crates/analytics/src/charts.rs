//! Chart specifications handed to a renderer.
//!
//! Nothing here draws. A [`ChartSpec`] carries titles, axis labels and the
//! data to plot; the terminal viewer and the JSON `describe` output both
//! consume it.

use crate::returns::ReturnSeries;
use crate::volatility::VolatilitySeries;
use chrono::NaiveDate;
use retvol_data::PriceSeries;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HISTOGRAM_BINS: usize = 60;

/// One equal-width histogram bucket `[lower, upper)`; the last bucket also
/// includes its upper edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Line { points: Vec<(NaiveDate, f64)> },
    Histogram { bins: Vec<HistogramBin> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Legend entry, if the chart has one
    pub series_label: Option<String>,
    pub data: ChartData,
}

/// Compact description of a chart, without the raw data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSummary {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: &'static str,
    /// Line points or histogram bins
    pub len: usize,
    pub x_range: Option<(String, String)>,
    pub y_range: Option<(f64, f64)>,
}

impl ChartSpec {
    /// Inclusive (min, max) of the plotted y values; bin counts for histograms.
    #[must_use]
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let values: Vec<f64> = match &self.data {
            ChartData::Line { points } => points.iter().map(|(_, y)| *y).collect(),
            ChartData::Histogram { bins } => bins.iter().map(|b| b.count as f64).collect(),
        };
        min_max(&values)
    }

    #[must_use]
    pub fn summary(&self) -> ChartSummary {
        let (kind, len, x_range) = match &self.data {
            ChartData::Line { points } => (
                "line",
                points.len(),
                points
                    .first()
                    .zip(points.last())
                    .map(|((first, _), (last, _))| (first.to_string(), last.to_string())),
            ),
            ChartData::Histogram { bins } => (
                "histogram",
                bins.len(),
                bins.first().zip(bins.last()).map(|(first, last)| {
                    (format!("{:.6}", first.lower), format!("{:.6}", last.upper))
                }),
            ),
        };

        ChartSummary {
            title: self.title.clone(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            kind,
            len,
            x_range,
            y_range: self.y_bounds(),
        }
    }
}

/// Splits `values` into `bins` equal-width buckets spanning [min, max].
///
/// Non-finite values are ignored. When every value is equal the range is
/// widened to value ± 0.5. Returns an empty vector for no data or zero bins.
#[must_use]
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some((mut lo, mut hi)) = min_max(&finite) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0u64; bins];
    for value in finite {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (((value - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

#[must_use]
pub fn price_chart(asset: &str, prices: &PriceSeries) -> ChartSpec {
    let points = prices
        .bars()
        .iter()
        .map(|bar| (bar.date, bar.close_f64()))
        .filter(|(_, close)| close.is_finite())
        .collect();

    ChartSpec {
        title: format!("{asset} Price Over Time"),
        x_label: "Date".to_string(),
        y_label: "Price (USD)".to_string(),
        series_label: Some(format!("{asset} Price")),
        data: ChartData::Line { points },
    }
}

/// Line of the defined volatility values; undefined positions are gaps.
#[must_use]
pub fn volatility_chart(asset: &str, volatility: &VolatilitySeries) -> ChartSpec {
    ChartSpec {
        title: format!("{asset} Rolling Volatility ({}D)", volatility.window),
        x_label: "Date".to_string(),
        y_label: "Volatility".to_string(),
        series_label: Some(format!("{}D Annualized Volatility", volatility.window)),
        data: ChartData::Line {
            points: volatility.defined(),
        },
    }
}

#[must_use]
pub fn returns_histogram(asset: &str, returns: &ReturnSeries, bins: usize) -> ChartSpec {
    ChartSpec {
        title: format!("{asset} Daily Returns Distribution"),
        x_label: "Daily Return".to_string(),
        y_label: "Count".to_string(),
        series_label: None,
        data: ChartData::Histogram {
            bins: histogram(&returns.simple_values(), bins),
        },
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::compute_returns;
    use crate::volatility::compute_rolling_volatility;
    use retvol_data::PriceBar;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn prices(n: i64) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        (0..n)
            .zip(start.iter_days())
            .map(|(i, date)| PriceBar::new(date, Decimal::from(1000 + (i * 37) % 101), dec!(5)))
            .collect()
    }

    // ============================================
    // histogram
    // ============================================

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin()).collect();
        let bins = histogram(&values, DEFAULT_HISTOGRAM_BINS);

        assert_eq!(bins.len(), 60);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 1000);
    }

    #[test]
    fn histogram_edges_span_min_to_max() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);

        assert_eq!(bins.first().unwrap().lower, 0.0);
        assert_eq!(bins.last().unwrap().upper, 4.0);
        // [0,1) [1,2) [2,3) [3,4]
        let counts: Vec<u64> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn histogram_of_constant_values() {
        let bins = histogram(&[0.01; 7], 10);
        assert_eq!(bins.len(), 10);
        assert!((bins[0].lower - (0.01 - 0.5)).abs() < 1e-12);
        assert!((bins[9].upper - (0.01 + 0.5)).abs() < 1e-12);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 7);
    }

    #[test]
    fn histogram_ignores_non_finite_and_handles_empty() {
        assert!(histogram(&[], 60).is_empty());
        assert!(histogram(&[f64::NAN], 60).is_empty());
        assert!(histogram(&[1.0], 0).is_empty());
        let bins = histogram(&[1.0, f64::INFINITY, 2.0], 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 2);
    }

    // ============================================
    // chart builders
    // ============================================

    #[test]
    fn price_chart_plots_every_close() {
        let series = prices(10);
        let chart = price_chart("BTC", &series);

        assert_eq!(chart.title, "BTC Price Over Time");
        assert_eq!(chart.y_label, "Price (USD)");
        let ChartData::Line { points } = &chart.data else {
            panic!("expected line chart");
        };
        assert_eq!(points.len(), 10);
    }

    #[test]
    fn volatility_chart_skips_undefined_positions() {
        let series = prices(60);
        let returns = compute_returns(&series);
        let vol = compute_rolling_volatility(&returns, 30, 365);
        let chart = volatility_chart("BTC", &vol);

        assert_eq!(chart.title, "BTC Rolling Volatility (30D)");
        assert_eq!(chart.series_label.as_deref(), Some("30D Annualized Volatility"));
        assert_eq!(chart.summary().len, 59 - 29);
    }

    #[test]
    fn returns_histogram_uses_requested_bins() {
        let returns = compute_returns(&prices(200));
        let chart = returns_histogram("BTC", &returns, 60);
        let summary = chart.summary();

        assert_eq!(summary.kind, "histogram");
        assert_eq!(summary.len, 60);
        assert_eq!(summary.x_label, "Daily Return");
    }

    #[test]
    fn summary_serializes_without_raw_points() {
        let chart = price_chart("BTC", &prices(3));
        let json = serde_json::to_value(chart.summary()).unwrap();

        assert_eq!(json["kind"], "line");
        assert_eq!(json["len"], 3);
        assert_eq!(json["x_range"][0], "2023-01-01");
        assert!(json.get("points").is_none());
    }
}
