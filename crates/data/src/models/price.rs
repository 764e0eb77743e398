//! Daily price data model.
//!
//! A `PriceSeries` is the cleaned, date-ordered input to every downstream
//! computation. Prices stay in `Decimal` until analytics converts them.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day: calendar date, closing price and USD-denominated volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: Decimal,
    pub volume_usd: Decimal,
}

impl PriceBar {
    #[must_use]
    pub const fn new(date: NaiveDate, close: Decimal, volume_usd: Decimal) -> Self {
        Self {
            date,
            close,
            volume_usd,
        }
    }

    /// Closing price as `f64`. NaN if the decimal does not fit.
    #[must_use]
    pub fn close_f64(&self) -> f64 {
        self.close.to_f64().unwrap_or(f64::NAN)
    }
}

/// Price bars ordered ascending by date.
///
/// Construction always sorts, so every consumer can rely on the ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Builds a series from bars in any order.
    ///
    /// The sort is stable: bars sharing a date keep their input order.
    #[must_use]
    pub fn from_bars(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self { bars }
    }

    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|bar| bar.date).collect()
    }

    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(PriceBar::close_f64).collect()
    }

    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|bar| bar.date)
    }

    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }

    /// Number of bars whose date equals the previous bar's date.
    #[must_use]
    pub fn duplicate_dates(&self) -> usize {
        self.bars
            .windows(2)
            .filter(|pair| pair[0].date == pair[1].date)
            .count()
    }
}

impl FromIterator<PriceBar> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PriceBar>>(iter: I) -> Self {
        Self::from_bars(iter.into_iter().collect())
    }
}
