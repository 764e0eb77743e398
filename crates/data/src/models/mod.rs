//! Data models for price analysis.
//!
//! Prices and volumes use `rust_decimal::Decimal` as read from the source file.

pub mod price;

pub use price::{PriceBar, PriceSeries};
