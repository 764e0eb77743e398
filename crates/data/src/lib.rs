//! Price data ingestion for return and volatility analysis.
//!
//! This crate provides:
//! - Daily price models (`PriceBar`, `PriceSeries`)
//! - CSV ingestion with coercion of malformed numeric fields to missing

pub mod csv_loader;
pub mod models;

pub use csv_loader::{CsvPriceLoader, IngestReport};
pub use models::{PriceBar, PriceSeries};
