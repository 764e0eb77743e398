//! CLI commands for return and volatility analysis.

pub mod analyze;
pub mod charts;
pub mod describe;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use charts::{run_charts, ChartsArgs};
pub use describe::{run_describe, DescribeArgs};

use anyhow::Result;
use retvol_analytics::Analysis;
use retvol_core::ConfigLoader;
use retvol_data::{CsvPriceLoader, IngestReport};

/// Ingest counts plus everything derived from the loaded prices.
pub struct Session {
    pub ingest: IngestReport,
    pub analysis: Analysis,
}

/// Loads configuration, applies a `--data` override, ingests the price file
/// and runs the analysis.
///
/// # Errors
/// Returns an error if configuration is invalid, the price file cannot be
/// read, or there are too few returns to summarize.
pub fn prepare(config_path: &str, data_override: Option<&str>) -> Result<Session> {
    let mut config = ConfigLoader::load_from(config_path)?;
    if let Some(path) = data_override {
        config.data.path = path.to_string();
    }

    let loader = CsvPriceLoader::new(
        &config.data.date_column,
        &config.data.close_column,
        &config.data.volume_column,
    );
    let (prices, ingest) = loader.load(&config.data.path)?;
    tracing::info!("Ingest: {}", ingest.summary());

    if let (Some(first), Some(last)) = (prices.first_date(), prices.last_date()) {
        tracing::info!("Date range: {} to {}", first, last);
    }

    let analysis = Analysis::run(&prices, &config.analysis)?;

    Ok(Session {
        ingest,
        analysis,
    })
}
