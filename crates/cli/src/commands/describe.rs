//! Describe CLI command.
//!
//! Prints the chart specifications and distribution shape as JSON so an
//! external renderer can pick them up.

use anyhow::Result;
use clap::Args;
use retvol_analytics::ChartSummary;
use serde::Serialize;

/// Arguments for the describe command.
#[derive(Args, Debug, Clone)]
pub struct DescribeArgs {
    /// Price CSV file (overrides data.path from the config)
    #[arg(short, long)]
    pub data: Option<String>,

    /// Include the full plotted data, not just the summaries
    #[arg(long, default_value = "false")]
    pub full: bool,
}

#[derive(Serialize)]
struct Distribution {
    observations: usize,
    skewness: Option<f64>,
    kurtosis: Option<f64>,
    sharpe_ratio: Option<f64>,
    annualized_sharpe_ratio: Option<f64>,
}

#[derive(Serialize)]
struct Description<'a> {
    asset: &'a str,
    rows_kept: u64,
    rows_dropped: u64,
    distribution: Distribution,
    charts: Vec<ChartSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart_data: Option<&'a [retvol_analytics::ChartSpec]>,
}

/// Runs the describe command.
///
/// # Errors
/// Returns an error if the input cannot be loaded or serialization fails.
pub fn run_describe(config_path: &str, args: &DescribeArgs) -> Result<()> {
    let session = super::prepare(config_path, args.data.as_deref())?;
    let analysis = &session.analysis;

    let moments = analysis.moments.as_ref().ok();
    let description = Description {
        asset: &analysis.asset,
        rows_kept: session.ingest.rows_kept,
        rows_dropped: session.ingest.rows_dropped(),
        distribution: Distribution {
            observations: analysis.summary.observations,
            skewness: moments.map(|m| m.skewness),
            kurtosis: moments.map(|m| m.kurtosis),
            sharpe_ratio: analysis.summary.sharpe_ratio().ok(),
            annualized_sharpe_ratio: analysis.summary.annualized_sharpe_ratio().ok(),
        },
        charts: analysis.charts.iter().map(|chart| chart.summary()).collect(),
        chart_data: args.full.then_some(analysis.charts.as_slice()),
    };

    println!("{}", serde_json::to_string_pretty(&description)?);
    Ok(())
}
