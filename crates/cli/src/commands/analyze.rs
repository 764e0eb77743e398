//! Analyze CLI command.
//!
//! Runs the full computation and prints the statistics report to stdout.

use anyhow::Result;
use clap::Args;
use retvol_analytics::format_report;
use retvol_core::MetricsFormatter;

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Price CSV file (overrides data.path from the config)
    #[arg(short, long)]
    pub data: Option<String>,
}

/// Runs the analyze command.
///
/// # Errors
/// Returns an error if the input cannot be loaded or summarized.
pub fn run_analyze(config_path: &str, args: &AnalyzeArgs) -> Result<()> {
    let session = super::prepare(config_path, args.data.as_deref())?;

    if let Some(latest) = session.analysis.volatility.latest() {
        tracing::info!(
            "Latest {}D annualized volatility: {}",
            session.analysis.volatility.window,
            MetricsFormatter::percent(latest, 2)
        );
    }

    print!("{}", format_report(&session.analysis));
    Ok(())
}
