//! Charts CLI command.

use anyhow::Result;
use clap::Args;

/// Arguments for the charts command.
#[derive(Args, Debug, Clone)]
pub struct ChartsArgs {
    /// Price CSV file (overrides data.path from the config)
    #[arg(short, long)]
    pub data: Option<String>,

    /// Optional log file path (logs to file instead of stderr)
    #[arg(long)]
    pub log_file: Option<String>,
}

/// Runs the analysis, then hands the chart specifications to the viewer.
///
/// # Errors
/// Returns an error if the input cannot be loaded or the terminal cannot be
/// set up.
pub fn run_charts(config_path: &str, args: &ChartsArgs) -> Result<()> {
    let session = super::prepare(config_path, args.data.as_deref())?;
    crate::tui_charts::run(session.analysis.charts)
}
