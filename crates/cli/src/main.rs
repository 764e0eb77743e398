use clap::{Parser, Subcommand};

mod commands;
mod tui_charts;

use commands::{AnalyzeArgs, ChartsArgs, DescribeArgs};

#[derive(Parser)]
#[command(name = "retvol")]
#[command(about = "Return, volatility and distribution statistics for a daily price series", long_about = None)]
struct Cli {
    /// Config file path (missing file means built-in defaults)
    #[arg(short, long, global = true, default_value = retvol_core::DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute statistics and print the report
    Analyze(AnalyzeArgs),
    /// Open the interactive chart viewer
    Charts(ChartsArgs),
    /// Print chart specifications as JSON
    Describe(DescribeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging (disabled for the chart viewer to prevent screen corruption, unless log_file is provided)
    match &cli.command {
        Commands::Charts(ChartsArgs {
            log_file: Some(path),
            ..
        }) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Commands::Charts(_) => {
            // No logging for the chart viewer
        }
        _ => {
            // Report goes to stdout, logs to stderr
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }

    match cli.command {
        Commands::Analyze(args) => commands::run_analyze(&cli.config, &args)?,
        Commands::Charts(args) => commands::run_charts(&cli.config, &args)?,
        Commands::Describe(args) => commands::run_describe(&cli.config, &args)?,
    }

    Ok(())
}
