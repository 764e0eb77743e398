pub mod config;
pub mod config_loader;
pub mod metrics_formatter;

pub use config::{AnalysisConfig, AppConfig, DataConfig};
pub use config_loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
pub use metrics_formatter::MetricsFormatter;
