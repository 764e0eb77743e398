use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub analysis: AnalysisConfig,
}

/// Where the price file lives and which columns carry the fields we need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: String,
    pub date_column: String,
    pub close_column: String,
    pub volume_column: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Label used in chart titles and the report header
    pub asset: String,
    /// Trailing observations per rolling volatility estimate
    pub rolling_window: usize,
    /// Periods per year used for annualization (crypto trades every day)
    pub periods_per_year: u32,
    pub histogram_bins: usize,
    /// Significance level for the normality decision
    pub significance_level: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                path: "BTC-Daily.csv".to_string(),
                date_column: "date".to_string(),
                close_column: "close".to_string(),
                volume_column: "Volume USD".to_string(),
            },
            analysis: AnalysisConfig {
                asset: "BTC".to_string(),
                rolling_window: 30,
                periods_per_year: 365,
                histogram_bins: 60,
                significance_level: 0.05,
            },
        }
    }
}

impl AppConfig {
    /// Checks that the analysis parameters describe a computable pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range parameter.
    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        ensure!(
            analysis.rolling_window >= 2,
            "analysis.rolling_window must be at least 2, got {}",
            analysis.rolling_window
        );
        ensure!(
            analysis.histogram_bins >= 1,
            "analysis.histogram_bins must be at least 1"
        );
        ensure!(
            analysis.periods_per_year > 0,
            "analysis.periods_per_year must be positive"
        );
        ensure!(
            analysis.significance_level > 0.0 && analysis.significance_level < 1.0,
            "analysis.significance_level must be in (0, 1), got {}",
            analysis.significance_level
        );
        ensure!(!self.data.path.is_empty(), "data.path must not be empty");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_daily_btc_analysis() {
        let config = AppConfig::default();
        assert_eq!(config.data.path, "BTC-Daily.csv");
        assert_eq!(config.data.volume_column, "Volume USD");
        assert_eq!(config.analysis.rolling_window, 30);
        assert_eq!(config.analysis.periods_per_year, 365);
        assert_eq!(config.analysis.histogram_bins, 60);
        assert!((config.analysis.significance_level - 0.05).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_window() {
        let mut config = AppConfig::default();
        config.analysis.rolling_window = 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rolling_window"));
    }

    #[test]
    fn validate_rejects_out_of_range_alpha() {
        let mut config = AppConfig::default();
        config.analysis.significance_level = 1.0;
        assert!(config.validate().is_err());

        config.analysis.significance_level = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
