use crate::config::AppConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";
pub const ENV_PREFIX: &str = "RETVOL_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from `path` by layering built-in defaults, the TOML
    /// file, and `RETVOL_`-prefixed environment variables (`__` separates
    /// nested keys).
    ///
    /// A missing TOML file at `path` is not an error; the defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the merged values fail validation.
    pub fn load_from(path: &str) -> Result<AppConfig> {
        let config: AppConfig = Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load configuration from {path}"))?;

        config.validate()?;
        tracing::debug!(?config, "configuration loaded");

        Ok(config)
    }

    fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
