//! Application configuration management.
//!
//! Configuration is merged from built-in defaults, an optional TOML file and
//! environment variables, in increasing order of precedence.

use crate::CliError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use wx_engine::EngineConfig;
use wx_sqlite::config::SqliteConfig;

/// The composed configuration of the export tool.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Where the campaign data lives
    #[serde(default)]
    pub database: SqliteConfig,

    /// Paging behaviour of the export engine
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. The config file, if one is given
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `APP_<SECTION>__<KEY>` to `<section>.<key>`:
    ///
    /// ```bash
    /// export APP_DATABASE__DATABASE_PATH="/data/campaigns.db"
    /// export APP_ENGINE__PAGE_SIZE=500
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if !path.exists() {
                return Err(CliError::MissingConfig(path.to_owned()).into());
            }
            config = config.add_source(config::File::from(path));
        }

        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        config.build()?.try_deserialize().map_err(Into::into)
    }
}
