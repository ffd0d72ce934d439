//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Where finance data is read from.
    #[serde(default)]
    pub data: DataConfig,
    /// Display defaults.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Data source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding the JSON snapshot files.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Period selector used when none is given (`month`, `quarter` or `year`).
    #[serde(default = "default_period")]
    pub default_period: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
        }
    }
}

fn default_period() -> String {
    "month".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "tallybook=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLYBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(
            ["TALLYBOOK__DATA__DIR", "TALLYBOOK__DISPLAY__DEFAULT_PERIOD"],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.data.dir, PathBuf::from("data"));
                assert_eq!(config.display.default_period, "month");
                assert_eq!(config.log.filter, "tallybook=info");
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("TALLYBOOK__DATA__DIR", Some("/tmp/books")),
                ("TALLYBOOK__DISPLAY__DEFAULT_PERIOD", Some("quarter")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.data.dir, PathBuf::from("/tmp/books"));
                assert_eq!(config.display.default_period, "quarter");
            },
        );
    }
}
