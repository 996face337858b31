use serde::{Deserialize, Serialize};

use super::collectors::CollectorsConfig;
use super::errors::ConfigError;
use super::loggers::LoggersConfig;
use super::logging::LoggingConfig;
use super::subprocessors::SubprocessorsConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-collector.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-collector/config.toml";

/// Main configuration structure for Ferrous Collector
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Ingestion endpoints
    #[serde(default)]
    pub collectors: CollectorsConfig,

    #[serde(default)]
    pub subprocessors: SubprocessorsConfig,

    /// Output sinks
    #[serde(default)]
    pub loggers: LoggersConfig,

    #[serde(default)]
    pub queue: QueueConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GlobalConfig {
    /// Name attached to every message produced by this instance.
    #[serde(default = "default_identity")]
    pub identity: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            identity: default_identity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueueConfig {
    /// Capacity of each sink's delivery queue.
    #[serde(default = "default_channel_buffer_size")]
    pub channel_buffer_size: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer_size(),
        }
    }
}

fn default_identity() -> String {
    "collector".to_string()
}

fn default_channel_buffer_size() -> usize {
    512
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-collector.toml in current directory
    /// 3. /etc/ferrous-collector/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(identity) = overrides.identity {
            self.global.identity = identity;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue.channel_buffer_size == 0 {
            return Err(ConfigError::Validation(
                "Queue channel_buffer_size cannot be 0".to_string(),
            ));
        }

        if !self.collectors.any_enabled() {
            return Err(ConfigError::Validation("No collector enabled".to_string()));
        }

        if !self.loggers.any_enabled() {
            return Err(ConfigError::Validation("No logger enabled".to_string()));
        }

        let influx = &self.loggers.influxdb;
        if influx.enable && influx.server_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "InfluxDB logger enabled without server_url".to_string(),
            ));
        }
        if influx.enable && influx.batch_size == 0 {
            return Err(ConfigError::Validation(
                "InfluxDB batch_size cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("cannot serialize: {}", e)))?;
        std::fs::write(path, toml_string).map_err(|e| ConfigError::FileWrite {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub identity: Option<String>,
}
