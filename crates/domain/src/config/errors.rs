/// Failures while reading, writing or checking the collector configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read collector config {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("cannot write collector config {path}: {reason}")]
    FileWrite { path: String, reason: String },

    #[error("collector config is not valid TOML: {0}")]
    Parse(String),

    #[error("collector config rejected: {0}")]
    Validation(String),
}
