use anyhow::Context;
use ferrous_collector_domain::{CliOverrides, Config};

/// Loads and validates the configuration.
///
/// Called before logging is initialised; failures travel in the returned
/// error chain.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("Failed to load configuration")?;

    config.validate().context("Invalid configuration")?;

    Ok(config)
}
