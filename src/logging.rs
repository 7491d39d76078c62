//! Logger setup
//!
//! Logging goes through the `log` facade; the binary installs `env_logger`.
//! `RUST_LOG` always wins over the configured level.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use log::LevelFilter;

/// Level used when `RUST_LOG` is not set
pub fn default_filter(config: &LoggingConfig, debug: bool) -> Result<LevelFilter> {
    if debug {
        return Ok(LevelFilter::Debug);
    }
    config.level_filter()
}

/// Install the global logger
pub fn init(config: &LoggingConfig, debug: bool) -> Result<()> {
    let filter = default_filter(config, debug)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter.to_string().to_lowercase()),
    )
    .format_timestamp_millis()
    .try_init()
    .context("Failed to initialize logger")
}
