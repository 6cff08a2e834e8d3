// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variables with this prefix override file values,
/// e.g. `HEALTH__LISTEN_ADDR=127.0.0.1:9000`.
pub const ENV_PREFIX: &str = "HEALTH";

/// Load configuration from a file (YAML, JSON or TOML) layered with
/// `HEALTH__*` environment variables. A missing file yields the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    load_config_with_env(path, ENV_PREFIX)
}

/// Same as [`load_config`] with a caller-chosen environment prefix.
pub fn load_config_with_env<P: AsRef<Path>>(path: P, env_prefix: &str) -> Result<Config> {
    let path = path.as_ref();
    let settings = ::config::Config::builder()
        .add_source(::config::File::from(path).required(false))
        .add_source(::config::Environment::with_prefix(env_prefix).separator("__"))
        .build()
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Config = settings
        .try_deserialize()
        .context("Failed to parse config")?;

    config.validate()?;
    Ok(config)
}
