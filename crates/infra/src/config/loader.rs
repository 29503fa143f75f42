//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when `ASSEMBLY_API_KEY` is set
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//!
//! ## Environment Variables
//! - `ASSEMBLY_API_KEY`: API key (required)
//! - `ASSEMBLY_BASE_URL`: API root
//! - `ASSEMBLY_SDK_VERSION`: value of the SDK version header
//! - `ASSEMBLY_RETRY_COUNT`: retries after the first attempt
//! - `ASSEMBLY_REQUESTS_PER_SECOND`: rate limit
//! - `ASSEMBLY_TIMEOUT_SECS`: per-attempt timeout
//! - `ASSEMBLY_RETRY_BACKOFF_MS`: delay before the first retry
//!
//! Unset optional variables keep their defaults.
//!
//! ## File Locations
//! `assembly.toml` then `assembly.json`, first in the working directory and
//! then in its parent. The format follows the file extension.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use assembly_domain::SdkConfig;

use super::{ConfigError, ConfigResult};

const CONFIG_FILE_NAMES: [&str; 2] = ["assembly.toml", "assembly.json"];

/// Load configuration from the environment, falling back to a config file.
///
/// # Errors
/// The file loader's error when the environment is incomplete and no
/// usable file exists.
pub fn load() -> ConfigResult<SdkConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from process environment variables.
///
/// See the module documentation for the variable names.
pub fn load_from_env() -> ConfigResult<SdkConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration through `lookup`, which maps variable names to values.
///
/// # Errors
/// - [`ConfigError::MissingApiKey`] when the key is unset or blank
/// - [`ConfigError::InvalidValue`] when a number does not parse
/// - [`ConfigError::Invalid`] when values are out of range
pub fn load_from_lookup<F>(lookup: F) -> ConfigResult<SdkConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = lookup("ASSEMBLY_API_KEY")
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)?;

    let mut config = SdkConfig::with_api_key(api_key);
    if let Some(base_url) = lookup("ASSEMBLY_BASE_URL") {
        config.base_url = base_url;
    }
    if let Some(version) = lookup("ASSEMBLY_SDK_VERSION") {
        config.sdk_version = version;
    }
    if let Some(value) = parse_var(&lookup, "ASSEMBLY_RETRY_COUNT")? {
        config.retry_count = value;
    }
    if let Some(value) = parse_var(&lookup, "ASSEMBLY_REQUESTS_PER_SECOND")? {
        config.requests_per_second = value;
    }
    if let Some(value) = parse_var(&lookup, "ASSEMBLY_TIMEOUT_SECS")? {
        config.timeout_secs = value;
    }
    if let Some(value) = parse_var(&lookup, "ASSEMBLY_RETRY_BACKOFF_MS")? {
        config.retry_backoff_ms = value;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, uses [`probe_config_paths`].
///
/// # Errors
/// - [`ConfigError::NotFound`] when an explicit path does not exist
/// - [`ConfigError::NoConfigFile`] when probing finds nothing
/// - read, parse or range errors for the file found
pub fn load_from_file(path: Option<PathBuf>) -> ConfigResult<SdkConfig> {
    let config_path = match path {
        Some(p) if !p.exists() => return Err(ConfigError::NotFound(p)),
        Some(p) => p,
        None => probe_config_paths().ok_or(ConfigError::NoConfigFile)?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|source| ConfigError::Io { path: config_path.clone(), source })?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse `contents`, choosing TOML or JSON by the extension of `path`.
fn parse_config(contents: &str, path: &Path) -> ConfigResult<SdkConfig> {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("json") {
        "toml" => Ok(toml::from_str(contents)?),
        "json" => Ok(serde_json::from_str(contents)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

/// First config file found relative to the working directory.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_config_paths_from(&cwd)
}

/// First config file found in `dir` or its parent.
pub fn probe_config_paths_from(dir: &Path) -> Option<PathBuf> {
    std::iter::once(dir)
        .chain(dir.parent())
        .flat_map(|base| CONFIG_FILE_NAMES.iter().map(move |name| base.join(name)))
        .find(|path| path.is_file())
}

fn parse_var<F, T>(lookup: &F, key: &str) -> ConfigResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}
