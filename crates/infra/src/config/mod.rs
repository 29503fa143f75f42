//! Configuration loading
//!
//! Builds an [`SdkConfig`](assembly_domain::SdkConfig) from environment
//! variables or a TOML/JSON file.

pub mod loader;

use std::path::PathBuf;

use assembly_common::validation::ValidationError;
use assembly_domain::{AssemblyError, ErrorKind};
use thiserror::Error;

// Re-export commonly used items
pub use loader::{
    load, load_from_env, load_from_file, load_from_lookup, probe_config_paths,
    probe_config_paths_from,
};

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ASSEMBLY_API_KEY is missing or empty")]
    MissingApiKey,

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No config file found in any of the standard locations")]
    NoConfigFile,

    #[error("Failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML format")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON format")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

/// Result alias for the loader
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl From<ConfigError> for AssemblyError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingApiKey => AssemblyError::missing_api_key(),
            other => AssemblyError::new(ErrorKind::Config)
                .with_message(other.to_string())
                .with_source(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_into_assembly_errors() {
        let err: AssemblyError = ConfigError::MissingApiKey.into();
        assert_eq!(err.kind(), ErrorKind::MissingApiKey);

        let err: AssemblyError = ConfigError::InvalidValue {
            key: "ASSEMBLY_RETRY_COUNT".into(),
            message: "invalid digit found in string".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("ASSEMBLY_RETRY_COUNT"));
    }
}
