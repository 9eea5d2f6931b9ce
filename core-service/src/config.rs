//! Configuration module

use std::path::PathBuf;

use thiserror::Error;

use crate::constants;

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Classification API base URL
    pub api_base: String,

    /// Directory holding persisted state
    pub data_dir: PathBuf,

    /// Request timeout in seconds, if any
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{0}': {1}")]
    InvalidApiBase(String, String),

    #[error("API base URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_base: constants::get_api_base(),
            data_dir: constants::get_data_dir(),
            timeout_secs: constants::get_timeout_secs(),
        }
    }

    /// Override the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Reject base URLs the HTTP client could never reach
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api_base)
            .map_err(|e| ConfigError::InvalidApiBase(self.api_base.clone(), e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}
