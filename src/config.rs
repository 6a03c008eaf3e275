//! Command-line and environment configuration.
//!
//! The API base URL comes from `--api-base-url` or `API_BASE_URL`; the request
//! timeout is fixed. An empty base URL is rejected before the terminal is touched.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;

/// Base URL used when neither the flag nor the environment provide one.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Every request fails with status `0` once this elapses.
pub const API_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug, Clone)]
#[command(name = "user-registry", version, about = "Create, list and delete users through a REST API")]
pub struct Cli {
    /// Base URL of the users API.
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Theme file (`key = #RRGGBB` lines). Created with defaults when missing.
    #[arg(long, env = "USER_REGISTRY_THEME", default_value = "theme.conf")]
    pub theme: PathBuf,

    /// Where tracing output goes; the terminal belongs to the UI.
    #[arg(long, env = "USER_REGISTRY_LOG", default_value = "user-registry.log")]
    pub log_file: PathBuf,
}

/// Connection settings handed to [`crate::api::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: API_TIMEOUT,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.api_base_url.clone())
    }

    /// Startup check: a missing base URL is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        Ok(())
    }

    /// Join `endpoint` onto the base URL with exactly one `/` between them.
    pub fn api_url(&self, endpoint: &str) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        if endpoint.starts_with('/') {
            format!("{base}{endpoint}")
        } else {
            format!("{base}/{endpoint}")
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
