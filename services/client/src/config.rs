//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::time::Duration;

use reqwest::Url;
use tracing::Level;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SAVE_ENTRY_ROUTE: &str = "/entries";
pub const DEFAULT_INSIGHTS_ROUTE: &str = "/insights";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Where the WasteWise API lives. Handed to the HTTP adapter at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub save_entry_route: String,
    pub insights_route: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// An API at `base_url` with the default routes and timeout.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            save_entry_route: DEFAULT_SAVE_ENTRY_ROUTE.to_string(),
            insights_route: DEFAULT_INSIGHTS_ROUTE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn save_entry_url(&self) -> String {
        format!("{}{}", self.base_url, self.save_entry_route)
    }

    pub fn insights_url(&self) -> String {
        format!("{}{}", self.base_url, self.insights_route)
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api: ApiConfig,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // --- API location ---
        let base_url = lookup("WASTEWISE_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidValue("WASTEWISE_API_URL".to_string(), e.to_string())
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue(
                "WASTEWISE_API_URL".to_string(),
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        let save_entry_route = route(
            lookup("WASTEWISE_SAVE_ENTRY_ROUTE"),
            DEFAULT_SAVE_ENTRY_ROUTE,
        );
        let insights_route = route(lookup("WASTEWISE_INSIGHTS_ROUTE"), DEFAULT_INSIGHTS_ROUTE);

        let timeout_str =
            lookup("WASTEWISE_TIMEOUT_SECS").unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string());
        let timeout_secs = timeout_str
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "WASTEWISE_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a positive number of seconds", timeout_str),
                )
            })?;

        // --- Logging ---
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "WARN".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            api: ApiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                save_entry_route,
                insights_route,
                timeout: Duration::from_secs(timeout_secs),
            },
            log_level,
        })
    }
}

fn route(value: Option<String>, default: &str) -> String {
    match value {
        Some(r) if r.starts_with('/') => r,
        Some(r) => format!("/{}", r),
        None => default.to_string(),
    }
}
