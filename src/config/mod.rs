//! Configuration management for the mirai client.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It configures where the diary service lives,
//! which user's images are fetched, and how long a request may take.
//!
//! # Environment Variables
//!
//! - `MIRAI_API_BASE_URL`: Base URL of the diary service (defaults to http://localhost:8000)
//! - `MIRAI_USER_ID`: User whose latest image is shown (defaults to 1)
//! - `MIRAI_TIMEOUT_SECS`: Per-request timeout in seconds (defaults to 30)

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_ID, ENV_VAR_API_BASE_URL,
    ENV_VAR_TIMEOUT_SECS, ENV_VAR_USER_ID, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::time::Duration;

/// Configuration for the mirai client.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use mirai::Config;
///
/// let config = Config {
///     api_base_url: "http://diary.internal:8000".to_string(),
///     user_id: 1,
///     timeout_secs: 10,
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use mirai::Config;
/// use std::env;
///
/// env::set_var("MIRAI_API_BASE_URL", "https://diary.example.com/");
///
/// let config = Config::load().expect("Failed to load configuration");
/// assert_eq!(config.api_base_url, "https://diary.example.com");
/// ```
#[derive(Clone)]
pub struct Config {
    /// Base URL of the diary service, without a trailing slash.
    pub api_base_url: String,

    /// User whose latest generated image is fetched after writing.
    pub user_id: i64,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &REDACTED_PLACEHOLDER)
            .field("user_id", &self.user_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Config pointing at `base_url` with default user and timeout.
    ///
    /// Mostly useful in tests, where the base URL is a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Config {
            api_base_url: normalize_base_url(&base_url.into()),
            ..Default::default()
        }
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but cannot be parsed, or
    /// if the resulting configuration fails [`Config::validate`].
    pub fn load() -> AppResult<Self> {
        let api_base_url = env::var(ENV_VAR_API_BASE_URL)
            .map(|raw| normalize_base_url(&raw))
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let user_id = match env::var(ENV_VAR_USER_ID) {
            Ok(raw) => raw.trim().parse::<i64>().map_err(|_| {
                AppError::Config(format!("{} must be an integer, got '{}'", ENV_VAR_USER_ID, raw))
            })?,
            Err(_) => DEFAULT_USER_ID,
        };

        let timeout_secs = match env::var(ENV_VAR_TIMEOUT_SECS) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_VAR_TIMEOUT_SECS, raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let config = Config {
            api_base_url,
            user_id,
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when:
    /// - the base URL is empty or not an http(s) URL
    /// - the user id is not positive
    /// - the timeout is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use mirai::Config;
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.api_base_url = "ftp://diary".to_string();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.api_base_url.is_empty() {
            return Err(AppError::Config("API base URL is empty".to_string()));
        }

        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(AppError::Config(
                "API base URL must start with http:// or https://".to_string(),
            ));
        }

        if self.user_id <= 0 {
            return Err(AppError::Config(format!(
                "User id must be positive, got {}",
                self.user_id
            )));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
