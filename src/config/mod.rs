//! Configuration management for tagpulse
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use crate::models::Language;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised by invalid option values
///
/// A configuration error indicates caller misuse rather than data trouble,
/// so it aborts the whole operation before any analysis runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// An option holds a value outside its valid range
    #[error("invalid value for {option}: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    /// Language code is not one of the supported set
    #[error("unsupported language: {0} (expected one of: en, pt)")]
    UnsupportedLanguage(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search API configuration
    pub api: ApiConfig,

    /// Default search parameters
    #[serde(default)]
    pub search: SearchDefaults,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bearer token for the recent-search endpoint
    pub bearer_token: String,

    /// Endpoint base URL override (primarily for tests)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Default parameters applied to searches when the CLI does not override them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDefaults {
    /// Restrict results to a language; `None` searches all languages
    #[serde(default)]
    pub language: Option<Language>,

    /// Maximum posts to fetch per search
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// How many days back from now to search (1..=6)
    #[serde(default = "default_n_days")]
    pub n_days: i64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_results() -> u32 {
    10
}

fn default_n_days() -> i64 {
    1
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("text")
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            language: None,
            max_results: default_max_results(),
            n_days: default_n_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let bearer_token = std::env::var("TAGPULSE_BEARER_TOKEN")
            .context("TAGPULSE_BEARER_TOKEN is not set")?;

        let base_url = std::env::var("TAGPULSE_API_URL").ok();

        let request_timeout_secs = std::env::var("TAGPULSE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or_else(default_request_timeout);

        let language = match std::env::var("TAGPULSE_LANGUAGE") {
            Ok(code) => Some(
                Language::parse(&code)
                    .ok_or(ConfigurationError::UnsupportedLanguage(code))?,
            ),
            Err(_) => None,
        };

        let max_results = std::env::var("TAGPULSE_MAX_RESULTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or_else(default_max_results);

        let n_days = std::env::var("TAGPULSE_N_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or_else(default_n_days);

        let level =
            std::env::var("TAGPULSE_LOG_LEVEL").unwrap_or_else(|_| default_log_level());
        let format =
            std::env::var("TAGPULSE_LOG_FORMAT").unwrap_or_else(|_| default_log_format());

        Ok(Self {
            api: ApiConfig {
                bearer_token,
                base_url,
                request_timeout_secs,
            },
            search: SearchDefaults {
                language,
                max_results,
                n_days,
            },
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
