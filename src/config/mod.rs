//! Configuration module for the coursegen client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

use crate::errors::AppError;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the course backend, without trailing slash
    pub api_url: String,
    /// Path to the JSON file holding the session context
    pub session_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log line format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_url = normalize_api_url(
            &env::var("COURSEGEN_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string()),
        )?;

        let session_path = env::var("COURSEGEN_SESSION_PATH")
            .unwrap_or_else(|_| "./data/session.json".to_string())
            .into();

        let log_level = env::var("COURSEGEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("COURSEGEN_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("text") | Err(_) => LogFormat::Text,
            Ok(other) => {
                return Err(AppError::Validation(format!(
                    "Invalid COURSEGEN_LOG_FORMAT: {}",
                    other
                )))
            }
        };

        Ok(Self {
            api_url,
            session_path,
            log_level,
            log_format,
        })
    }

    /// Replace the base URL, e.g. from a command-line flag.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, AppError> {
        self.api_url = normalize_api_url(api_url)?;
        Ok(self)
    }
}

/// Check the scheme and strip trailing slashes.
pub fn normalize_api_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AppError::Validation(format!(
            "Invalid API URL (expected http:// or https://): {}",
            raw
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
