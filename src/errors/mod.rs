//! Error handling module for the coursegen client.
//!
//! Every failure carries a distinguishable kind so callers and tests can assert
//! on the cause, while the user-facing surface keeps a single generic message
//! for anything that is not a validation problem.

use std::fmt;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const CANCELLED: &str = "CANCELLED";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

/// Message shown to the user for every non-validation failure.
pub const GENERIC_MESSAGE: &str = "Internal Server Error";

/// Coarse classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Server,
    Parse,
    Unauthorized,
    Cancelled,
    Storage,
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Input rejected before any request was made
    Validation(String),
    /// Transport failure (connect, DNS, TLS, reset)
    Network(String),
    /// Backend answered with a failure status or `success: false`
    Server { status: u16, message: String },
    /// Response body could not be decoded
    Parse(String),
    /// Backend refused the session
    Unauthorized(String),
    /// The view that issued the request is gone
    Cancelled,
    /// Local session file could not be read or written
    Storage(String),
}

impl AppError {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Network(_) => ErrorKind::Network,
            AppError::Server { .. } => ErrorKind::Server,
            AppError::Parse(_) => ErrorKind::Parse,
            AppError::Unauthorized(_) => ErrorKind::Unauthorized,
            AppError::Cancelled => ErrorKind::Cancelled,
            AppError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Validation => codes::VALIDATION_ERROR,
            ErrorKind::Network => codes::NETWORK_ERROR,
            ErrorKind::Server => codes::SERVER_ERROR,
            ErrorKind::Parse => codes::PARSE_ERROR,
            ErrorKind::Unauthorized => codes::UNAUTHORIZED,
            ErrorKind::Cancelled => codes::CANCELLED,
            ErrorKind::Storage => codes::STORAGE_ERROR,
        }
    }

    /// Get the detailed error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Network(msg) => msg.clone(),
            AppError::Server { status, message } => format!("{} (status {})", message, status),
            AppError::Parse(msg) => msg.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Cancelled => "Request cancelled".to_string(),
            AppError::Storage(msg) => msg.clone(),
        }
    }

    /// Message suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            _ => GENERIC_MESSAGE.to_string(),
        }
    }

    /// Build a server error from an HTTP status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => AppError::Unauthorized(message),
            _ => AppError::Server { status, message },
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            tracing::error!("Response decode error: {:?}", err);
            return AppError::Parse(format!("Invalid response body: {}", err));
        }
        if let Some(status) = err.status() {
            tracing::error!("HTTP status error: {:?}", err);
            return AppError::from_status(status.as_u16(), err.to_string());
        }
        tracing::error!("Network error: {:?}", err);
        AppError::Network(format!("Request failed: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Parse(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|list| list.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        AppError::Validation(message)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {:?}", err);
        AppError::Storage(format!("I/O error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
