//! REST API client module.
//!
//! Wraps the course backend's JSON-over-HTTP endpoints using [`reqwest`].
//! Each call is a single request: no retry, no backoff, no explicit timeout.

mod billing;
mod blogs;
mod courses;
mod dashboard;
mod generation;
mod policies;
mod users;

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::normalize_api_url;
use crate::errors::{AppError, AppResult};
use crate::models::Ack;

/// HTTP client for one course backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Error body shape the backend uses on failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    /// Create a new client for the backend at `base_url`.
    pub fn new(base_url: &str) -> AppResult<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, base_url: &str) -> AppResult<Self> {
        Ok(Self {
            http,
            base_url: normalize_api_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET` a path and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        tracing::debug!("GET {}", path);
        let response = self
            .http
            .request(Method::GET, self.url(path))
            .send()
            .await?;
        decode(path, response).await
    }

    /// `POST` a JSON body and decode the JSON response.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {}", path);
        let response = self
            .http
            .request(Method::POST, self.url(path))
            .json(body)
            .send()
            .await?;
        decode(path, response).await
    }

    /// `POST` to a mutating endpoint and require `success: true`.
    pub(crate) async fn post_ack<B>(&self, path: &str, body: &B) -> AppResult<Ack>
    where
        B: Serialize + ?Sized,
    {
        let ack: Ack = self.post_json(path, body).await?;
        check_ack(path, ack)
    }
}

/// Turn `success: false` into a server error.
pub(crate) fn check_ack(path: &str, ack: Ack) -> AppResult<Ack> {
    if ack.success {
        return Ok(ack);
    }
    let message = ack
        .message
        .unwrap_or_else(|| format!("{} reported failure", path));
    tracing::warn!("{} rejected: {}", path, message);
    Err(AppError::Server {
        status: 200,
        message,
    })
}

/// Ensure the response has a success status code, then parse the body.
async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> AppResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| body.clone());
        tracing::warn!("{} failed with status {}: {}", path, status, message);
        return Err(AppError::from_status(status.as_u16(), message));
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!("{} returned an undecodable body: {}", path, e);
        AppError::Parse(format!("Invalid response from {}: {}", path, e))
    })
}
