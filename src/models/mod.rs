//! Data models exchanged with the course backend.
//!
//! Field names follow the backend's JSON exactly; serde renames bridge the gap.

mod billing;
mod blog;
mod course;
mod dashboard;
mod policy;
mod user;

pub use billing::*;
pub use blog::*;
pub use course::*;
pub use dashboard::*;
pub use policy::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Request body carrying a single id.
#[derive(Debug, Clone, Serialize)]
pub struct IdRequest {
    pub id: String,
}

/// Request body carrying a set of ids.
#[derive(Debug, Clone, Serialize)]
pub struct IdsRequest {
    pub ids: Vec<String>,
}

/// Acknowledgment returned by mutating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body for the generation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Raw generation output.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    pub generated_text: String,
}
