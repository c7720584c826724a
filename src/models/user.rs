//! User model and the account-related request bodies.

use serde::{Deserialize, Serialize};

/// Subscription plan attached to a user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Free,
    Monthly,
    Yearly,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::Monthly => "monthly",
            PlanType::Yearly => "yearly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" => Some(PlanType::Free),
            "monthly" => Some(PlanType::Monthly),
            "yearly" => Some(PlanType::Yearly),
            _ => None,
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, PlanType::Free)
    }
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(rename = "mName", default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub plan_type: PlanType,
    #[serde(default)]
    pub date: String,
}

/// Request body for updating a single user.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateUserRequest {
    pub id: String,
    #[serde(rename = "mName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<PlanType>,
}

/// Request body for changing the plan of several users at once.
#[derive(Debug, Clone, Serialize)]
pub struct BulkUpdateUsersRequest {
    pub ids: Vec<String>,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
}

/// Request body for signing in.
#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Account returned on sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedInUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(rename = "mName", default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub plan_type: PlanType,
    #[serde(default)]
    pub admin: bool,
}

/// Sign-in response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_data: Option<SignedInUser>,
}
