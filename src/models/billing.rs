//! Billing records: payments, refunds, and subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "completed",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// A payment captured by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    #[serde(default)]
    pub email: String,
    /// Amount in minor units (cents)
    pub amount: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub method: String,
    pub status: PaymentStatus,
    pub date: DateTime<Utc>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Review state of a refund request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RefundStatus {
    Pending,
    Approved,
    Rejected,
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::Pending => "pending",
            RefundStatus::Approved => "approved",
            RefundStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RefundStatus::Pending),
            "approved" | "approve" => Some(RefundStatus::Approved),
            "rejected" | "reject" => Some(RefundStatus::Rejected),
            _ => None,
        }
    }
}

/// A refund request against a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    #[serde(rename = "_id")]
    pub id: String,
    pub payment_id: String,
    pub user: String,
    #[serde(default)]
    pub email: String,
    pub amount: i64,
    #[serde(default)]
    pub reason: String,
    pub status: RefundStatus,
    pub date: DateTime<Utc>,
}

/// Request body for deciding a single refund.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessRefundRequest {
    pub id: String,
    pub status: RefundStatus,
}

/// Request body for deciding several refunds at once.
#[derive(Debug, Clone, Serialize)]
pub struct BulkProcessRefundsRequest {
    pub ids: Vec<String>,
    pub status: RefundStatus,
}

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Expired => "expired",
        }
    }
}

/// A recurring plan subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    #[serde(default)]
    pub email: String,
    pub plan: String,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Bulk operation on subscriptions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionAction {
    Cancel,
}

/// Request body for bulk subscription operations.
#[derive(Debug, Clone, Serialize)]
pub struct BulkSubscriptionRequest {
    pub ids: Vec<String>,
    pub action: SubscriptionAction,
}

/// Response to a renewal, carrying the new end date.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewSubscriptionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}
