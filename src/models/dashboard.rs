//! Aggregate counts shown on the admin dashboard.

use serde::{Deserialize, Serialize};

/// Admin dashboard aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub users: u64,
    pub courses: u64,
    /// Revenue in minor units
    #[serde(default)]
    pub total_revenue: i64,
    #[serde(default)]
    pub paid_users: u64,
    #[serde(default)]
    pub free_users: u64,
    #[serde(default)]
    pub recent_users: u64,
    #[serde(default)]
    pub recent_courses: u64,
}

impl DashboardStats {
    /// Share of paying users, in percent.
    pub fn paid_ratio(&self) -> f64 {
        let total = self.paid_users + self.free_users;
        if total == 0 {
            return 0.0;
        }
        self.paid_users as f64 * 100.0 / total as f64
    }
}

/// Request body for the dashboard identity check.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardRequest {
    pub uid: String,
}
