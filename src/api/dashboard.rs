//! Dashboard endpoint.

use super::ApiClient;
use crate::errors::AppResult;
use crate::models::{DashboardRequest, DashboardStats};

impl ApiClient {
    /// POST /api/dashboard - Check admin identity and fetch aggregates.
    pub async fn dashboard(&self, uid: &str) -> AppResult<DashboardStats> {
        let request = DashboardRequest {
            uid: uid.to_string(),
        };
        self.post_json("/api/dashboard", &request).await
    }
}
