//! Policy page endpoints.

use super::ApiClient;
use crate::errors::AppResult;
use crate::models::{Policies, PolicyKind, SavePolicyRequest};

impl ApiClient {
    /// GET /api/policies - Fetch every policy page.
    pub async fn get_policies(&self) -> AppResult<Policies> {
        self.get_json("/api/policies").await
    }

    /// POST /api/saveadmin - Save one policy page.
    pub async fn save_policy(&self, kind: PolicyKind, html: &str) -> AppResult<()> {
        let request = SavePolicyRequest {
            kind,
            data: html.to_string(),
        };
        self.post_ack("/api/saveadmin", &request).await?;
        Ok(())
    }
}
