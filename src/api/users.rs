//! User administration endpoints.

use super::ApiClient;
use crate::errors::AppResult;
use crate::models::{
    BulkUpdateUsersRequest, IdRequest, IdsRequest, PlanType, UpdateUserRequest, User,
};

impl ApiClient {
    /// GET /api/getusers - List all users.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.get_json("/api/getusers").await
    }

    /// POST /api/updateuser - Update a single user.
    pub async fn update_user(&self, request: &UpdateUserRequest) -> AppResult<()> {
        self.post_ack("/api/updateuser", request).await?;
        Ok(())
    }

    /// POST /api/deleteuser - Delete a single user.
    pub async fn delete_user(&self, id: &str) -> AppResult<()> {
        let request = IdRequest { id: id.to_string() };
        self.post_ack("/api/deleteuser", &request).await?;
        Ok(())
    }

    /// POST /api/bulkdeleteusers - Delete several users.
    pub async fn bulk_delete_users(&self, ids: &[String]) -> AppResult<()> {
        let request = IdsRequest { ids: ids.to_vec() };
        self.post_ack("/api/bulkdeleteusers", &request).await?;
        Ok(())
    }

    /// POST /api/bulkupdateusers - Change the plan of several users.
    pub async fn bulk_update_users(&self, ids: &[String], plan_type: PlanType) -> AppResult<()> {
        let request = BulkUpdateUsersRequest {
            ids: ids.to_vec(),
            plan_type,
        };
        self.post_ack("/api/bulkupdateusers", &request).await?;
        Ok(())
    }
}
