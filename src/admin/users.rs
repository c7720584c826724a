//! User administration screen.

use super::{acknowledged, Listable, Screen};
use crate::api::ApiClient;
use crate::errors::AppResult;
use crate::models::{PlanType, UpdateUserRequest, User};
use crate::scope::ViewScope;

impl Listable for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn facet(&self, name: &str) -> Option<String> {
        match name {
            "type" | "plan" => Some(self.plan_type.as_str().to_string()),
            _ => None,
        }
    }
}

pub type UsersScreen = Screen<User>;

impl Screen<User> {
    pub async fn load(client: &ApiClient, scope: &ViewScope) -> AppResult<Self> {
        Self::fetch(scope, client.list_users()).await
    }

    pub async fn update(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
        request: UpdateUserRequest,
    ) -> AppResult<()> {
        acknowledged(
            scope,
            &mut self.notices,
            "User updated",
            client.update_user(&request),
        )
        .await?;
        self.view.patch(&[request.id.clone()], |user| {
            if let Some(name) = &request.name {
                user.name = name.clone();
            }
            if let Some(email) = &request.email {
                user.email = email.clone();
            }
            if let Some(plan) = request.plan_type {
                user.plan_type = plan;
            }
        });
        Ok(())
    }

    pub async fn delete(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
        id: &str,
    ) -> AppResult<()> {
        acknowledged(
            scope,
            &mut self.notices,
            "User deleted",
            client.delete_user(id),
        )
        .await?;
        self.view.remove(&[id.to_string()]);
        Ok(())
    }

    /// Delete every selected user in one request.
    pub async fn bulk_delete(&mut self, client: &ApiClient, scope: &ViewScope) -> AppResult<usize> {
        let ids = self.require_selection()?;
        acknowledged(
            scope,
            &mut self.notices,
            "Users deleted",
            client.bulk_delete_users(&ids),
        )
        .await?;
        Ok(self.view.remove(&ids))
    }

    /// Move every selected user to `plan` in one request.
    pub async fn bulk_change_plan(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
        plan: PlanType,
    ) -> AppResult<usize> {
        let ids = self.require_selection()?;
        acknowledged(
            scope,
            &mut self.notices,
            "Users updated",
            client.bulk_update_users(&ids, plan),
        )
        .await?;
        Ok(self.view.patch(&ids, |user| user.plan_type = plan))
    }
}
