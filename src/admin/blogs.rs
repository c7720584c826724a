//! Blog administration screen.
//!
//! Flag toggles and deletions patch the local snapshot like every other
//! screen. Creation refetches, since the backend does not echo the new post.

use super::{acknowledged, Listable, Screen};
use crate::api::ApiClient;
use crate::errors::{AppError, AppResult};
use crate::models::{BlogFlag, BlogPost, CreateBlogRequest};
use crate::scope::ViewScope;

impl Listable for BlogPost {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.excerpt.as_str(),
            self.category.as_str(),
            self.tags.as_str(),
        ]
    }

    fn facet(&self, name: &str) -> Option<String> {
        match name {
            "category" => Some(self.category.clone()),
            "featured" => Some(self.featured.to_string()),
            "popular" => Some(self.popular.to_string()),
            _ => None,
        }
    }
}

pub type BlogsScreen = Screen<BlogPost>;

impl Screen<BlogPost> {
    pub async fn load(client: &ApiClient, scope: &ViewScope) -> AppResult<Self> {
        Self::fetch(scope, client.list_blogs()).await
    }

    pub async fn create(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
        request: CreateBlogRequest,
    ) -> AppResult<()> {
        if request.title.trim().is_empty() || request.content.trim().is_empty() {
            let err = AppError::Validation("Title and content are required".to_string());
            self.notices.failure(&err);
            return Err(err);
        }
        acknowledged(
            scope,
            &mut self.notices,
            "Blog created",
            client.create_blog(&request),
        )
        .await?;
        // The post exists now; a failed refresh only leaves the list stale.
        match scope.run(client.list_blogs()).await {
            Ok(posts) => self.view.replace(posts),
            Err(AppError::Cancelled) => return Err(AppError::Cancelled),
            Err(err) => {
                tracing::warn!("{}: refresh after create failed: {}", scope.name(), err);
                self.notices
                    .info("Blog created, but the list could not be refreshed");
            }
        }
        Ok(())
    }

    /// Flip `flag` on one post.
    pub async fn toggle_flag(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
        id: &str,
        flag: BlogFlag,
    ) -> AppResult<bool> {
        let Some(post) = self.view.get(id) else {
            let err = AppError::Validation(format!("Unknown blog {}", id));
            self.notices.failure(&err);
            return Err(err);
        };
        let value = match flag {
            BlogFlag::Popular => !post.popular,
            BlogFlag::Featured => !post.featured,
        };
        acknowledged(
            scope,
            &mut self.notices,
            "Blog updated",
            client.update_blog_flag(id, flag, value),
        )
        .await?;
        self.view.patch(&[id.to_string()], |post| match flag {
            BlogFlag::Popular => post.popular = value,
            BlogFlag::Featured => post.featured = value,
        });
        Ok(value)
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
            "Blog deleted",
            client.delete_blog(id),
        )
        .await?;
        self.view.remove(&[id.to_string()]);
        Ok(())
    }
}
