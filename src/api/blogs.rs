//! Blog endpoints.

use super::ApiClient;
use crate::errors::AppResult;
use crate::models::{BlogFlag, BlogPost, CreateBlogRequest, IdRequest, UpdateBlogRequest};

impl ApiClient {
    /// GET /api/getblogs - List all blog posts.
    pub async fn list_blogs(&self) -> AppResult<Vec<BlogPost>> {
        self.get_json("/api/getblogs").await
    }

    /// POST /api/createblog - Create a blog post.
    pub async fn create_blog(&self, request: &CreateBlogRequest) -> AppResult<()> {
        self.post_ack("/api/createblog", request).await?;
        Ok(())
    }

    /// POST /api/updateblogs - Set the popular or featured flag.
    pub async fn update_blog_flag(&self, id: &str, flag: BlogFlag, value: bool) -> AppResult<()> {
        let request = UpdateBlogRequest {
            id: id.to_string(),
            flag,
            value,
        };
        self.post_ack("/api/updateblogs", &request).await?;
        Ok(())
    }

    /// POST /api/deleteblogs - Delete a blog post.
    pub async fn delete_blog(&self, id: &str) -> AppResult<()> {
        let request = IdRequest { id: id.to_string() };
        self.post_ack("/api/deleteblogs", &request).await?;
        Ok(())
    }
}
