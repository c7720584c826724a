//! Course administration endpoints.

use super::ApiClient;
use crate::errors::AppResult;
use crate::models::{CourseRecord, IdRequest, IdsRequest, UpdateCourseRequest};

impl ApiClient {
    /// GET /api/getcourses - List all courses.
    pub async fn list_courses(&self) -> AppResult<Vec<CourseRecord>> {
        self.get_json("/api/getcourses").await
    }

    /// POST /api/updatecourse - Update a single course.
    pub async fn update_course(&self, request: &UpdateCourseRequest) -> AppResult<()> {
        self.post_ack("/api/updatecourse", request).await?;
        Ok(())
    }

    /// POST /api/deletecourse - Delete a single course.
    pub async fn delete_course(&self, id: &str) -> AppResult<()> {
        let request = IdRequest { id: id.to_string() };
        self.post_ack("/api/deletecourse", &request).await?;
        Ok(())
    }

    /// POST /api/bulkdeletecourses - Delete several courses.
    pub async fn bulk_delete_courses(&self, ids: &[String]) -> AppResult<()> {
        let request = IdsRequest { ids: ids.to_vec() };
        self.post_ack("/api/bulkdeletecourses", &request).await?;
        Ok(())
    }

    /// POST /api/bulkapprovecourses - Approve several courses.
    pub async fn bulk_approve_courses(&self, ids: &[String]) -> AppResult<()> {
        let request = IdsRequest { ids: ids.to_vec() };
        self.post_ack("/api/bulkapprovecourses", &request).await?;
        Ok(())
    }
}
