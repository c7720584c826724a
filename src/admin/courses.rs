//! Course administration screen.

use super::{acknowledged, Listable, Screen};
use crate::api::ApiClient;
use crate::errors::AppResult;
use crate::models::{CourseRecord, UpdateCourseRequest};
use crate::scope::ViewScope;

impl Listable for CourseRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.main_topic.as_str(),
            self.user.as_str(),
            self.lang.as_str(),
        ]
    }

    fn facet(&self, name: &str) -> Option<String> {
        match name {
            "type" => Some(self.course_type.clone()),
            "status" => {
                let status = if self.approved { "approved" } else { "pending" };
                Some(status.to_string())
            }
            "completed" => Some(self.completed.to_string()),
            _ => None,
        }
    }
}

pub type CoursesScreen = Screen<CourseRecord>;

impl Screen<CourseRecord> {
    pub async fn load(client: &ApiClient, scope: &ViewScope) -> AppResult<Self> {
        Self::fetch(scope, client.list_courses()).await
    }

    pub async fn update(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
        request: UpdateCourseRequest,
    ) -> AppResult<()> {
        acknowledged(
            scope,
            &mut self.notices,
            "Course updated",
            client.update_course(&request),
        )
        .await?;
        self.view.patch(&[request.id.clone()], |course| {
            if let Some(topic) = &request.main_topic {
                course.main_topic = topic.clone();
            }
            if let Some(kind) = &request.course_type {
                course.course_type = kind.clone();
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
            "Course deleted",
            client.delete_course(id),
        )
        .await?;
        self.view.remove(&[id.to_string()]);
        Ok(())
    }

    pub async fn bulk_delete(&mut self, client: &ApiClient, scope: &ViewScope) -> AppResult<usize> {
        let ids = self.require_selection()?;
        acknowledged(
            scope,
            &mut self.notices,
            "Courses deleted",
            client.bulk_delete_courses(&ids),
        )
        .await?;
        Ok(self.view.remove(&ids))
    }

    pub async fn bulk_approve(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
    ) -> AppResult<usize> {
        let ids = self.require_selection()?;
        acknowledged(
            scope,
            &mut self.notices,
            "Courses approved",
            client.bulk_approve_courses(&ids),
        )
        .await?;
        Ok(self.view.patch(&ids, |course| course.approved = true))
    }
}
