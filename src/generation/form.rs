//! Course request form and its validation.

use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::{CourseDraft, CourseType, TopicCount};
use crate::notify::Notices;

/// Maximum number of subtopics a user may request.
pub const MAX_SUBTOPICS: usize = 5;

/// Editable form state, before validation.
#[derive(Debug, Clone)]
pub struct CourseForm {
    pub topic: String,
    subtopics: Vec<String>,
    pub topic_count: TopicCount,
    pub course_type: CourseType,
    pub language: String,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            subtopics: Vec::new(),
            topic_count: TopicCount::default(),
            course_type: CourseType::default(),
            language: "English".to_string(),
        }
    }
}

impl CourseForm {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    pub fn subtopics(&self) -> &[String] {
        &self.subtopics
    }

    /// Append a subtopic. Blank entries and entries past the limit are
    /// rejected with a notice and leave the list unchanged.
    pub fn add_subtopic(&mut self, subtopic: &str, notices: &mut Notices) -> bool {
        let subtopic = subtopic.trim();
        if subtopic.is_empty() {
            notices.error("Subtopic cannot be empty");
            return false;
        }
        if self.subtopics.len() >= MAX_SUBTOPICS {
            notices.error(format!("You can add at most {} subtopics", MAX_SUBTOPICS));
            return false;
        }
        self.subtopics.push(subtopic.to_string());
        true
    }

    pub fn remove_subtopic(&mut self, index: usize) -> Option<String> {
        (index < self.subtopics.len()).then(|| self.subtopics.remove(index))
    }

    /// Check the form and produce a draft. No network call happens before this passes.
    pub fn validate(&self) -> AppResult<CourseDraft> {
        let draft = CourseDraft {
            topic: self.topic.trim().to_string(),
            subtopics: self.subtopics.clone(),
            topic_count: self.topic_count,
            course_type: self.course_type,
            language: self.language.trim().to_string(),
        };
        draft.validate().map_err(AppError::from)?;
        Ok(draft)
    }
}
