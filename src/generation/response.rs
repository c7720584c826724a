//! Handling of raw generation output.

use crate::errors::{AppError, AppResult};
use crate::models::GeneratedCourseTree;
use crate::notify::Notices;

const FENCE_JSON: &str = "```json";
const FENCE: &str = "```";

/// Remove every markdown code fence marker and surrounding whitespace.
pub fn strip_fences(text: &str) -> String {
    text.replace(FENCE_JSON, "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}

/// Strip fences and parse the remainder as a course tree.
pub fn parse_course_tree(text: &str) -> AppResult<GeneratedCourseTree> {
    let cleaned = strip_fences(text);
    serde_json::from_str(&cleaned)
        .map_err(|e| AppError::Parse(format!("Invalid course JSON: {}", e)))
}

/// Loading flag and last successfully parsed tree of one generation view.
#[derive(Debug, Default)]
pub struct GenerationState {
    pub loading: bool,
    tree: Option<GeneratedCourseTree>,
}

impl GenerationState {
    pub fn tree(&self) -> Option<&GeneratedCourseTree> {
        self.tree.as_ref()
    }

    pub fn take_tree(&mut self) -> Option<GeneratedCourseTree> {
        self.tree.take()
    }

    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Settle a request that never produced text.
    pub fn fail(&mut self, err: &AppError, notices: &mut Notices) {
        self.loading = false;
        notices.failure(err);
    }

    /// Parse a response. On failure the previous tree is kept, loading ends,
    /// and exactly one error notice is raised.
    pub fn handle_response(
        &mut self,
        text: &str,
        notices: &mut Notices,
    ) -> AppResult<&GeneratedCourseTree> {
        self.loading = false;
        match parse_course_tree(text) {
            Ok(tree) => {
                tracing::info!(
                    "Parsed course tree with {} topics and {} subtopics",
                    tree.topic_count(),
                    tree.subtopic_count()
                );
                Ok(&*self.tree.insert(tree))
            }
            Err(err) => {
                tracing::error!("Failed to parse generation response: {}", err);
                notices.failure(&err);
                Err(err)
            }
        }
    }
}
