//! Generate, preview, and confirm flow for a new course.

use crate::api::ApiClient;
use crate::errors::{AppError, AppResult};
use crate::models::{CreateCourseRequest, GeneratedCourseTree};
use crate::notify::Notices;
use crate::scope::ViewScope;
use crate::session::SessionContext;

use super::form::CourseForm;
use super::prompt::build_prompt;
use super::response::GenerationState;

/// Where the flow currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    /// Form visible, nothing generated yet
    Editing,
    /// Generated outline awaiting confirmation
    Previewing(GeneratedCourseTree),
}

/// State of one course creation view.
#[derive(Debug)]
pub struct CourseStudio {
    pub form: CourseForm,
    pub notices: Notices,
    state: PreviewState,
    generation: GenerationState,
}

impl CourseStudio {
    pub fn new(form: CourseForm) -> Self {
        Self {
            form,
            notices: Notices::new(),
            state: PreviewState::Editing,
            generation: GenerationState::default(),
        }
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.generation.loading
    }

    #[cfg(test)]
    pub fn preview(&self) -> Option<&GeneratedCourseTree> {
        match &self.state {
            PreviewState::Previewing(tree) => Some(tree),
            PreviewState::Editing => None,
        }
    }

    /// Validate the form and render the prompt it would send.
    pub fn prompt(&self) -> AppResult<String> {
        let draft = self.form.validate()?;
        Ok(build_prompt(
            &draft.topic,
            &draft.subtopics,
            draft.topic_count,
            &draft.language,
        ))
    }

    /// Submit the form: validate, generate, parse, and move to the preview.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
    ) -> AppResult<&GeneratedCourseTree> {
        if matches!(self.state, PreviewState::Previewing(_)) {
            return Err(AppError::Validation(
                "A course is already generated; edit it first".to_string(),
            ));
        }

        let prompt = match self.prompt() {
            Ok(prompt) => prompt,
            Err(err) => {
                self.notices.failure(&err);
                return Err(err);
            }
        };

        self.generation.begin();
        let text = match scope.run(client.generate_text(&prompt)).await {
            Ok(text) => text,
            Err(AppError::Cancelled) => {
                self.generation.loading = false;
                return Err(AppError::Cancelled);
            }
            Err(err) => {
                self.generation.fail(&err, &mut self.notices);
                return Err(err);
            }
        };

        let tree = self
            .generation
            .handle_response(&text, &mut self.notices)?
            .clone();
        self.state = PreviewState::Previewing(tree);
        match &self.state {
            PreviewState::Previewing(tree) => Ok(tree),
            PreviewState::Editing => unreachable!("state was just set to Previewing"),
        }
    }

    /// Leave the preview and discard the generated outline.
    pub fn edit(&mut self) -> bool {
        if matches!(self.state, PreviewState::Editing) {
            return false;
        }
        self.state = PreviewState::Editing;
        self.generation.take_tree();
        true
    }

    /// Persist the previewed course for the signed-in user, returning its id.
    pub async fn confirm(
        &mut self,
        client: &ApiClient,
        session: &SessionContext,
        scope: &ViewScope,
    ) -> AppResult<String> {
        let PreviewState::Previewing(tree) = &self.state else {
            return Err(AppError::Validation("Nothing to confirm".to_string()));
        };
        let Some(uid) = session.uid() else {
            let err = AppError::Unauthorized("Sign in to save a course".to_string());
            self.notices.failure(&err);
            return Err(err);
        };

        let main_topic = tree
            .main_topic()
            .map(str::to_string)
            .unwrap_or_else(|| self.form.topic.trim().to_lowercase());
        let request = CreateCourseRequest {
            user: uid.to_string(),
            content: serde_json::to_string(tree)?,
            course_type: self.form.course_type,
            main_topic,
            lang: self.form.language.trim().to_string(),
        };

        match scope.run(client.create_course(&request)).await {
            Ok(course_id) => {
                tracing::info!("Course {} created for {}", course_id, request.user);
                self.notices.success("Course created");
                self.state = PreviewState::Editing;
                self.generation.take_tree();
                Ok(course_id)
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(err) => {
                self.notices.failure(&err);
                Err(err)
            }
        }
    }
}
