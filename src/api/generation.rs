//! Generation, course persistence, and sign-in endpoints.

use super::ApiClient;
use crate::errors::{AppError, AppResult};
use crate::models::{
    CreateCourseRequest, CreateCourseResponse, PromptRequest, PromptResponse, SignInRequest,
    SignInResponse, SignedInUser,
};

impl ApiClient {
    /// POST /api/prompt - Ask the generation service for raw text.
    pub async fn generate_text(&self, prompt: &str) -> AppResult<String> {
        let request = PromptRequest {
            prompt: prompt.to_string(),
        };
        let response: PromptResponse = self.post_json("/api/prompt", &request).await?;
        Ok(response.generated_text)
    }

    /// POST /api/course - Persist a confirmed course, returning its id.
    pub async fn create_course(&self, request: &CreateCourseRequest) -> AppResult<String> {
        let response: CreateCourseResponse = self.post_json("/api/course", request).await?;
        match (response.success, response.course_id) {
            (true, Some(id)) => Ok(id),
            (_, _) => Err(AppError::Server {
                status: 200,
                message: response
                    .message
                    .unwrap_or_else(|| "Course was not created".to_string()),
            }),
        }
    }

    /// POST /api/signin - Exchange credentials for the account record.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignedInUser> {
        let request = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: SignInResponse = self.post_json("/api/signin", &request).await?;
        match (response.success, response.user_data) {
            (true, Some(user)) => Ok(user),
            (_, _) => Err(AppError::Unauthorized(
                response
                    .message
                    .unwrap_or_else(|| "Invalid email or password".to_string()),
            )),
        }
    }
}
