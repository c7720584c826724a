//! Course generation pipeline: form, prompt, response handling, and preview.

mod form;
mod preview;
mod prompt;
mod response;

pub use form::CourseForm;
pub use preview::{CourseStudio, PreviewState};
