//! Admin back-office screens.
//!
//! Every screen follows one pattern: fetch the full collection once, filter it
//! in memory, send single or bulk mutations, and patch the local snapshot only
//! after the backend acknowledged the change.

mod billing;
mod blogs;
mod courses;
mod dashboard;
mod listing;
mod policies;
mod users;

pub use billing::*;
pub use blogs::*;
pub use courses::*;
pub use dashboard::*;
pub use listing::*;
pub use policies::*;
pub use users::*;

use std::future::Future;

use crate::errors::{AppError, AppResult};
use crate::notify::Notices;
use crate::scope::ViewScope;

/// A list screen bound to one entity type.
#[derive(Debug)]
pub struct Screen<T> {
    pub view: ListView<T>,
    pub notices: Notices,
}

impl<T: Listable> Screen<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            view: ListView::new(items),
            notices: Notices::new(),
        }
    }

    /// Fetch the collection through `scope` and build the screen.
    pub(crate) async fn fetch<F>(scope: &ViewScope, fut: F) -> AppResult<Self>
    where
        F: Future<Output = AppResult<Vec<T>>>,
    {
        let items = scope.run(fut).await?;
        tracing::info!("{}: loaded {} rows", scope.name(), items.len());
        Ok(Self::new(items))
    }

    /// Current selection, or a validation error if nothing is selected.
    pub(crate) fn require_selection(&mut self) -> AppResult<Vec<String>> {
        let ids = self.view.selected_ids();
        if ids.is_empty() {
            let err = AppError::Validation("Select at least one row".to_string());
            self.notices.failure(&err);
            return Err(err);
        }
        Ok(ids)
    }
}

/// Await a mutation and report its outcome as a notice.
///
/// A cancelled call raises no notice; the view that would show it is gone.
pub(crate) async fn acknowledged<T, F>(
    scope: &ViewScope,
    notices: &mut Notices,
    success: &str,
    fut: F,
) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match scope.run(fut).await {
        Ok(value) => {
            notices.success(success);
            Ok(value)
        }
        Err(AppError::Cancelled) => Err(AppError::Cancelled),
        Err(err) => {
            tracing::warn!("{}: mutation failed: {}", scope.name(), err);
            notices.failure(&err);
            Err(err)
        }
    }
}
