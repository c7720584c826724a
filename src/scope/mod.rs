//! Lifetime binding for async calls issued by a view.
//!
//! A [`ViewScope`] owns a [`CancellationToken`]. Calls run through
//! [`ViewScope::run`] race against it, so a response that arrives after the
//! view is gone resolves to [`AppError::Cancelled`] instead of mutating state.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::errors::{AppError, AppResult};

/// Cancels every call it issued when dropped.
#[derive(Debug)]
pub struct ViewScope {
    name: &'static str,
    token: CancellationToken,
}

impl ViewScope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            token: CancellationToken::new(),
        }
    }

    /// A scope that is cancelled together with this one.
    pub fn child(&self, name: &'static str) -> Self {
        Self {
            name,
            token: self.token.child_token(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Handle that can cancel this scope from another task.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Run `fut` unless the scope is torn down first.
    pub async fn run<T, F>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        if self.token.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::debug!("{}: dropping late response", self.name);
                Err(AppError::Cancelled)
            }
            result = fut => result,
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
