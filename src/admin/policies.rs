//! Policy page editor.
//!
//! Keeps the last saved copy next to the working draft so unsaved edits are
//! visible, and mirrors saved text into the session cache.

use super::acknowledged;
use crate::api::ApiClient;
use crate::errors::{AppError, AppResult};
use crate::models::{Policies, PolicyKind};
use crate::notify::Notices;
use crate::scope::ViewScope;
use crate::session::SessionContext;

/// Editing state for all policy pages.
#[derive(Debug, Default)]
pub struct PolicyEditor {
    saved: Policies,
    draft: Policies,
    pub notices: Notices,
}

impl PolicyEditor {
    /// Fetch every page and refresh the session cache.
    pub async fn load(
        client: &ApiClient,
        session: &mut SessionContext,
        scope: &ViewScope,
    ) -> AppResult<Self> {
        let policies = scope.run(client.get_policies()).await?;
        for kind in PolicyKind::ALL {
            session.cache_policy(kind, policies.get(kind));
        }
        Ok(Self {
            saved: policies.clone(),
            draft: policies,
            notices: Notices::new(),
        })
    }

    pub fn edit(&mut self, kind: PolicyKind, html: impl Into<String>) {
        self.draft.set(kind, html.into());
    }

    pub fn is_dirty(&self, kind: PolicyKind) -> bool {
        self.draft.get(kind) != self.saved.get(kind)
    }

    /// Save one page. Clean pages are not sent.
    pub async fn save(
        &mut self,
        client: &ApiClient,
        session: &mut SessionContext,
        scope: &ViewScope,
        kind: PolicyKind,
    ) -> AppResult<bool> {
        if !self.is_dirty(kind) {
            self.notices.info(format!("No changes to {}", kind.as_str()));
            return Ok(false);
        }
        let html = self.draft.get(kind).to_string();
        if html.trim().is_empty() {
            let err = AppError::Validation("Policy text cannot be empty".to_string());
            self.notices.failure(&err);
            return Err(err);
        }
        acknowledged(
            scope,
            &mut self.notices,
            "Policy saved",
            client.save_policy(kind, &html),
        )
        .await?;
        session.cache_policy(kind, html.clone());
        self.saved.set(kind, html);
        Ok(true)
    }
}

/// Policy text for public pages: the session cache first, then the backend.
pub async fn read_policy(
    client: &ApiClient,
    session: &mut SessionContext,
    scope: &ViewScope,
    kind: PolicyKind,
) -> AppResult<String> {
    if let Some(html) = session.cached_policy(kind) {
        if !html.is_empty() {
            return Ok(html.to_string());
        }
    }
    let policies = scope.run(client.get_policies()).await?;
    let html = policies.get(kind).to_string();
    session.cache_policy(kind, html.clone());
    Ok(html)
}
