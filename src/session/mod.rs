//! Typed session context.
//!
//! Holds the signed-in identity, the plan type, and cached policy text. It is
//! passed explicitly to the operations that need it and persisted as JSON
//! between CLI invocations. Nothing in it is authoritative; the backend is.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::models::{PlanType, PolicyKind, SignedInUser};

/// Per-user session state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    plan: PlanType,
    #[serde(default)]
    admin: bool,
    #[serde(default)]
    policies: BTreeMap<PolicyKind, String>,
}

impl SessionContext {
    /// Load a session from `path`. A missing file yields an empty session.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!("No session file at {:?}", path);
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Persist the session to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn sign_in(&mut self, user: &SignedInUser) {
        self.uid = Some(user.id.clone());
        self.email = Some(user.email.clone());
        self.name = Some(user.name.clone());
        self.plan = user.plan_type;
        self.admin = user.admin;
    }

    /// Forget the identity. Cached policy text survives; it is public.
    pub fn sign_out(&mut self) {
        self.uid = None;
        self.email = None;
        self.name = None;
        self.plan = PlanType::Free;
        self.admin = false;
    }

    pub fn is_signed_in(&self) -> bool {
        self.uid.is_some()
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn plan(&self) -> PlanType {
        self.plan
    }

    pub fn set_plan(&mut self, plan: PlanType) {
        self.plan = plan;
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn cached_policy(&self, kind: PolicyKind) -> Option<&str> {
        self.policies.get(&kind).map(|s| s.as_str())
    }

    pub fn cache_policy(&mut self, kind: PolicyKind, html: impl Into<String>) {
        self.policies.insert(kind, html.into());
    }
}
