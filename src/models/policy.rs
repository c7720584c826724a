//! Static policy pages stored as HTML blobs.

use serde::{Deserialize, Serialize};

/// Which policy page a blob belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Terms,
    Privacy,
    Cancel,
    Refund,
    Billing,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Terms,
        PolicyKind::Privacy,
        PolicyKind::Cancel,
        PolicyKind::Refund,
        PolicyKind::Billing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Terms => "terms",
            PolicyKind::Privacy => "privacy",
            PolicyKind::Cancel => "cancel",
            PolicyKind::Refund => "refund",
            PolicyKind::Billing => "billing",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "terms" => Some(PolicyKind::Terms),
            "privacy" => Some(PolicyKind::Privacy),
            "cancel" | "cancellation" => Some(PolicyKind::Cancel),
            "refund" => Some(PolicyKind::Refund),
            "billing" => Some(PolicyKind::Billing),
            _ => None,
        }
    }
}

/// All policy pages as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Policies {
    #[serde(default)]
    pub terms: String,
    #[serde(default)]
    pub privacy: String,
    #[serde(default)]
    pub cancel: String,
    #[serde(default)]
    pub refund: String,
    #[serde(default)]
    pub billing: String,
}

impl Policies {
    pub fn get(&self, kind: PolicyKind) -> &str {
        match kind {
            PolicyKind::Terms => &self.terms,
            PolicyKind::Privacy => &self.privacy,
            PolicyKind::Cancel => &self.cancel,
            PolicyKind::Refund => &self.refund,
            PolicyKind::Billing => &self.billing,
        }
    }

    pub fn set(&mut self, kind: PolicyKind, html: String) {
        let slot = match kind {
            PolicyKind::Terms => &mut self.terms,
            PolicyKind::Privacy => &mut self.privacy,
            PolicyKind::Cancel => &mut self.cancel,
            PolicyKind::Refund => &mut self.refund,
            PolicyKind::Billing => &mut self.billing,
        };
        *slot = html;
    }
}

/// Request body for saving one policy page.
#[derive(Debug, Clone, Serialize)]
pub struct SavePolicyRequest {
    #[serde(rename = "type")]
    pub kind: PolicyKind,
    pub data: String,
}
