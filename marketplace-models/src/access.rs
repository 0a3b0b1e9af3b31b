//! # Plan Access
//!
//! Display-oriented view of plan visibility. A nested broker tree flattens
//! into one [`ServiceAccessRow`] per plan, which is what a table renderer
//! consumes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who can see a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAccess {
    /// Public plan, visible to every organization.
    All,
    /// Private plan visible to the listed organizations.
    Limited,
    /// Private plan with no organization grants.
    None,
}

impl PlanAccess {
    /// Get the string representation of the access level.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanAccess::All => "all",
            PlanAccess::Limited => "limited",
            PlanAccess::None => "none",
        }
    }

    /// Parse an access level from its string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(PlanAccess::All),
            "limited" => Some(PlanAccess::Limited),
            "none" => Some(PlanAccess::None),
            _ => None,
        }
    }
}

impl fmt::Display for PlanAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One plan of a nested broker view, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccessRow {
    /// Broker name
    pub broker: String,

    /// Offering label
    pub service: String,

    /// Plan name
    pub plan: String,

    /// Access level of the plan
    pub access: PlanAccess,

    /// Organization names, empty unless access is `Limited`
    pub orgs: Vec<String>,
}
