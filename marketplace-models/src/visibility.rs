//! Plan visibility grants

use serde::{Deserialize, Serialize};

/// A grant making a private plan visible to one organization.
///
/// Grants are raw facts from the visibility store. They are only used to
/// compute each plan's organization names and never appear in a nested view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanVisibility {
    /// Guid of the plan being granted
    pub service_plan_guid: String,

    /// Guid of the organization receiving the grant
    pub organization_guid: String,
}

impl PlanVisibility {
    /// Creates a grant of `service_plan_guid` to `organization_guid`.
    pub fn new(service_plan_guid: impl Into<String>, organization_guid: impl Into<String>) -> Self {
        Self {
            service_plan_guid: service_plan_guid.into(),
            organization_guid: organization_guid.into(),
        }
    }
}
