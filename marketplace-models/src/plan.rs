//! Service plan domain model
//!
//! A plan is either public, visible to every organization, or private and
//! visible only to the organizations named by visibility grants. Public plans
//! never enumerate organizations.

use serde::{Deserialize, Serialize};

use crate::access::PlanAccess;

/// A tier of a service offering.
///
/// # Examples
///
/// ```
/// use marketplace_models::{PlanAccess, ServicePlan};
///
/// let plan = ServicePlan::new("plan-guid", "small", "service-guid");
/// assert_eq!(plan.access(), PlanAccess::None);
///
/// let plan = plan.public();
/// assert_eq!(plan.access(), PlanAccess::All);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePlan {
    /// Unique identifier of the plan
    pub guid: String,

    /// Plan name, unique within its offering
    pub name: String,

    /// Guid of the offering this plan belongs to
    pub service_offering_guid: String,

    /// Whether the plan is visible to every organization
    #[serde(default)]
    pub public: bool,

    /// Whether the plan is free of charge
    #[serde(default)]
    pub free: bool,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Names of organizations the plan is visible to, in grant order.
    ///
    /// Always empty for public plans.
    #[serde(default)]
    pub org_names: Vec<String>,
}

impl ServicePlan {
    /// Creates a private plan record with no organizations resolved.
    pub fn new(
        guid: impl Into<String>,
        name: impl Into<String>,
        service_offering_guid: impl Into<String>,
    ) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
            service_offering_guid: service_offering_guid.into(),
            public: false,
            free: false,
            description: None,
            org_names: Vec::new(),
        }
    }

    /// Mark the plan public. Clears any organization names.
    pub fn public(mut self) -> Self {
        self.public = true;
        self.org_names.clear();
        self
    }

    /// Mark the plan free of charge.
    pub fn free(mut self) -> Self {
        self.free = true;
        self
    }

    /// Set the organization names. Ignored for public plans.
    pub fn with_org_names(mut self, org_names: Vec<String>) -> Self {
        if !self.public {
            self.org_names = org_names;
        }
        self
    }

    /// Who can see this plan.
    pub fn access(&self) -> PlanAccess {
        if self.public {
            PlanAccess::All
        } else if self.org_names.is_empty() {
            PlanAccess::None
        } else {
            PlanAccess::Limited
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_plan_drops_org_names() {
        let plan = ServicePlan::new("plan-guid", "small", "service-guid")
            .with_org_names(vec!["org1".to_string()])
            .public();
        assert!(plan.org_names.is_empty());

        let plan = plan.with_org_names(vec!["org2".to_string()]);
        assert!(plan.org_names.is_empty());
        assert_eq!(plan.access(), PlanAccess::All);
    }

    #[test]
    fn test_private_plan_access() {
        let plan = ServicePlan::new("plan-guid", "small", "service-guid");
        assert_eq!(plan.access(), PlanAccess::None);

        let plan = plan.with_org_names(vec!["org1".to_string()]);
        assert_eq!(plan.access(), PlanAccess::Limited);
    }

    #[test]
    fn test_deserialize_defaults_to_private() {
        let plan: ServicePlan = serde_json::from_str(
            r#"{"guid":"plan-guid","name":"small","service_offering_guid":"service-guid"}"#,
        )
        .unwrap();

        assert!(!plan.public);
        assert!(!plan.free);
        assert!(plan.org_names.is_empty());
    }
}
