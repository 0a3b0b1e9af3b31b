//! Per-call lookup indices
//!
//! Each aggregation fetches the grant list, the organization directory and
//! (for organization-scoped views) the plan catalog once, then answers every
//! per-plan question from these maps instead of rescanning the lists.

use marketplace_models::{Organization, PlanVisibility, ServicePlan};
use std::collections::HashMap;

/// Resolves a plan guid to the names of the organizations it is granted to.
#[derive(Debug, Default)]
pub struct VisibilityIndex {
    /// Organization guids per plan guid, in grant order
    grants_by_plan: HashMap<String, Vec<String>>,
    /// Organization names per organization guid
    org_names: HashMap<String, String>,
}

impl VisibilityIndex {
    /// Build the index from the full grant list and organization directory.
    pub fn new(visibilities: &[PlanVisibility], orgs: Vec<Organization>) -> Self {
        let mut grants_by_plan: HashMap<String, Vec<String>> = HashMap::new();
        for visibility in visibilities {
            grants_by_plan
                .entry(visibility.service_plan_guid.clone())
                .or_default()
                .push(visibility.organization_guid.clone());
        }

        let org_names = orgs.into_iter().map(|org| (org.guid, org.name)).collect();

        Self {
            grants_by_plan,
            org_names,
        }
    }

    /// Organization names a plan is granted to, in grant order.
    ///
    /// Grants naming an organization missing from the directory are skipped.
    /// Repeated grants repeat the name.
    pub fn org_names(&self, plan_guid: &str) -> Vec<String> {
        self.grants_by_plan
            .get(plan_guid)
            .map(|org_guids| {
                org_guids
                    .iter()
                    .filter_map(|guid| self.org_names.get(guid).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolve a plan's organization names in place.
    ///
    /// Public plans are visible everywhere and never list organizations.
    pub fn resolve(&self, plan: &mut ServicePlan) {
        plan.org_names = if plan.public {
            Vec::new()
        } else {
            self.org_names(&plan.guid)
        };
    }
}

/// Maps plan guids to the guid of the offering that owns them.
#[derive(Debug, Default)]
pub struct PlanOwnerIndex {
    owners: HashMap<String, String>,
}

impl PlanOwnerIndex {
    /// Build the index from the full plan catalog.
    pub fn new(plans: Vec<ServicePlan>) -> Self {
        let owners = plans
            .into_iter()
            .map(|plan| (plan.guid, plan.service_offering_guid))
            .collect();

        Self { owners }
    }

    /// Guid of the offering owning `plan_guid`.
    pub fn offering_guid(&self, plan_guid: &str) -> Option<&str> {
        self.owners.get(plan_guid).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> VisibilityIndex {
        VisibilityIndex::new(
            &[
                PlanVisibility::new("plan2-guid", "org-guid"),
                PlanVisibility::new("plan-guid", "org-guid"),
                PlanVisibility::new("plan2-guid", "org2-guid"),
                PlanVisibility::new("plan2-guid", "deleted-org-guid"),
                PlanVisibility::new("plan3-guid", "org2-guid"),
                PlanVisibility::new("plan3-guid", "org2-guid"),
            ],
            vec![
                Organization::new("org-guid", "org1"),
                Organization::new("org2-guid", "org2"),
            ],
        )
    }

    #[test]
    fn test_org_names_in_grant_order() {
        assert_eq!(index().org_names("plan2-guid"), vec!["org1", "org2"]);
        assert_eq!(index().org_names("plan-guid"), vec!["org1"]);
    }

    #[test]
    fn test_org_names_keep_repeated_grants() {
        assert_eq!(index().org_names("plan3-guid"), vec!["org2", "org2"]);
    }

    #[test]
    fn test_org_names_for_ungranted_plan() {
        assert!(index().org_names("other-plan-guid").is_empty());
    }

    #[test]
    fn test_resolve_clears_public_plans() {
        let index = index();

        let mut public = ServicePlan::new("plan-guid", "small", "service-guid").public();
        index.resolve(&mut public);
        assert!(public.org_names.is_empty());

        let mut private = ServicePlan::new("plan-guid", "small", "service-guid");
        index.resolve(&mut private);
        assert_eq!(private.org_names, vec!["org1"]);
    }

    #[test]
    fn test_plan_owner_index() {
        let owners = PlanOwnerIndex::new(vec![
            ServicePlan::new("plan-guid", "small", "service-guid"),
            ServicePlan::new("plan2-guid", "large", "service2-guid"),
        ]);

        assert_eq!(owners.offering_guid("plan2-guid"), Some("service2-guid"));
        assert_eq!(owners.offering_guid("missing"), None);
    }
}
