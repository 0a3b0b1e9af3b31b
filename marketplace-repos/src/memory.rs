//! In-memory marketplace backend
//!
//! [`MemoryMarketplace`] implements all five repository traits over plain
//! vectors. It counts every query it answers and can be told to fail a given
//! query, which is how callers exercise their error paths.

use async_trait::async_trait;
use marketplace_models::{Organization, PlanVisibility, ServiceBroker, ServiceOffering, ServicePlan};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{RepoError, RepoResult};
use crate::repository::{
    OrganizationRepository, PlanVisibilityRepository, ServiceBrokerRepository,
    ServicePlanRepository, ServiceRepository,
};

/// Every query a repository can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoOperation {
    ListBrokers,
    FindBrokerByName,
    FindBrokerByGuid,
    ListServicesFromBroker,
    FindServiceByLabel,
    FindServiceByGuid,
    ListPlansForService,
    ListPlans,
    ListVisibilities,
    ListOrgs,
    FindOrgByName,
}

impl RepoOperation {
    /// Get the string representation of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoOperation::ListBrokers => "list_brokers",
            RepoOperation::FindBrokerByName => "find_broker_by_name",
            RepoOperation::FindBrokerByGuid => "find_broker_by_guid",
            RepoOperation::ListServicesFromBroker => "list_services_from_broker",
            RepoOperation::FindServiceByLabel => "find_service_by_label",
            RepoOperation::FindServiceByGuid => "find_service_by_guid",
            RepoOperation::ListPlansForService => "list_plans_for_service",
            RepoOperation::ListPlans => "list_plans",
            RepoOperation::ListVisibilities => "list_visibilities",
            RepoOperation::ListOrgs => "list_orgs",
            RepoOperation::FindOrgByName => "find_org_by_name",
        }
    }
}

impl fmt::Display for RepoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query counters of a [`MemoryMarketplace`].
#[derive(Debug, Clone, Default)]
pub struct RepoStats {
    calls: HashMap<RepoOperation, u64>,
}

impl RepoStats {
    /// Number of times `operation` was queried, failed queries included.
    pub fn calls(&self, operation: RepoOperation) -> u64 {
        self.calls.get(&operation).copied().unwrap_or(0)
    }

    /// Total number of queries answered.
    pub fn total(&self) -> u64 {
        self.calls.values().sum()
    }
}

/// In-memory implementation of every marketplace repository.
///
/// Offerings are listed under a broker independently of the `broker_guid`
/// they carry, so a catalog that lists an offering under a broker without
/// stamping the offering record can be reproduced faithfully.
///
/// # Examples
///
/// ```
/// use marketplace_models::{PlanVisibility, ServicePlan};
/// use marketplace_repos::{MemoryMarketplace, PlanVisibilityRepository, RepoOperation};
///
/// # #[tokio::main]
/// # async fn main() {
/// let repo = MemoryMarketplace::new()
///     .with_plan(ServicePlan::new("plan-guid", "small", "service-guid"))
///     .with_visibility(PlanVisibility::new("plan-guid", "org-guid"));
///
/// assert_eq!(repo.list_visibilities().await.unwrap().len(), 1);
/// assert_eq!(repo.stats().await.calls(RepoOperation::ListVisibilities), 1);
/// # }
/// ```
#[derive(Default)]
pub struct MemoryMarketplace {
    /// Broker directory, in listing order
    brokers: Vec<ServiceBroker>,
    /// Offering records, answered by the lookups
    offerings: Vec<ServiceOffering>,
    /// Offerings listed under each broker guid, in listing order
    broker_listings: HashMap<String, Vec<ServiceOffering>>,
    /// Plan catalog, in listing order
    plans: Vec<ServicePlan>,
    /// Visibility grants, in listing order
    visibilities: Vec<PlanVisibility>,
    /// Organization directory, in listing order
    organizations: Vec<Organization>,
    /// Queries that fail instead of answering
    failures: HashMap<RepoOperation, RepoError>,
    /// Query counters
    stats: Arc<RwLock<RepoStats>>,
}

impl fmt::Debug for MemoryMarketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryMarketplace")
            .field("brokers", &self.brokers.len())
            .field("offerings", &self.offerings.len())
            .field("plans", &self.plans.len())
            .field("visibilities", &self.visibilities.len())
            .field("organizations", &self.organizations.len())
            .finish()
    }
}

impl MemoryMarketplace {
    /// Create an empty marketplace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a broker to the directory.
    pub fn with_broker(mut self, broker: ServiceBroker) -> Self {
        self.brokers.push(broker);
        self
    }

    /// Add an offering to the catalog.
    ///
    /// An offering carrying a broker guid is also listed under that broker.
    pub fn with_offering(mut self, offering: ServiceOffering) -> Self {
        if let Some(broker_guid) = offering.owning_broker_guid() {
            self.broker_listings
                .entry(broker_guid.to_string())
                .or_default()
                .push(offering.clone());
        }
        self.offerings.push(offering);
        self
    }

    /// Add an offering to the catalog without listing it under any broker.
    pub fn with_catalog_offering(mut self, offering: ServiceOffering) -> Self {
        self.offerings.push(offering);
        self
    }

    /// List an offering under `broker_guid` without touching the catalog
    /// record lookups answer with.
    pub fn with_broker_listing(
        mut self,
        broker_guid: impl Into<String>,
        offering: ServiceOffering,
    ) -> Self {
        self.broker_listings
            .entry(broker_guid.into())
            .or_default()
            .push(offering);
        self
    }

    /// Add a plan to the catalog.
    pub fn with_plan(mut self, plan: ServicePlan) -> Self {
        self.plans.push(plan);
        self
    }

    /// Add a visibility grant.
    pub fn with_visibility(mut self, visibility: PlanVisibility) -> Self {
        self.visibilities.push(visibility);
        self
    }

    /// Add an organization to the directory.
    pub fn with_org(mut self, org: Organization) -> Self {
        self.organizations.push(org);
        self
    }

    /// Make every call to `operation` fail with `error`.
    pub fn fail_on(mut self, operation: RepoOperation, error: RepoError) -> Self {
        self.failures.insert(operation, error);
        self
    }

    /// Snapshot of the query counters.
    pub async fn stats(&self) -> RepoStats {
        self.stats.read().await.clone()
    }

    /// Count a query and apply any configured failure.
    async fn record(&self, operation: RepoOperation) -> RepoResult<()> {
        {
            let mut stats = self.stats.write().await;
            *stats.calls.entry(operation).or_insert(0) += 1;
        }

        debug!(operation = %operation, "memory marketplace query");

        match self.failures.get(&operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ServiceBrokerRepository for MemoryMarketplace {
    async fn list_brokers(&self) -> RepoResult<Vec<ServiceBroker>> {
        self.record(RepoOperation::ListBrokers).await?;
        Ok(self.brokers.clone())
    }

    async fn find_broker_by_name(&self, name: &str) -> RepoResult<Option<ServiceBroker>> {
        self.record(RepoOperation::FindBrokerByName).await?;
        Ok(self.brokers.iter().find(|b| b.name == name).cloned())
    }

    async fn find_broker_by_guid(&self, guid: &str) -> RepoResult<Option<ServiceBroker>> {
        self.record(RepoOperation::FindBrokerByGuid).await?;
        Ok(self.brokers.iter().find(|b| b.guid == guid).cloned())
    }
}

#[async_trait]
impl ServiceRepository for MemoryMarketplace {
    async fn list_services_from_broker(&self, broker_guid: &str) -> RepoResult<Vec<ServiceOffering>> {
        self.record(RepoOperation::ListServicesFromBroker).await?;
        Ok(self
            .broker_listings
            .get(broker_guid)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_service_by_label(&self, label: &str) -> RepoResult<Option<ServiceOffering>> {
        self.record(RepoOperation::FindServiceByLabel).await?;
        Ok(self.offerings.iter().find(|s| s.label == label).cloned())
    }

    async fn find_service_by_guid(&self, guid: &str) -> RepoResult<Option<ServiceOffering>> {
        self.record(RepoOperation::FindServiceByGuid).await?;
        Ok(self.offerings.iter().find(|s| s.guid == guid).cloned())
    }
}

#[async_trait]
impl ServicePlanRepository for MemoryMarketplace {
    async fn list_plans_for_service(&self, service_guid: &str) -> RepoResult<Vec<ServicePlan>> {
        self.record(RepoOperation::ListPlansForService).await?;
        Ok(self
            .plans
            .iter()
            .filter(|p| p.service_offering_guid == service_guid)
            .cloned()
            .collect())
    }

    async fn list_plans(&self) -> RepoResult<Vec<ServicePlan>> {
        self.record(RepoOperation::ListPlans).await?;
        Ok(self.plans.clone())
    }
}

#[async_trait]
impl PlanVisibilityRepository for MemoryMarketplace {
    async fn list_visibilities(&self) -> RepoResult<Vec<PlanVisibility>> {
        self.record(RepoOperation::ListVisibilities).await?;
        Ok(self.visibilities.clone())
    }
}

#[async_trait]
impl OrganizationRepository for MemoryMarketplace {
    async fn list_orgs(&self) -> RepoResult<Vec<Organization>> {
        self.record(RepoOperation::ListOrgs).await?;
        Ok(self.organizations.clone())
    }

    async fn find_org_by_name(&self, name: &str) -> RepoResult<Option<Organization>> {
        self.record(RepoOperation::FindOrgByName).await?;
        Ok(self.organizations.iter().find(|o| o.name == name).cloned())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn marketplace() -> MemoryMarketplace {
        MemoryMarketplace::new()
            .with_broker(ServiceBroker::new("broker-guid", "my-broker"))
            .with_broker(ServiceBroker::new("broker2-guid", "my-broker2"))
            .with_offering(ServiceOffering::new("service-guid", "my-service").with_broker_guid("broker2-guid"))
            .with_broker_listing("broker2-guid", ServiceOffering::new("service2-guid", "my-service2"))
            .with_plan(ServicePlan::new("plan-guid", "small", "service-guid"))
            .with_plan(ServicePlan::new("plan2-guid", "large", "service-guid").public())
            .with_plan(ServicePlan::new("plan3-guid", "tiny", "service2-guid"))
            .with_org(Organization::new("org-guid", "org1"))
    }

    #[tokio::test]
    async fn test_broker_lookups() {
        let repo = marketplace();

        let brokers = repo.list_brokers().await.unwrap();
        assert_eq!(brokers.len(), 2);
        assert_eq!(brokers[0].name, "my-broker");

        let found = repo.find_broker_by_name("my-broker2").await.unwrap().unwrap();
        assert_eq!(found.guid, "broker2-guid");

        assert!(repo.find_broker_by_guid("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_broker_listing_keeps_insertion_order() {
        let repo = marketplace();

        let services = repo.list_services_from_broker("broker2-guid").await.unwrap();
        let labels: Vec<_> = services.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["my-service", "my-service2"]);

        // Listed without being added to the catalog
        assert!(repo.find_service_by_label("my-service2").await.unwrap().is_none());

        let repo = repo.with_catalog_offering(ServiceOffering::new("service3-guid", "my-service3").with_broker_guid("broker-guid"));
        assert!(repo.find_service_by_guid("service3-guid").await.unwrap().is_some());
        assert!(repo.list_services_from_broker("broker-guid").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_plans_filtered_by_service() {
        let repo = marketplace();

        let plans = repo.list_plans_for_service("service-guid").await.unwrap();
        let names: Vec<_> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["small", "large"]);

        assert_eq!(repo.list_plans().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failure_injection_and_stats() {
        let repo = marketplace().fail_on(
            RepoOperation::ListOrgs,
            RepoError::Transport("connection refused".into()),
        );

        let err = repo.list_orgs().await.unwrap_err();
        assert_eq!(err, RepoError::Transport("connection refused".into()));

        repo.find_org_by_name("org1").await.unwrap();
        repo.find_org_by_name("org2").await.unwrap();

        let stats = repo.stats().await;
        assert_eq!(stats.calls(RepoOperation::ListOrgs), 1);
        assert_eq!(stats.calls(RepoOperation::FindOrgByName), 2);
        assert_eq!(stats.calls(RepoOperation::ListBrokers), 0);
        assert_eq!(stats.total(), 3);
    }
}
