//! Repository contracts
//!
//! One trait per record source. Every trait is object safe so the aggregator
//! can hold them as `Arc<dyn ...>` and a single backend may implement several.

use async_trait::async_trait;
use marketplace_models::{Organization, PlanVisibility, ServiceBroker, ServiceOffering, ServicePlan};

use crate::error::RepoResult;

/// Directory of registered service brokers.
#[async_trait]
pub trait ServiceBrokerRepository: Send + Sync {
    /// List every broker, in directory order.
    async fn list_brokers(&self) -> RepoResult<Vec<ServiceBroker>>;

    /// Find a broker by its name.
    async fn find_broker_by_name(&self, name: &str) -> RepoResult<Option<ServiceBroker>>;

    /// Find a broker by its guid.
    async fn find_broker_by_guid(&self, guid: &str) -> RepoResult<Option<ServiceBroker>>;
}

/// Catalog of service offerings.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// List the offerings sold by a broker, in catalog order.
    async fn list_services_from_broker(&self, broker_guid: &str) -> RepoResult<Vec<ServiceOffering>>;

    /// Find an offering by its label.
    async fn find_service_by_label(&self, label: &str) -> RepoResult<Option<ServiceOffering>>;

    /// Find an offering by its guid.
    async fn find_service_by_guid(&self, guid: &str) -> RepoResult<Option<ServiceOffering>>;
}

/// Catalog of service plans.
#[async_trait]
pub trait ServicePlanRepository: Send + Sync {
    /// List the plans of an offering, in catalog order.
    async fn list_plans_for_service(&self, service_guid: &str) -> RepoResult<Vec<ServicePlan>>;

    /// List every plan of every offering.
    async fn list_plans(&self) -> RepoResult<Vec<ServicePlan>>;
}

/// Store of plan visibility grants.
#[async_trait]
pub trait PlanVisibilityRepository: Send + Sync {
    /// List every grant, in store order.
    async fn list_visibilities(&self) -> RepoResult<Vec<PlanVisibility>>;
}

/// Directory of organizations.
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// List every organization.
    async fn list_orgs(&self) -> RepoResult<Vec<Organization>>;

    /// Find an organization by its name.
    async fn find_org_by_name(&self, name: &str) -> RepoResult<Option<Organization>>;
}
