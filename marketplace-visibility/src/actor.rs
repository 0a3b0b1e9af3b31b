//! Marketplace visibility aggregation
//!
//! [`ServiceActor`] joins the five marketplace repositories into nested
//! broker → offering → plan views. Every public operation re-queries its
//! repositories from scratch and either returns a complete tree or the first
//! error it hits.

use indexmap::IndexMap;
use marketplace_models::{PlanVisibility, ServiceBroker, ServiceOffering, ServicePlan};
use marketplace_repos::{
    OrganizationRepository, PlanVisibilityRepository, ServiceBrokerRepository,
    ServicePlanRepository, ServiceRepository,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::config::VisibilityConfig;
use crate::error::{EntityKind, UpstreamContext, VisibilityError, VisibilityResult};
use crate::index::{PlanOwnerIndex, VisibilityIndex};

/// Builds nested marketplace views from the marketplace repositories.
///
/// # Examples
///
/// ```
/// use marketplace_models::{Organization, PlanVisibility, ServiceBroker, ServiceOffering, ServicePlan};
/// use marketplace_repos::MemoryMarketplace;
/// use marketplace_visibility::ServiceActor;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let repo = MemoryMarketplace::new()
///     .with_broker(ServiceBroker::new("broker-guid", "my-broker"))
///     .with_offering(ServiceOffering::new("service-guid", "my-service").with_broker_guid("broker-guid"))
///     .with_plan(ServicePlan::new("plan-guid", "small", "service-guid"))
///     .with_visibility(PlanVisibility::new("plan-guid", "org-guid"))
///     .with_org(Organization::new("org-guid", "org1"));
///
/// let actor = ServiceActor::from_backend(Arc::new(repo));
/// let brokers = actor.broker_with_dependencies("my-broker").await.unwrap();
///
/// assert_eq!(brokers[0].services[0].plans[0].org_names, vec!["org1"]);
/// # }
/// ```
pub struct ServiceActor {
    /// Broker directory
    brokers: Arc<dyn ServiceBrokerRepository>,
    /// Offering catalog
    services: Arc<dyn ServiceRepository>,
    /// Plan catalog
    plans: Arc<dyn ServicePlanRepository>,
    /// Visibility grants
    visibilities: Arc<dyn PlanVisibilityRepository>,
    /// Organization directory
    orgs: Arc<dyn OrganizationRepository>,
    /// Aggregation settings
    config: VisibilityConfig,
}

impl std::fmt::Debug for ServiceActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceActor")
            .field("config", &self.config)
            .finish()
    }
}

impl ServiceActor {
    /// Create an actor over five independent repositories.
    pub fn new(
        brokers: Arc<dyn ServiceBrokerRepository>,
        services: Arc<dyn ServiceRepository>,
        plans: Arc<dyn ServicePlanRepository>,
        visibilities: Arc<dyn PlanVisibilityRepository>,
        orgs: Arc<dyn OrganizationRepository>,
    ) -> Self {
        Self {
            brokers,
            services,
            plans,
            visibilities,
            orgs,
            config: VisibilityConfig::default(),
        }
    }

    /// Create an actor over a single backend implementing every repository.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: ServiceBrokerRepository
            + ServiceRepository
            + ServicePlanRepository
            + PlanVisibilityRepository
            + OrganizationRepository
            + 'static,
    {
        Self::new(
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend,
        )
    }

    /// Replace the aggregation settings.
    pub fn with_config(mut self, config: VisibilityConfig) -> Self {
        self.config = config;
        self
    }

    /// Brokers, offerings and plans visible to a single organization.
    ///
    /// An offering appears when the organization holds a grant for one of its
    /// plans. Under it, every plan granted to the organization and every
    /// public plan is listed, in plan catalog order. Brokers and offerings come
    /// out in the order they are first reached while walking the grants.
    ///
    /// Offerings that cannot be placed under a broker (unknown offering, no
    /// owning broker guid, broker guid not in the directory) are skipped.
    #[instrument(skip(self))]
    pub async fn brokers_visible_to_org(&self, org_name: &str) -> VisibilityResult<Vec<ServiceBroker>> {
        debug!(org = %org_name, "Collecting brokers visible to organization");

        let org = self
            .orgs
            .find_org_by_name(org_name)
            .await
            .upstream(|| format!("finding organization '{}'", org_name))?
            .ok_or_else(|| VisibilityError::not_found(EntityKind::Organization, org_name))?;

        let (visibilities, index) = self.load_visibility().await?;

        let granted_plans: Vec<&str> = visibilities
            .iter()
            .filter(|v| v.organization_guid == org.guid)
            .map(|v| v.service_plan_guid.as_str())
            .collect();

        if granted_plans.is_empty() {
            return Ok(Vec::new());
        }

        let owners = PlanOwnerIndex::new(
            self.plans
                .list_plans()
                .await
                .upstream(|| "listing service plans".to_string())?,
        );

        // Offering guids already handled, placed or skipped
        let mut visited: HashSet<String> = HashSet::new();
        let mut broker_cache: HashMap<String, Option<ServiceBroker>> = HashMap::new();
        let mut grouped: IndexMap<String, ServiceBroker> = IndexMap::new();

        for plan_guid in &granted_plans {
            let Some(offering_guid) = owners.offering_guid(plan_guid) else {
                warn!(plan_guid = %plan_guid, "Granted plan not in plan catalog, skipping");
                continue;
            };
            if !visited.insert(offering_guid.to_string()) {
                continue;
            }

            let Some(offering) = self
                .services
                .find_service_by_guid(offering_guid)
                .await
                .upstream(|| format!("finding service offering with guid '{}'", offering_guid))?
            else {
                warn!(service_guid = %offering_guid, "Service offering not found, skipping");
                continue;
            };

            let Some(broker_guid) = offering.owning_broker_guid().map(str::to_string) else {
                warn!(service = %offering.label, "Service offering has no broker guid, skipping");
                continue;
            };

            if !broker_cache.contains_key(&broker_guid) {
                let broker = self
                    .brokers
                    .find_broker_by_guid(&broker_guid)
                    .await
                    .upstream(|| format!("finding service broker with guid '{}'", broker_guid))?;
                broker_cache.insert(broker_guid.clone(), broker);
            }
            let Some(broker) = broker_cache.get(&broker_guid).cloned().flatten() else {
                warn!(
                    service = %offering.label,
                    broker_guid = %broker_guid,
                    "Service broker not found, skipping"
                );
                continue;
            };

            grouped
                .entry(broker_guid)
                .or_insert_with(|| ServiceBroker {
                    services: Vec::new(),
                    ..broker
                })
                .services
                .push(offering);
        }

        let granted: HashSet<&str> = granted_plans.into_iter().collect();
        let mut result = Vec::with_capacity(grouped.len());

        for (_, mut broker) in grouped {
            let offerings = std::mem::take(&mut broker.services);
            for offering in offerings {
                let nested = self
                    .nest_service(offering, &index, |plan| {
                        plan.public || granted.contains(plan.guid.as_str())
                    })
                    .await?;
                broker.services.push(nested);
            }
            result.push(broker);
        }

        debug!(org = %org_name, brokers = result.len(), "Brokers visible to organization collected");
        Ok(result)
    }

    /// The broker selling a single service, with only that service attached.
    #[instrument(skip(self))]
    pub async fn broker_with_single_service(&self, label: &str) -> VisibilityResult<Vec<ServiceBroker>> {
        debug!(service = %label, "Collecting broker for single service");

        let offering = self
            .services
            .find_service_by_label(label)
            .await
            .upstream(|| format!("finding service offering '{}'", label))?
            .ok_or_else(|| VisibilityError::not_found(EntityKind::Service, label))?;

        let referenced_by = || format!("service offering '{}'", offering.label);
        let broker_guid = offering
            .owning_broker_guid()
            .ok_or_else(|| VisibilityError::dependency(EntityKind::ServiceBroker, "", referenced_by()))?
            .to_string();

        let mut broker = self
            .brokers
            .find_broker_by_guid(&broker_guid)
            .await
            .upstream(|| format!("finding service broker with guid '{}'", broker_guid))?
            .ok_or_else(|| {
                VisibilityError::dependency(EntityKind::ServiceBroker, &broker_guid, referenced_by())
            })?;

        let (_, index) = self.load_visibility().await?;
        let nested = self.nest_service(offering, &index, |_| true).await?;
        broker.services = vec![nested];

        Ok(vec![broker])
    }

    /// A single broker with every offering and plan attached.
    #[instrument(skip(self))]
    pub async fn broker_with_dependencies(&self, name: &str) -> VisibilityResult<Vec<ServiceBroker>> {
        debug!(broker = %name, "Collecting broker with dependencies");

        let broker = self
            .brokers
            .find_broker_by_name(name)
            .await
            .upstream(|| format!("finding service broker '{}'", name))?
            .ok_or_else(|| VisibilityError::not_found(EntityKind::ServiceBroker, name))?;

        let (_, index) = self.load_visibility().await?;
        let broker = self.nest_broker(broker, &index).await?;

        Ok(vec![broker])
    }

    /// Every broker with every offering and plan attached, in directory order.
    #[instrument(skip(self))]
    pub async fn all_brokers_with_dependencies(&self) -> VisibilityResult<Vec<ServiceBroker>> {
        debug!("Collecting all brokers with dependencies");

        let brokers = self
            .brokers
            .list_brokers()
            .await
            .upstream(|| "listing service brokers".to_string())?;

        if brokers.is_empty() {
            return Ok(Vec::new());
        }

        let (_, index) = self.load_visibility().await?;

        let mut result = Vec::with_capacity(brokers.len());
        for broker in brokers {
            result.push(self.nest_broker(broker, &index).await?);
        }

        Ok(result)
    }

    // ------------------------------------------------------------------------
    // Nesting helpers
    // ------------------------------------------------------------------------

    /// Fetch the grant list and organization directory once for this call.
    async fn load_visibility(&self) -> VisibilityResult<(Vec<PlanVisibility>, VisibilityIndex)> {
        let list_visibilities = async {
            self.visibilities
                .list_visibilities()
                .await
                .upstream(|| "listing service plan visibilities".to_string())
        };
        let list_orgs = async {
            self.orgs
                .list_orgs()
                .await
                .upstream(|| "listing organizations".to_string())
        };

        let (visibilities, orgs) = if self.config.concurrent_prefetch {
            tokio::try_join!(list_visibilities, list_orgs)?
        } else {
            (list_visibilities.await?, list_orgs.await?)
        };

        let index = VisibilityIndex::new(&visibilities, orgs);
        Ok((visibilities, index))
    }

    /// Attach every offering a broker sells, each fully nested.
    async fn nest_broker(
        &self,
        mut broker: ServiceBroker,
        index: &VisibilityIndex,
    ) -> VisibilityResult<ServiceBroker> {
        let offerings = self
            .services
            .list_services_from_broker(&broker.guid)
            .await
            .upstream(|| format!("listing service offerings of broker '{}'", broker.name))?;

        let mut services = Vec::with_capacity(offerings.len());
        for mut offering in offerings {
            // The broker listing is authoritative for ownership
            offering.broker_guid = Some(broker.guid.clone());
            services.push(self.nest_service(offering, index, |_| true).await?);
        }

        broker.services = services;
        Ok(broker)
    }

    /// Attach the plans of an offering that pass `keep`, in catalog order,
    /// with organization names resolved.
    async fn nest_service<F>(
        &self,
        mut offering: ServiceOffering,
        index: &VisibilityIndex,
        keep: F,
    ) -> VisibilityResult<ServiceOffering>
    where
        F: Fn(&ServicePlan) -> bool,
    {
        let plans = self
            .plans
            .list_plans_for_service(&offering.guid)
            .await
            .upstream(|| format!("listing service plans of '{}'", offering.label))?;

        offering.plans = plans
            .into_iter()
            .filter(|plan| keep(plan))
            .map(|mut plan| {
                plan.service_offering_guid = offering.guid.clone();
                index.resolve(&mut plan);
                plan
            })
            .collect();

        Ok(offering)
    }
}
