//! Service broker domain model
//!
//! A service broker is the root of every nested marketplace view. Brokers
//! arrive from the broker directory with an empty `services` list; the
//! visibility aggregator fills it in.

use serde::{Deserialize, Serialize};

use crate::access::ServiceAccessRow;
use crate::offering::ServiceOffering;

/// A registered provider of one or more service offerings.
///
/// # Examples
///
/// ```
/// use marketplace_models::ServiceBroker;
///
/// let broker = ServiceBroker::new("broker-guid", "my-broker");
/// assert!(broker.services.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBroker {
    /// Unique identifier of the broker
    pub guid: String,

    /// Broker name, unique within the directory
    pub name: String,

    /// Catalog endpoint of the broker
    #[serde(default)]
    pub url: Option<String>,

    /// Offerings sold by this broker, in offering catalog order
    #[serde(default)]
    pub services: Vec<ServiceOffering>,
}

impl ServiceBroker {
    /// Creates a broker record with no offerings attached.
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
            url: None,
            services: Vec::new(),
        }
    }

    /// Set the catalog endpoint.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach offerings, replacing any already present.
    pub fn with_services(mut self, services: Vec<ServiceOffering>) -> Self {
        self.services = services;
        self
    }

    /// Find an attached offering by its label.
    pub fn service(&self, label: &str) -> Option<&ServiceOffering> {
        self.services.iter().find(|s| s.label == label)
    }

    /// Flatten the broker tree into display rows.
    ///
    /// Rows come out in tree order: offerings in the order they are attached,
    /// plans in the order they are attached to each offering. Offerings without
    /// plans contribute no rows.
    pub fn access_rows(&self) -> Vec<ServiceAccessRow> {
        self.services
            .iter()
            .flat_map(|service| {
                service.plans.iter().map(move |plan| ServiceAccessRow {
                    broker: self.name.clone(),
                    service: service.label.clone(),
                    plan: plan.name.clone(),
                    access: plan.access(),
                    orgs: plan.org_names.clone(),
                })
            })
            .collect()
    }
}
