//! Service offering domain model

use serde::{Deserialize, Serialize};

use crate::plan::ServicePlan;

/// A named service type sold by a broker.
///
/// The owning broker guid is optional: catalogs do return offerings without
/// one, and such offerings can never be placed under a broker.
///
/// # Examples
///
/// ```
/// use marketplace_models::ServiceOffering;
///
/// let orphan = ServiceOffering::new("service-guid", "my-service");
/// assert_eq!(orphan.owning_broker_guid(), None);
///
/// let owned = orphan.with_broker_guid("broker-guid");
/// assert_eq!(owned.owning_broker_guid(), Some("broker-guid"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    /// Unique identifier of the offering
    pub guid: String,

    /// Service label shown in the marketplace
    pub label: String,

    /// Guid of the broker selling this offering
    #[serde(default)]
    pub broker_guid: Option<String>,

    /// Provider name, if the broker reports one
    #[serde(default)]
    pub provider: Option<String>,

    /// Offering version, if the broker reports one
    #[serde(default)]
    pub version: Option<String>,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Plans of this offering, in plan catalog order
    #[serde(default)]
    pub plans: Vec<ServicePlan>,
}

impl ServiceOffering {
    /// Creates an offering record with no broker and no plans.
    pub fn new(guid: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            label: label.into(),
            broker_guid: None,
            provider: None,
            version: None,
            description: None,
            plans: Vec::new(),
        }
    }

    /// Set the owning broker guid.
    pub fn with_broker_guid(mut self, broker_guid: impl Into<String>) -> Self {
        self.broker_guid = Some(broker_guid.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach plans, replacing any already present.
    pub fn with_plans(mut self, plans: Vec<ServicePlan>) -> Self {
        self.plans = plans;
        self
    }

    /// The owning broker guid, treating an empty string as unset.
    pub fn owning_broker_guid(&self) -> Option<&str> {
        self.broker_guid.as_deref().filter(|guid| !guid.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_broker_guid_is_unset() {
        let offering = ServiceOffering::new("service-guid", "my-service").with_broker_guid("");
        assert_eq!(offering.owning_broker_guid(), None);
    }

    #[test]
    fn test_new_offering_has_no_plans() {
        let offering = ServiceOffering::new("service-guid", "my-service");
        assert!(offering.plans.is_empty());
        assert!(offering.broker_guid.is_none());
    }
}
