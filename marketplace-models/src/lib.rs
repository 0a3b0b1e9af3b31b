//! # Marketplace Models
//!
//! This crate provides the data model behind the CLI's service marketplace
//! views: service brokers, the offerings they sell, the plans of each offering,
//! and the organizations each private plan is visible to.
//!
//! ## Overview
//!
//! The marketplace-models crate handles:
//! - **Brokers**: Registered providers of service offerings
//! - **Offerings**: Named service types sold by a broker
//! - **Plans**: Tiers of an offering, either public or private
//! - **Visibilities**: Grants making a private plan visible to an organization
//! - **Organizations**: Tenants that plans can be made visible to
//! - **Access**: Flattened rows for displaying who can see what
//!
//! ## Architecture
//!
//! ```text
//! ServiceBroker
//!   └─ ServiceOffering (broker_guid)
//!        └─ ServicePlan (service_offering_guid, public)
//!             └─ org_names   (resolved from PlanVisibility → Organization)
//! ```
//!
//! Ownership is strictly tree-shaped. A broker owns its offerings and an
//! offering owns its plans; nothing points back up the tree except the raw
//! owner guids the records arrive with.
//!
//! ## Usage
//!
//! ```rust
//! use marketplace_models::{PlanAccess, ServiceBroker, ServiceOffering, ServicePlan};
//!
//! let plan = ServicePlan::new("plan-guid", "small", "service-guid")
//!     .with_org_names(vec!["org1".to_string()]);
//! let offering = ServiceOffering::new("service-guid", "my-service")
//!     .with_broker_guid("broker-guid")
//!     .with_plans(vec![plan]);
//! let broker = ServiceBroker::new("broker-guid", "my-broker").with_services(vec![offering]);
//!
//! assert_eq!(broker.services[0].plans[0].access(), PlanAccess::Limited);
//! ```

pub mod access;
pub mod broker;
pub mod offering;
pub mod organization;
pub mod plan;
pub mod visibility;

// Re-export main types for convenience
pub use access::{PlanAccess, ServiceAccessRow};
pub use broker::ServiceBroker;
pub use offering::ServiceOffering;
pub use organization::Organization;
pub use plan::ServicePlan;
pub use visibility::PlanVisibility;
