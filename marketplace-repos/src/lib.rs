//! # Marketplace Repositories
//!
//! This crate defines the narrow query contracts the visibility aggregator
//! needs from its five record sources, plus an in-memory backend that
//! implements all of them.
//!
//! ## Overview
//!
//! | Repository | Queries |
//! |---|---|
//! | [`ServiceBrokerRepository`] | list brokers, find by name, find by guid |
//! | [`ServiceRepository`] | list offerings of a broker, find by label, find by guid |
//! | [`ServicePlanRepository`] | list plans of an offering, list all plans |
//! | [`PlanVisibilityRepository`] | list all visibility grants |
//! | [`OrganizationRepository`] | list organizations, find by name |
//!
//! Lookups return `Ok(None)` when the record does not exist. `Err` is
//! reserved for transport and protocol failures of the backing store.
//!
//! ## Features
//!
//! The wire-level client, authentication and pagination live behind these
//! traits; this crate only ships [`MemoryMarketplace`], which is suitable for
//! fixtures, embedding and testing.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use marketplace_models::{ServiceBroker, ServiceOffering};
//! use marketplace_repos::{MemoryMarketplace, ServiceRepository};
//!
//! async fn example() {
//!     let repo = MemoryMarketplace::new()
//!         .with_broker(ServiceBroker::new("broker-guid", "my-broker"))
//!         .with_offering(ServiceOffering::new("service-guid", "my-service").with_broker_guid("broker-guid"));
//!
//!     let services = repo.list_services_from_broker("broker-guid").await.unwrap();
//!     assert_eq!(services.len(), 1);
//! }
//! ```

pub mod error;
pub mod memory;
pub mod repository;

// Re-export main types
pub use error::{RepoError, RepoResult};
pub use memory::{MemoryMarketplace, RepoOperation, RepoStats};
pub use repository::{
    OrganizationRepository, PlanVisibilityRepository, ServiceBrokerRepository,
    ServicePlanRepository, ServiceRepository,
};
