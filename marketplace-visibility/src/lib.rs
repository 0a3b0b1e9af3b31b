//! # Marketplace Visibility
//!
//! This crate answers the marketplace question "which service brokers,
//! offerings and plans exist, and which organizations can see each plan?"
//! by joining five independent repositories into nested broker views.
//!
//! ## Overview
//!
//! The marketplace-visibility crate handles:
//! - **Nesting**: Broker → Offering → Plan trees with organization names resolved
//! - **Public plans**: Visible everywhere, never enumerate organizations
//! - **Private plans**: Visible to the organizations named by grants, in grant order
//! - **Entry points**: Four views anchored on an organization, a service, a broker, or everything
//!
//! ## Entry Points
//!
//! | Operation | Anchor | Result |
//! |---|---|---|
//! | [`ServiceActor::brokers_visible_to_org`] | organization name | brokers with only the offerings/plans that org can see |
//! | [`ServiceActor::broker_with_single_service`] | service label | the owning broker with just that service |
//! | [`ServiceActor::broker_with_dependencies`] | broker name | that broker with every offering and plan |
//! | [`ServiceActor::all_brokers_with_dependencies`] | none | every broker, in directory order |
//!
//! ## Ordering
//!
//! - Offerings within a broker follow the offering catalog listing
//! - Plans within an offering follow the plan catalog listing
//! - Organization names within a plan follow the grant listing, repeats included
//!
//! ## Usage
//!
//! ```rust,no_run
//! use marketplace_repos::MemoryMarketplace;
//! use marketplace_visibility::{ServiceActor, VisibilityConfig};
//! use std::sync::Arc;
//!
//! async fn example(repo: MemoryMarketplace) {
//!     let actor = ServiceActor::from_backend(Arc::new(repo))
//!         .with_config(VisibilityConfig::from_env());
//!
//!     for broker in actor.all_brokers_with_dependencies().await.unwrap() {
//!         for row in broker.access_rows() {
//!             println!("{} {} {} {}", row.broker, row.service, row.plan, row.access);
//!         }
//!     }
//! }
//! ```
//!
//! ## Errors
//!
//! A missing organization, service label or broker name yields
//! [`VisibilityError::NotFound`]; a guid that does not resolve where it must
//! yields [`VisibilityError::DependencyLookupFailure`]; any repository failure
//! aborts the operation as [`VisibilityError::Upstream`]. No partial results
//! are returned.

pub mod actor;
pub mod config;
pub mod error;
pub mod index;

// Re-export main types
pub use actor::ServiceActor;
pub use config::VisibilityConfig;
pub use error::{EntityKind, VisibilityError, VisibilityResult};
pub use index::{PlanOwnerIndex, VisibilityIndex};
