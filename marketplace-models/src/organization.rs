//! Organization model
//!
//! Only the identity of an organization matters to the marketplace: its guid
//! is what grants reference and its name is what views display.

use serde::{Deserialize, Serialize};

/// An organization plans can be made visible to.
///
/// # Examples
///
/// ```
/// use marketplace_models::Organization;
///
/// let org = Organization::new("org-guid", "org1");
/// assert_eq!(org.name, "org1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier of the organization
    pub guid: String,

    /// Organization name, unique within the directory
    pub name: String,
}

impl Organization {
    /// Creates an organization record.
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }
}
