//! Error types for marketplace aggregation
//!
//! Three classes of failure reach callers: a named entity that does not
//! exist, a guid reference that does not resolve, and a repository that could
//! not answer. Repository errors are carried unchanged as the `source` with a
//! description of what was being looked up.

use marketplace_repos::RepoError;
use std::fmt;
use thiserror::Error;

/// Kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Organization
    Organization,
    /// Service offering
    Service,
    /// Service broker
    ServiceBroker,
}

impl EntityKind {
    /// Get the display name of the entity kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Organization => "Organization",
            EntityKind::Service => "Service offering",
            EntityKind::ServiceBroker => "Service broker",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation error types.
#[derive(Debug, Error)]
pub enum VisibilityError {
    /// No entity with the given name or label exists
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// Kind of entity looked up.
        kind: EntityKind,
        /// Name or label looked up.
        name: String,
    },

    /// A guid carried by one record does not resolve in another directory
    #[error("{kind} with guid '{guid}' referenced by {referenced_by} not found")]
    DependencyLookupFailure {
        /// Kind of entity the guid should resolve to.
        kind: EntityKind,
        /// The dangling guid, empty when the reference was never set.
        guid: String,
        /// The record holding the reference.
        referenced_by: String,
    },

    /// A repository query failed
    #[error("{context}: {source}")]
    Upstream {
        /// What was being looked up.
        context: String,
        /// The repository error, unchanged.
        #[source]
        source: RepoError,
    },
}

/// Result type for aggregation operations.
pub type VisibilityResult<T> = Result<T, VisibilityError>;

impl VisibilityError {
    /// Create a not-found error.
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        VisibilityError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create a dangling-reference error.
    pub fn dependency(
        kind: EntityKind,
        guid: impl Into<String>,
        referenced_by: impl Into<String>,
    ) -> Self {
        VisibilityError::DependencyLookupFailure {
            kind,
            guid: guid.into(),
            referenced_by: referenced_by.into(),
        }
    }

    /// Check if this error means some entity does not exist.
    ///
    /// Dangling references count: from the caller's point of view the
    /// requested tree cannot be built because something is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            VisibilityError::NotFound { .. } | VisibilityError::DependencyLookupFailure { .. }
        )
    }

    /// The repository error behind an upstream failure.
    pub fn repo_error(&self) -> Option<&RepoError> {
        match self {
            VisibilityError::Upstream { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Get error code for reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            VisibilityError::NotFound { .. } => "NOT_FOUND",
            VisibilityError::DependencyLookupFailure { .. } => "DEPENDENCY_NOT_FOUND",
            VisibilityError::Upstream { .. } => "UPSTREAM_FAILURE",
        }
    }
}

/// Attach lookup context to repository results.
pub(crate) trait UpstreamContext<T> {
    /// Wrap a repository error with a description of the failed lookup.
    fn upstream<F>(self, context: F) -> VisibilityResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> UpstreamContext<T> for Result<T, RepoError> {
    fn upstream<F>(self, context: F) -> VisibilityResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| VisibilityError::Upstream {
            context: context(),
            source,
        })
    }
}
