//! Error types for repository queries
//!
//! A missing record is not an error at this layer; lookups report it as
//! `Ok(None)`. These variants cover the backing store failing to answer.

use thiserror::Error;

/// Repository error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    /// The request never completed (connection refused, timeout, reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered with something that could not be understood
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The store answered but refused to serve the request
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Result type for repository queries.
pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    /// Check if the same query could succeed if issued again.
    ///
    /// Protocol errors are deterministic and are never worth repeating.
    pub fn is_transient(&self) -> bool {
        matches!(self, RepoError::Transport(_) | RepoError::Unavailable(_))
    }

    /// Get error code for reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            RepoError::Transport(_) => "TRANSPORT_ERROR",
            RepoError::Protocol(_) => "PROTOCOL_ERROR",
            RepoError::Unavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(RepoError::Transport("reset".into()).is_transient());
        assert!(RepoError::Unavailable("503".into()).is_transient());
        assert!(!RepoError::Protocol("bad json".into()).is_transient());
    }

    #[test]
    fn test_display() {
        let err = RepoError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "Transport error: connection refused");
        assert_eq!(err.error_code(), "TRANSPORT_ERROR");
    }
}
