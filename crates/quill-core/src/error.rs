//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
///
/// Every variant carries the human message surfaced to the caller; `kind()`
/// gives the stable machine-checkable discriminator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    NoChange(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Stable identifier for the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::NotFound(_) => "not_found",
            DomainError::Conflict(_) => "conflict",
            DomainError::InvalidTransition(_) => "invalid_transition",
            DomainError::NoChange(_) => "no_change",
            DomainError::Forbidden(_) => "forbidden",
            DomainError::Unauthenticated(_) => "unauthenticated",
            DomainError::Internal(_) => "internal_error",
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::not_found("Resource not found"),
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                DomainError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                DomainError::Internal("Database error".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_violation_becomes_conflict() {
        let err: DomainError = RepoError::Constraint("Blog title already exists".into()).into();
        assert_eq!(err.kind(), "conflict");
        assert_eq!(err.to_string(), "Blog title already exists");
    }

    #[test]
    fn test_query_failure_hides_details() {
        let err: DomainError = RepoError::Query("relation \"blogs\" does not exist".into()).into();
        assert_eq!(err, DomainError::Internal("Database error".to_string()));
    }
}
