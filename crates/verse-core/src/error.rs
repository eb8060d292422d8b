//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
///
/// A missing post is not an error: lookups return `Option` and deletes
/// return `bool`.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unauthorized: only the site admin may {0}")]
    Unauthorized(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage failure: {0}")]
    Persistence(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("I/O failed: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for RepoError {
    fn from(err: std::io::Error) -> Self {
        RepoError::Io(err.to_string())
    }
}
