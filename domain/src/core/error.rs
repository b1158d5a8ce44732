//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Unknown domain tag: {0}")]
    UnknownDomain(String),

    #[error("Coordination record not found: {0}")]
    RecordNotFound(String),
}

impl DomainError {
    /// Configuration errors are the only fatal ones: they can occur at
    /// construction time only, never mid-coordination.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::InvalidConfiguration(_))
    }
}
