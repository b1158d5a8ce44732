//! Advisory service port
//!
//! Best-effort external lookup consulted by work units before their own
//! analysis. No availability or latency guarantees; the circuit breaker in
//! [`crate::advisory`] is the only caller.

use async_trait::async_trait;
use conclave_domain::Domain;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A lookup request for one domain's work unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryQuery {
    pub domain: Domain,
    pub problem: String,
}

impl AdvisoryQuery {
    pub fn new(domain: Domain, problem: impl Into<String>) -> Self {
        Self {
            domain,
            problem: problem.into(),
        }
    }
}

/// Guidance returned by the advisory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// Where the guidance came from (knowledge base id, document, ...)
    pub source: String,
    pub guidance: String,
}

/// Errors from the advisory service. Always recovered locally: callers
/// proceed without an advisory.
#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Advisory service unavailable: {0}")]
    Unavailable(String),

    #[error("Advisory lookup timed out")]
    Timeout,

    #[error("Malformed advisory response: {0}")]
    Malformed(String),
}

/// Request/response lookup against the external advisory service.
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    /// Fast availability check.
    async fn probe(&self) -> Result<(), AdvisoryError>;

    /// The real lookup.
    async fn lookup(&self, query: &AdvisoryQuery) -> Result<Advisory, AdvisoryError>;
}
