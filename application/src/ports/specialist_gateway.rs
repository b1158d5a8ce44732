//! Specialist gateway port
//!
//! Defines the interface for dispatching work units to domain specialists
//! on the external execution platform. Implementations (adapters) live in
//! the infrastructure layer.

use async_trait::async_trait;
use conclave_domain::{DomainReport, WorkUnit};
use thiserror::Error;

/// Errors that can occur dispatching a single work unit.
///
/// All of these are local to one domain: they are captured as a failed
/// report and never abort sibling units or the coordination.
#[derive(Error, Debug)]
pub enum SpecialistError {
    #[error("Specialist unavailable: {0}")]
    Unavailable(String),

    #[error("Specialist timed out")]
    Timeout,

    #[error("Malformed specialist response: {0}")]
    Malformed(String),

    #[error("Specialist execution failed: {0}")]
    ExecutionFailed(String),
}

/// Gateway to the external execution platform.
///
/// One call analyzes one work unit; the engine owns batching and fan-out.
/// A successful return must carry a report for the unit's own domain.
#[async_trait]
pub trait SpecialistGateway: Send + Sync {
    async fn dispatch(&self, unit: &WorkUnit) -> Result<DomainReport, SpecialistError>;
}
