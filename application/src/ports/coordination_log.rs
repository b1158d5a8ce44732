//! Port for structured coordination logging.
//!
//! Defines the [`CoordinationLogger`] trait for recording coordination
//! lifecycle events (run started, batch dispatched, unit finished, run
//! completed) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the machine-readable
//! coordination history (JSONL).

use conclave_domain::{CoordinationId, CoordinationOutcome, Domain, Strategy};
use serde_json::{Value, json};

/// A structured coordination event for logging.
pub struct CoordinationEvent {
    /// Event type identifier (e.g. "coordination_started").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl CoordinationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn started(id: &CoordinationId, strategy: Strategy, domains: &[Domain]) -> Self {
        Self::new(
            "coordination_started",
            json!({
                "coordination_id": id,
                "strategy": strategy,
                "domains": domains,
            }),
        )
    }

    pub fn batch_dispatched(id: &CoordinationId, index: usize, size: usize) -> Self {
        Self::new(
            "batch_dispatched",
            json!({
                "coordination_id": id,
                "batch_index": index,
                "size": size,
            }),
        )
    }

    pub fn unit_finished(id: &CoordinationId, domain: Domain, success: bool) -> Self {
        Self::new(
            "unit_finished",
            json!({
                "coordination_id": id,
                "domain": domain,
                "success": success,
            }),
        )
    }

    pub fn completed(id: &CoordinationId, outcome: &CoordinationOutcome) -> Self {
        Self::new(
            "coordination_completed",
            json!({
                "coordination_id": id,
                "succeeded": outcome.succeeded,
                "failed": outcome.failed,
                "degraded_batches": outcome.degraded_batches,
            }),
        )
    }
}

/// Port for logging coordination events to a structured log.
///
/// The `log` method is synchronous and non-fallible; failures stay off the
/// critical path and are silently ignored.
pub trait CoordinationLogger: Send + Sync {
    fn log(&self, event: CoordinationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoCoordinationLogger;

impl CoordinationLogger for NoCoordinationLogger {
    fn log(&self, _event: CoordinationEvent) {}
}
