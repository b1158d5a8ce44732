//! Progress notification port
//!
//! Defines the interface for reporting progress during coordination.

use conclave_domain::Domain;

/// Callback for progress updates during a coordination run
///
/// Implementations can surface progress however they like (console,
/// dashboard, ...); the engine only emits events.
pub trait CoordinationProgress: Send + Sync {
    /// Called when a batch is dispatched
    fn on_batch_start(&self, batch_index: usize, batch_count: usize, units: usize);

    /// Called when a work unit completes within a batch
    fn on_unit_complete(&self, domain: &Domain, success: bool);

    /// Called when a batch finishes; `degraded` when it hit the deadline
    fn on_batch_complete(&self, batch_index: usize, degraded: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl CoordinationProgress for NoProgress {
    fn on_batch_start(&self, _batch_index: usize, _batch_count: usize, _units: usize) {}
    fn on_unit_complete(&self, _domain: &Domain, _success: bool) {}
    fn on_batch_complete(&self, _batch_index: usize, _degraded: bool) {}
}
