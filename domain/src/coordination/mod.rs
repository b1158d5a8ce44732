//! Coordination planning and tracking
//!
//! Strategy selection, batching, and the lifecycle record/tracker for one
//! orchestration run.

pub mod batch;
pub mod plan;
pub mod record;
pub mod strategy;
pub mod tracker;

pub use batch::{Batch, CoordinationId, WorkUnit, chunk};
pub use plan::{CoordinationPlan, Strategy};
pub use record::{CoordinationOutcome, CoordinationRecord, CoordinationStatus};
pub use strategy::StrategySelector;
pub use tracker::{CoordinationInsights, CoordinationTracker, PatternKey, PatternStats};
