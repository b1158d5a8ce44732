//! Domain layer for conclave
//!
//! This crate contains the core coordination logic: classification,
//! strategy selection, batching, lifecycle tracking, and synthesis.
//! It has no dependencies on infrastructure or async runtime concerns.
//!
//! # Core Concepts
//!
//! ## Coordination
//!
//! A problem is classified into domain tags, a strategy is selected under
//! the concurrency ceiling (direct / parallel / staged), and batches of
//! work units are dispatched to specialists.
//!
//! ## Synthesis
//!
//! Per-domain reports are merged into one phased plan; conflicting
//! recommendations are resolved against the fixed priority hierarchy
//! (security > stability > quality > performance > enhancement).

pub mod classify;
pub mod coordination;
pub mod core;
pub mod report;
pub mod synthesis;

// Re-export commonly used types
pub use classify::{Domain, DomainClassifier};
pub use coordination::{
    Batch, CoordinationId, CoordinationInsights, CoordinationOutcome, CoordinationPlan,
    CoordinationRecord, CoordinationStatus, CoordinationTracker, PatternKey, PatternStats,
    Strategy, StrategySelector, WorkUnit, chunk,
};
pub use core::{error::DomainError, problem::Problem};
pub use report::{DomainReport, Issue, Recommendation, ResultSet};
pub use synthesis::{
    IncompleteAnalysis, PhaseName, PlanPhase, PlannedAction, PriorityTier, ResolvedConflict,
    SynthesizedPlan, Synthesizer,
};
