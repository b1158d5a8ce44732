//! Synthesis - merging heterogeneous domain reports into one plan
//!
//! Conflicts between domains are resolved against the fixed priority
//! hierarchy; failed domains are surfaced as incomplete analyses.

pub mod conflict;
pub mod plan;
pub mod synthesizer;
pub mod tier;

pub use plan::{
    IncompleteAnalysis, PhaseName, PlanPhase, PlannedAction, ResolvedConflict, SynthesizedPlan,
};
pub use synthesizer::Synthesizer;
pub use tier::PriorityTier;
