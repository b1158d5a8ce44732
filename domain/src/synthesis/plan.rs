//! Synthesized plan - the final artifact returned to the caller.

use crate::classify::domain::Domain;
use crate::report::domain_report::Recommendation;
use crate::synthesis::tier::PriorityTier;
use serde::{Deserialize, Serialize};

/// The three fixed implementation phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    /// Immediate work: security and stability
    Critical,
    /// Short-term work: quality and performance
    Core,
    /// Long-term improvements
    Enhancement,
}

impl PhaseName {
    pub fn as_str(&self) -> &str {
        match self {
            PhaseName::Critical => "critical",
            PhaseName::Core => "core",
            PhaseName::Enhancement => "enhancement",
        }
    }

    pub fn all() -> &'static [PhaseName] {
        &[PhaseName::Critical, PhaseName::Core, PhaseName::Enhancement]
    }

    /// Which phase a priority tier's actions belong to.
    pub fn for_tier(tier: PriorityTier) -> PhaseName {
        match tier {
            PriorityTier::Security | PriorityTier::Stability => PhaseName::Critical,
            PriorityTier::Quality | PriorityTier::Performance => PhaseName::Core,
            PriorityTier::Enhancement => PhaseName::Enhancement,
        }
    }
}

impl std::fmt::Display for PhaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One action in the final plan, attributed to its source domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedAction {
    pub domain: Domain,
    pub action: String,
    pub tier: PriorityTier,
    pub impact: u8,
    pub effort: u8,
    #[serde(default)]
    pub targets: Vec<String>,
}

impl PlannedAction {
    pub fn from_recommendation(domain: Domain, rec: &Recommendation) -> Self {
        Self {
            domain,
            action: rec.action.clone(),
            tier: rec.tier,
            impact: rec.impact,
            effort: rec.effort,
            targets: rec.targets.clone(),
        }
    }

    pub fn leverage(&self) -> f64 {
        self.impact as f64 / self.effort.max(1) as f64
    }

    /// Case-insensitive shared-target check; the conflict detection key.
    pub fn shares_target_with(&self, other: &PlannedAction) -> Option<String> {
        for a in &self.targets {
            let a_norm = a.to_lowercase();
            if other
                .targets
                .iter()
                .any(|b| b.to_lowercase() == a_norm)
            {
                return Some(a_norm);
            }
        }
        None
    }
}

/// Record of one cross-domain conflict and how it was resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConflict {
    /// Shared artifact tag both actions targeted
    pub target: String,
    pub kept_domain: Domain,
    pub dropped_domain: Domain,
    pub kept_action: String,
    pub dropped_action: String,
    pub rationale: String,
}

/// A domain whose analysis did not complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteAnalysis {
    pub domain: Domain,
    pub reason: String,
}

/// One phase of the synthesized plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPhase {
    pub name: PhaseName,
    pub actions: Vec<PlannedAction>,
}

/// Final merged, conflict-resolved output of one coordination run
///
/// Every requested domain is accounted for: either its recommendations
/// appear in a phase, or the domain is listed under `incomplete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedPlan {
    /// Always exactly three phases: critical, core, enhancement
    pub phases: Vec<PlanPhase>,
    pub resolved_conflicts: Vec<ResolvedConflict>,
    /// Union of the completed reports' validation checks
    pub success_criteria: Vec<String>,
    /// Domains whose analysis failed, surfaced rather than omitted
    pub incomplete: Vec<IncompleteAnalysis>,
    /// Highest-leverage issues across all domains, for the plan header
    pub key_findings: Vec<String>,
}

impl SynthesizedPlan {
    pub fn phase(&self, name: PhaseName) -> Option<&PlanPhase> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// All surviving actions in plan order (critical first).
    pub fn all_actions(&self) -> impl Iterator<Item = &PlannedAction> {
        self.phases.iter().flat_map(|p| p.actions.iter())
    }

    /// Whether every requested domain produced a usable analysis.
    pub fn is_fully_analyzed(&self) -> bool {
        self.incomplete.is_empty()
    }
}
