//! Priority tier - the fixed ranking used for conflict resolution.
//!
//! The total order is `Security > Stability > Quality > Performance >
//! Enhancement`. A recommendation from a higher tier always wins a conflict
//! against one from a lower tier.

use serde::{Deserialize, Serialize};

/// Fixed priority hierarchy for cross-domain conflict resolution.
///
/// Variants are declared highest-priority first, so the derived `Ord`
/// puts higher tiers earlier: `Security < Stability` in `Ord` terms means
/// `Security` outranks `Stability`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    /// Security findings take precedence over everything else.
    Security,
    /// Stability and infrastructure concerns.
    Stability,
    /// Code quality and testing concerns.
    Quality,
    /// Performance and optimization concerns.
    Performance,
    /// Nice-to-have improvements.
    Enhancement,
}

impl PriorityTier {
    pub fn as_str(&self) -> &str {
        match self {
            PriorityTier::Security => "security",
            PriorityTier::Stability => "stability",
            PriorityTier::Quality => "quality",
            PriorityTier::Performance => "performance",
            PriorityTier::Enhancement => "enhancement",
        }
    }

    /// Numeric rank, 0 = highest priority.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Whether this tier strictly outranks `other`.
    pub fn outranks(&self, other: &PriorityTier) -> bool {
        self < other
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
