//! Coordination plan - the read-only execution blueprint for one problem.

use crate::coordination::batch::Batch;
use serde::{Deserialize, Serialize};

/// Coordination strategy chosen for a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Single domain: one work unit, synthesis is an identity pass-through
    Direct,
    /// Small domain set: one batch, all units concurrent
    Parallel,
    /// Large domain set: sequential batches, priority domains first
    Staged,
}

impl Strategy {
    pub fn as_str(&self) -> &str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Parallel => "parallel",
            Strategy::Staged => "staged",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Execution blueprint for one coordination run (Value Object)
///
/// Built once by the strategy selector and read-only during execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinationPlan {
    pub strategy: Strategy,
    pub batches: Vec<Batch>,
    /// Rough token budget for the whole run; informational only
    pub estimated_tokens: u64,
}

impl CoordinationPlan {
    pub fn new(strategy: Strategy, batches: Vec<Batch>, estimated_tokens: u64) -> Self {
        Self {
            strategy,
            batches,
            estimated_tokens,
        }
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn domain_count(&self) -> usize {
        self.batches.iter().map(|b| b.len()).sum()
    }
}
