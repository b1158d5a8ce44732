//! Orchestrator parameters - static settings for one engine instance.
//!
//! Consumed at construction time; absence of configuration falls back to
//! the stated defaults. Validation failures here are the only fatal errors
//! in the system.

use conclave_domain::{DomainError, StrategySelector};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-batch deadline.
pub const DEFAULT_COORDINATION_TIMEOUT: Duration = Duration::from_secs(300);

/// Circuit breaker timeouts for the advisory client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryTimeouts {
    /// Fast availability probe; failure opens the breaker immediately.
    pub probe: Duration,
    /// Progressive lookup timeout ladder; the final rung exhausts the
    /// attempt and the caller proceeds without an advisory.
    pub ladder: Vec<Duration>,
}

impl Default for AdvisoryTimeouts {
    fn default() -> Self {
        Self {
            probe: Duration::from_secs(2),
            ladder: vec![
                Duration::from_secs(5),
                Duration::from_secs(10),
                Duration::from_secs(15),
            ],
        }
    }
}

impl AdvisoryTimeouts {
    /// Upper bound on how long one advisory consult can suspend a work unit.
    pub fn worst_case(&self) -> Duration {
        self.probe + self.ladder.iter().sum::<Duration>()
    }
}

/// Static settings for the orchestration engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorParams {
    /// Concurrency ceiling for a single parallel batch.
    pub max_parallel_agents: usize,
    /// Target batch size for staged coordination.
    pub preferred_batch_size: usize,
    /// The execution platform's absolute concurrent-submission limit.
    pub hard_concurrency_limit: usize,
    /// Per-batch deadline; a batch past it is marked degraded.
    pub coordination_timeout: Duration,
    /// Rough token budget per work unit, for plan cost estimates.
    pub unit_token_estimate: u64,
    /// Bound on the coordination history retained for insights.
    pub history_capacity: usize,
    /// Advisory circuit breaker timeouts.
    pub advisory: AdvisoryTimeouts,
}

impl Default for OrchestratorParams {
    fn default() -> Self {
        Self {
            max_parallel_agents: 6,
            preferred_batch_size: 4,
            hard_concurrency_limit: 10,
            coordination_timeout: DEFAULT_COORDINATION_TIMEOUT,
            unit_token_estimate: 1_500,
            history_capacity: 100,
            advisory: AdvisoryTimeouts::default(),
        }
    }
}

impl OrchestratorParams {
    // ==================== Builder Methods ====================

    pub fn with_max_parallel_agents(mut self, max: usize) -> Self {
        self.max_parallel_agents = max;
        self
    }

    pub fn with_preferred_batch_size(mut self, size: usize) -> Self {
        self.preferred_batch_size = size;
        self
    }

    pub fn with_coordination_timeout(mut self, timeout: Duration) -> Self {
        self.coordination_timeout = timeout;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_advisory_timeouts(mut self, advisory: AdvisoryTimeouts) -> Self {
        self.advisory = advisory;
        self
    }

    // ==================== Validation ====================

    /// Validate the parameter combination. Fatal at startup only.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.coordination_timeout.is_zero() {
            return Err(DomainError::InvalidConfiguration(
                "coordination timeout must be positive".to_string(),
            ));
        }
        // Selector limits carry the batching/parallelism rules.
        self.to_selector().validate()
    }

    /// Build the strategy selector these parameters describe.
    pub fn to_selector(&self) -> StrategySelector {
        StrategySelector::new()
            .with_max_parallel(self.max_parallel_agents)
            .with_batch_size(self.preferred_batch_size)
            .with_hard_limit(self.hard_concurrency_limit)
            .with_unit_token_estimate(self.unit_token_estimate)
    }
}
