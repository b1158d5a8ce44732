//! Coordination record - tracked lifecycle state of one orchestration run.

use crate::classify::domain::Domain;
use crate::coordination::batch::CoordinationId;
use crate::coordination::plan::Strategy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a coordination run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinationStatus {
    Running,
    Completed,
    Failed,
}

impl CoordinationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CoordinationStatus::Running => "running",
            CoordinationStatus::Completed => "completed",
            CoordinationStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for CoordinationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final tally for one coordination run (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinationOutcome {
    /// Work units that returned a usable report
    pub succeeded: usize,
    /// Work units that failed or timed out
    pub failed: usize,
    /// Batches that hit the per-batch deadline
    pub degraded_batches: usize,
}

impl CoordinationOutcome {
    pub fn new(succeeded: usize, failed: usize, degraded_batches: usize) -> Self {
        Self {
            succeeded,
            failed,
            degraded_batches,
        }
    }

    /// A run counts as successful when at least one unit produced a report.
    pub fn is_success(&self) -> bool {
        self.succeeded > 0
    }

    /// Every unit succeeded and no batch degraded.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.degraded_batches == 0
    }
}

/// Tracked state of one end-to-end orchestration run (Entity)
///
/// Owned by the coordination tracker; mutated only by the
/// `running -> completed | failed` lifecycle transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinationRecord {
    id: CoordinationId,
    strategy: Strategy,
    domains: Vec<Domain>,
    agent_count: usize,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    status: CoordinationStatus,
    token_estimate: u64,
    outcome: Option<CoordinationOutcome>,
}

impl CoordinationRecord {
    pub fn new(
        id: CoordinationId,
        strategy: Strategy,
        domains: Vec<Domain>,
        token_estimate: u64,
    ) -> Self {
        let agent_count = domains.len();
        Self {
            id,
            strategy,
            domains,
            agent_count,
            started_at: Utc::now(),
            ended_at: None,
            status: CoordinationStatus::Running,
            token_estimate,
            outcome: None,
        }
    }

    pub fn id(&self) -> &CoordinationId {
        &self.id
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn agent_count(&self) -> usize {
        self.agent_count
    }

    pub fn status(&self) -> CoordinationStatus {
        self.status
    }

    pub fn token_estimate(&self) -> u64 {
        self.token_estimate
    }

    pub fn outcome(&self) -> Option<&CoordinationOutcome> {
        self.outcome.as_ref()
    }

    /// Wall-clock duration, available once the run has finished.
    pub fn duration_ms(&self) -> Option<i64> {
        self.ended_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }

    /// Transition `running -> completed | failed` based on the outcome.
    pub fn finish(&mut self, outcome: CoordinationOutcome) {
        self.status = if outcome.is_success() {
            CoordinationStatus::Completed
        } else {
            CoordinationStatus::Failed
        };
        self.ended_at = Some(Utc::now());
        self.outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CoordinationRecord {
        CoordinationRecord::new(
            CoordinationId::from_sequence(1),
            Strategy::Parallel,
            vec![Domain::Security, Domain::Testing],
            3_000,
        )
    }

    #[test]
    fn test_new_record_is_running() {
        let record = record();
        assert_eq!(record.status(), CoordinationStatus::Running);
        assert_eq!(record.agent_count(), 2);
        assert!(record.duration_ms().is_none());
        assert!(record.outcome().is_none());
    }

    #[test]
    fn test_finish_success() {
        let mut record = record();
        record.finish(CoordinationOutcome::new(2, 0, 0));
        assert_eq!(record.status(), CoordinationStatus::Completed);
        assert!(record.duration_ms().is_some());
        assert!(record.outcome().unwrap().is_clean());
    }

    #[test]
    fn test_finish_all_failed() {
        let mut record = record();
        record.finish(CoordinationOutcome::new(0, 2, 1));
        assert_eq!(record.status(), CoordinationStatus::Failed);
    }

    #[test]
    fn test_partial_success_still_completes() {
        let mut record = record();
        record.finish(CoordinationOutcome::new(1, 1, 0));
        assert_eq!(record.status(), CoordinationStatus::Completed);
        assert!(!record.outcome().unwrap().is_clean());
    }
}
