//! Coordination tracker - bounded history and advisory insights.
//!
//! The tracker is the single writer for coordination records. Its
//! [`CoordinationInsights`] snapshot is advisory-only feedback: the strategy
//! selector may use it to bias batch sizing but never to override the
//! configured limits.

use crate::classify::domain::Domain;
use crate::coordination::batch::CoordinationId;
use crate::coordination::plan::Strategy;
use crate::coordination::record::{CoordinationOutcome, CoordinationRecord, CoordinationStatus};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Default number of records retained in the history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// A (strategy, domain-count) grouping for success statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternKey {
    pub strategy: Strategy,
    pub domain_count: usize,
}

/// Accumulated statistics for one pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternStats {
    pub runs: usize,
    pub successes: usize,
    total_duration_ms: i64,
}

impl PatternStats {
    fn record(&mut self, success: bool, duration_ms: i64) {
        self.runs += 1;
        if success {
            self.successes += 1;
        }
        self.total_duration_ms += duration_ms;
    }

    pub fn success_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.successes as f64 / self.runs as f64
        }
    }

    pub fn avg_duration_ms(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.total_duration_ms as f64 / self.runs as f64
        }
    }
}

/// Read-only snapshot of coordination history statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinationInsights {
    patterns: BTreeMap<PatternKey, PatternStats>,
    total_runs: usize,
}

impl CoordinationInsights {
    pub fn total_runs(&self) -> usize {
        self.total_runs
    }

    pub fn pattern(&self, key: &PatternKey) -> Option<&PatternStats> {
        self.patterns.get(key)
    }

    pub fn patterns(&self) -> impl Iterator<Item = (&PatternKey, &PatternStats)> {
        self.patterns.iter()
    }

    /// The best-performing pattern so far.
    ///
    /// Ranked by success rate, then run count, then lower average duration.
    /// Ties beyond that resolve to the later key in pattern order (`max_by`
    /// keeps the last maximal element), so the answer stays deterministic.
    pub fn best_pattern(&self) -> Option<(PatternKey, PatternStats)> {
        self.patterns
            .iter()
            .max_by(|(_, a), (_, b)| {
                a.success_rate()
                    .partial_cmp(&b.success_rate())
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.runs.cmp(&b.runs))
                    .then(
                        b.avg_duration_ms()
                            .partial_cmp(&a.avg_duration_ms())
                            .unwrap_or(std::cmp::Ordering::Equal),
                    )
            })
            .map(|(k, s)| (*k, *s))
    }

    /// Whether history argues for smaller batches on this pattern: at least
    /// three finished runs with a success rate below one half.
    pub fn suggests_smaller_batches(&self, strategy: Strategy, domain_count: usize) -> bool {
        self.pattern(&PatternKey {
            strategy,
            domain_count,
        })
        .is_some_and(|stats| stats.runs >= 3 && stats.success_rate() < 0.5)
    }
}

/// Single-writer tracker for coordination lifecycle records.
#[derive(Debug, Clone)]
pub struct CoordinationTracker {
    history: VecDeque<CoordinationRecord>,
    capacity: usize,
    next_seq: u64,
}

impl Default for CoordinationTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl CoordinationTracker {
    /// Create a tracker retaining at most `capacity` records.
    ///
    /// A zero capacity is clamped to one so `start` can always record.
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::new(),
            capacity: capacity.max(1),
            next_seq: 1,
        }
    }

    /// Record the start of a coordination run and issue its id.
    ///
    /// Appends a `running` record, evicting the oldest record when the
    /// history is full.
    pub fn start(
        &mut self,
        strategy: Strategy,
        domains: &[Domain],
        token_estimate: u64,
    ) -> CoordinationId {
        let id = CoordinationId::from_sequence(self.next_seq);
        self.next_seq += 1;

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(CoordinationRecord::new(
            id.clone(),
            strategy,
            domains.to_vec(),
            token_estimate,
        ));
        id
    }

    /// Transition a run to its terminal status.
    pub fn complete(
        &mut self,
        id: &CoordinationId,
        outcome: CoordinationOutcome,
    ) -> Result<(), DomainError> {
        let record = self
            .history
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| DomainError::RecordNotFound(id.to_string()))?;
        record.finish(outcome);
        Ok(())
    }

    pub fn history(&self) -> impl Iterator<Item = &CoordinationRecord> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Compute insights from the finished records currently retained.
    ///
    /// A run counts toward a pattern's success rate only when it finished
    /// clean: every unit succeeded and no batch degraded. A run that
    /// completed on one unit out of seven still drags the rate down, so
    /// repeated timeouts eventually shrink the staged batch size.
    pub fn insights(&self) -> CoordinationInsights {
        let mut insights = CoordinationInsights::default();

        for record in &self.history {
            if record.status() == CoordinationStatus::Running {
                continue;
            }
            let key = PatternKey {
                strategy: record.strategy(),
                domain_count: record.agent_count(),
            };
            let success = record.outcome().is_some_and(|o| o.is_clean());
            let duration = record.duration_ms().unwrap_or(0);
            insights.patterns.entry(key).or_default().record(success, duration);
            insights.total_runs += 1;
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SET: &[Domain] = &[Domain::Security, Domain::Testing];

    #[test]
    fn test_start_complete_lifecycle() {
        let mut tracker = CoordinationTracker::default();
        let id = tracker.start(Strategy::Parallel, SET, 3_000);

        assert_eq!(tracker.len(), 1);
        let record = tracker.history().next().unwrap();
        assert_eq!(record.status(), CoordinationStatus::Running);

        tracker
            .complete(&id, CoordinationOutcome::new(2, 0, 0))
            .unwrap();
        let record = tracker.history().next().unwrap();
        assert_eq!(record.status(), CoordinationStatus::Completed);
    }

    #[test]
    fn test_complete_unknown_id() {
        let mut tracker = CoordinationTracker::default();
        let missing = CoordinationId::from_sequence(99);
        assert!(matches!(
            tracker.complete(&missing, CoordinationOutcome::new(1, 0, 0)),
            Err(DomainError::RecordNotFound(_))
        ));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut tracker = CoordinationTracker::new(3);
        for _ in 0..5 {
            let id = tracker.start(Strategy::Direct, &[Domain::Security], 0);
            tracker
                .complete(&id, CoordinationOutcome::new(1, 0, 0))
                .unwrap();
        }
        assert_eq!(tracker.len(), 3);
        // Oldest records were evicted; ids keep climbing
        let first = tracker.history().next().unwrap();
        assert_eq!(first.id().as_str(), "coord-000003");
    }

    #[test]
    fn test_insights_success_rate_per_pattern() {
        let mut tracker = CoordinationTracker::default();

        for i in 0..4 {
            let id = tracker.start(Strategy::Parallel, SET, 0);
            let outcome = if i < 3 {
                CoordinationOutcome::new(2, 0, 0)
            } else {
                CoordinationOutcome::new(0, 2, 0)
            };
            tracker.complete(&id, outcome).unwrap();
        }

        let insights = tracker.insights();
        assert_eq!(insights.total_runs(), 4);

        let key = PatternKey {
            strategy: Strategy::Parallel,
            domain_count: 2,
        };
        let stats = insights.pattern(&key).unwrap();
        assert_eq!(stats.runs, 4);
        assert_eq!(stats.successes, 3);
        assert!((stats.success_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partially_failed_runs_count_against_the_pattern() {
        let set: Vec<Domain> = Domain::all().iter().copied().take(7).collect();

        let mut tracker = CoordinationTracker::default();
        for _ in 0..3 {
            let id = tracker.start(Strategy::Staged, &set, 0);
            // One survivor and two degraded batches: completed, but not clean
            tracker
                .complete(&id, CoordinationOutcome::new(1, 6, 2))
                .unwrap();
        }

        let insights = tracker.insights();
        let stats = insights
            .pattern(&PatternKey {
                strategy: Strategy::Staged,
                domain_count: 7,
            })
            .unwrap();
        assert_eq!(stats.runs, 3);
        assert_eq!(stats.successes, 0);
        assert!(insights.suggests_smaller_batches(Strategy::Staged, 7));
    }

    #[test]
    fn test_insights_skip_running_records() {
        let mut tracker = CoordinationTracker::default();
        tracker.start(Strategy::Direct, &[Domain::Security], 0);
        assert_eq!(tracker.insights().total_runs(), 0);
    }

    #[test]
    fn test_best_pattern_prefers_higher_success_rate() {
        let mut tracker = CoordinationTracker::default();

        let id = tracker.start(Strategy::Parallel, SET, 0);
        tracker
            .complete(&id, CoordinationOutcome::new(2, 0, 0))
            .unwrap();

        let id = tracker.start(Strategy::Direct, &[Domain::Security], 0);
        tracker
            .complete(&id, CoordinationOutcome::new(0, 1, 0))
            .unwrap();

        let (best, _) = tracker.insights().best_pattern().unwrap();
        assert_eq!(best.strategy, Strategy::Parallel);
        assert_eq!(best.domain_count, 2);
    }
}
