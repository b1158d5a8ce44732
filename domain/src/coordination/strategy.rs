//! Strategy selector - chooses the coordination strategy for a domain set.
//!
//! The selector never refuses a request: domain sets above the concurrency
//! ceiling are staged into more sequential batches, never rejected.

use crate::classify::domain::Domain;
use crate::coordination::batch::chunk;
use crate::coordination::plan::{CoordinationPlan, Strategy};
use crate::coordination::tracker::CoordinationInsights;
use crate::core::error::DomainError;

/// Default concurrency ceiling for a single parallel batch.
pub const DEFAULT_MAX_PARALLEL: usize = 6;
/// Default batch size for staged coordination, chosen as the balance of
/// parallel speed-up versus coordination overhead.
pub const DEFAULT_BATCH_SIZE: usize = 4;
/// The execution platform's absolute concurrent-submission limit.
pub const DEFAULT_HARD_LIMIT: usize = 10;
/// Rough per-unit token budget used for plan cost estimates.
pub const DEFAULT_UNIT_TOKEN_ESTIMATE: u64 = 1_500;

/// Chooses a [`CoordinationPlan`] for a classified domain set.
#[derive(Debug, Clone)]
pub struct StrategySelector {
    max_parallel: usize,
    batch_size: usize,
    hard_limit: usize,
    unit_token_estimate: u64,
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self {
            max_parallel: DEFAULT_MAX_PARALLEL,
            batch_size: DEFAULT_BATCH_SIZE,
            hard_limit: DEFAULT_HARD_LIMIT,
            unit_token_estimate: DEFAULT_UNIT_TOKEN_ESTIMATE,
        }
    }
}

impl StrategySelector {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Builder Methods ====================

    pub fn with_max_parallel(mut self, max: usize) -> Self {
        self.max_parallel = max;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_hard_limit(mut self, limit: usize) -> Self {
        self.hard_limit = limit;
        self
    }

    pub fn with_unit_token_estimate(mut self, tokens: u64) -> Self {
        self.unit_token_estimate = tokens;
        self
    }

    // ==================== Validation ====================

    /// Validate the selector limits.
    ///
    /// Fatal at construction time only; a validated selector cannot fail
    /// mid-run.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.batch_size == 0 {
            return Err(DomainError::InvalidConfiguration(
                "batch size must be positive".to_string(),
            ));
        }
        if self.max_parallel == 0 {
            return Err(DomainError::InvalidConfiguration(
                "max parallel agents must be positive".to_string(),
            ));
        }
        if self.batch_size > self.hard_limit || self.max_parallel > self.hard_limit {
            return Err(DomainError::InvalidConfiguration(format!(
                "batch size and parallelism must not exceed the platform limit of {}",
                self.hard_limit
            )));
        }
        Ok(())
    }

    // ==================== Selection ====================

    /// Build a coordination plan for the given domain set.
    pub fn select(&self, domains: &[Domain]) -> Result<CoordinationPlan, DomainError> {
        self.select_with_insights(domains, &CoordinationInsights::default())
    }

    /// Build a coordination plan, letting tracker insights bias (never
    /// override) the staged batch size.
    pub fn select_with_insights(
        &self,
        domains: &[Domain],
        insights: &CoordinationInsights,
    ) -> Result<CoordinationPlan, DomainError> {
        self.validate()?;

        // The classifier guarantees a non-empty set; fall back to the
        // generic domain anyway so the plan is always executable.
        let mut ordered: Vec<Domain> = if domains.is_empty() {
            vec![Domain::General]
        } else {
            domains.to_vec()
        };
        ordered.sort();
        ordered.dedup();

        let count = ordered.len();
        let estimated_tokens = count as u64 * self.unit_token_estimate;

        let (strategy, batch_size) = if count == 1 {
            (Strategy::Direct, 1)
        } else if count <= self.max_parallel {
            (Strategy::Parallel, count)
        } else {
            let size = self.staged_batch_size(count, insights);
            (Strategy::Staged, size)
        };

        let batches = chunk(&ordered, batch_size)?;
        Ok(CoordinationPlan::new(strategy, batches, estimated_tokens))
    }

    /// Effective staged batch size after applying tracker feedback.
    ///
    /// Insights shrink the size by one (never below 2) when the matching
    /// (strategy, domain-count) pattern has been failing; they never grow it
    /// past the configured preference.
    fn staged_batch_size(&self, domain_count: usize, insights: &CoordinationInsights) -> usize {
        if self.batch_size > 2 && insights.suggests_smaller_batches(Strategy::Staged, domain_count)
        {
            self.batch_size - 1
        } else {
            self.batch_size
        }
    }
}
