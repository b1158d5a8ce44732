//! Work units and batches - the units of concurrent dispatch.

use crate::classify::domain::Domain;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier for one end-to-end coordination run (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordinationId(String);

impl CoordinationId {
    /// Build an identifier from a tracker-issued sequence number.
    pub fn from_sequence(seq: u64) -> Self {
        Self(format!("coord-{:06}", seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CoordinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One specialist invocation for one domain within a batch (Value Object)
///
/// Immutable once dispatched; the dispatching task owns it for the duration
/// of the specialist call and drops it after the result is merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkUnit {
    /// The coordination run this unit belongs to
    pub coordination_id: CoordinationId,
    /// The domain this unit analyzes
    pub domain: Domain,
    /// Reference to the specialist responsible for the domain
    pub specialist_ref: String,
    /// Full prompt context: problem text plus any earlier-batch findings
    /// and advisory notes
    pub prompt_context: String,
}

impl WorkUnit {
    pub fn new(
        coordination_id: CoordinationId,
        domain: Domain,
        prompt_context: impl Into<String>,
    ) -> Self {
        Self {
            coordination_id,
            domain,
            specialist_ref: domain.specialist_ref(),
            prompt_context: prompt_context.into(),
        }
    }

    /// Append additional context (earlier findings, advisory guidance).
    pub fn with_appended_context(mut self, extra: &str) -> Self {
        if !extra.is_empty() {
            self.prompt_context.push_str("\n\n");
            self.prompt_context.push_str(extra);
        }
        self
    }
}

/// An ordered, size-bounded group of domains dispatched and awaited together.
///
/// Work units for a batch are materialized at dispatch time (one per domain),
/// so later batches can fold earlier findings into their prompt context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    domains: Vec<Domain>,
}

impl Batch {
    pub fn new(domains: Vec<Domain>) -> Self {
        Self { domains }
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Partition an ordered domain list into contiguous batches of `size`.
///
/// Pure function: preserves input order, last batch may be smaller.
/// A non-positive size is a programming error surfaced as
/// [`DomainError::InvalidConfiguration`].
pub fn chunk(domains: &[Domain], size: usize) -> Result<Vec<Batch>, DomainError> {
    if size == 0 {
        return Err(DomainError::InvalidConfiguration(
            "batch size must be positive".to_string(),
        ));
    }

    Ok(domains
        .chunks(size)
        .map(|window| Batch::new(window.to_vec()))
        .collect())
}
