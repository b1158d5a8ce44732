//! Conflict detection and priority-based resolution.
//!
//! Two actions are treated as conflicting when they share a target tag (a
//! case-insensitive artifact identifier such as `"user-db"`) and their action
//! text differs. The higher [`PriorityTier`] wins and the override rationale
//! is recorded. Identical action text on a shared target is a cross-domain
//! duplicate and is deduplicated silently. Actions in the same tier never
//! conflict: the hierarchy cannot order them, so both are kept.

use crate::synthesis::plan::{PlannedAction, ResolvedConflict};
use std::cmp::Ordering;

/// Stable ordering used before resolution so the outcome never depends on
/// input order: tier first, then leverage (descending, compared as integer
/// cross-products), then domain and action text.
fn candidate_order(a: &PlannedAction, b: &PlannedAction) -> Ordering {
    let leverage_a = a.impact as u16 * b.effort.max(1) as u16;
    let leverage_b = b.impact as u16 * a.effort.max(1) as u16;
    a.tier
        .cmp(&b.tier)
        .then(leverage_b.cmp(&leverage_a))
        .then(a.domain.cmp(&b.domain))
        .then(a.action.cmp(&b.action))
}

/// Resolve conflicts among candidate actions.
///
/// Returns the surviving actions (in the stable candidate order) and a
/// record for every dropped action; nothing is dropped silently except
/// exact cross-domain duplicates.
pub fn resolve(mut candidates: Vec<PlannedAction>) -> (Vec<PlannedAction>, Vec<ResolvedConflict>) {
    candidates.sort_by(candidate_order);

    let mut kept: Vec<PlannedAction> = Vec::with_capacity(candidates.len());
    let mut conflicts = Vec::new();

    'next: for candidate in candidates {
        for existing in &kept {
            let Some(target) = existing.shares_target_with(&candidate) else {
                continue;
            };

            if existing.action.eq_ignore_ascii_case(&candidate.action) {
                // Same action proposed by two domains: a duplicate, not a
                // conflict.
                continue 'next;
            }

            if existing.tier.outranks(&candidate.tier) {
                conflicts.push(ResolvedConflict {
                    target: target.clone(),
                    kept_domain: existing.domain,
                    dropped_domain: candidate.domain,
                    kept_action: existing.action.clone(),
                    dropped_action: candidate.action.clone(),
                    rationale: format!(
                        "'{}' overridden by '{}' because {} takes precedence over {} on {}",
                        candidate.action, existing.action, existing.tier, candidate.tier, target
                    ),
                });
                continue 'next;
            }
            // Equal tier: incompatible goals the hierarchy cannot order.
            // Keep both and let the caller arbitrate.
        }
        kept.push(candidate);
    }

    (kept, conflicts)
}
