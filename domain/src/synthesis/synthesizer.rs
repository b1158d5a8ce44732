//! Synthesizer - merges per-domain reports into one phased plan.
//!
//! Pure and deterministic: result sets are keyed by domain, every sort is
//! stable with explicit tie-breaks, and there is no randomness, so the same
//! inputs always produce an identical [`SynthesizedPlan`].

use crate::report::result_set::ResultSet;
use crate::synthesis::conflict;
use crate::synthesis::plan::{
    IncompleteAnalysis, PhaseName, PlanPhase, PlannedAction, SynthesizedPlan,
};

const DEFAULT_MAX_KEY_FINDINGS: usize = 10;

/// Merges result sets across batches into the final plan.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    max_key_findings: usize,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self {
            max_key_findings: DEFAULT_MAX_KEY_FINDINGS,
        }
    }
}

impl Synthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_key_findings(mut self, max: usize) -> Self {
        self.max_key_findings = max;
        self
    }

    /// Merge one or more result sets (one per batch) into a phased,
    /// conflict-resolved plan.
    ///
    /// A single-domain run degenerates to an identity pass-through: the one
    /// report's recommendations become the plan with nothing to resolve.
    pub fn synthesize(&self, sets: &[ResultSet]) -> SynthesizedPlan {
        let mut merged = ResultSet::new();
        for set in sets {
            merged.merge(set.clone());
        }

        // Failed domains are surfaced, never dropped.
        let incomplete: Vec<IncompleteAnalysis> = merged
            .failed()
            .map(|report| IncompleteAnalysis {
                domain: report.domain,
                reason: report
                    .error
                    .clone()
                    .unwrap_or_else(|| "analysis incomplete".to_string()),
            })
            .collect();

        let key_findings = self.key_findings(&merged);

        let candidates: Vec<PlannedAction> = merged
            .completed()
            .flat_map(|report| {
                report
                    .recommendations
                    .iter()
                    .map(|rec| PlannedAction::from_recommendation(report.domain, rec))
            })
            .collect();

        let (survivors, resolved_conflicts) = conflict::resolve(candidates);

        let phases = PhaseName::all()
            .iter()
            .map(|&name| PlanPhase {
                name,
                actions: survivors
                    .iter()
                    .filter(|a| PhaseName::for_tier(a.tier) == name)
                    .cloned()
                    .collect(),
            })
            .collect();

        // Union of validation checks, first occurrence wins, domain order.
        let mut success_criteria: Vec<String> = Vec::new();
        for report in merged.completed() {
            for check in &report.validation_checks {
                if !success_criteria.contains(check) {
                    success_criteria.push(check.clone());
                }
            }
        }

        SynthesizedPlan {
            phases,
            resolved_conflicts,
            success_criteria,
            incomplete,
            key_findings,
        }
    }

    fn key_findings(&self, merged: &ResultSet) -> Vec<String> {
        let mut issues: Vec<_> = merged
            .completed()
            .flat_map(|report| report.issues.iter().map(move |i| (report.domain, i)))
            .collect();

        issues.sort_by(|(da, a), (db, b)| {
            let leverage_a = a.impact as u16 * b.effort.max(1) as u16;
            let leverage_b = b.impact as u16 * a.effort.max(1) as u16;
            a.tier
                .cmp(&b.tier)
                .then(leverage_b.cmp(&leverage_a))
                .then(da.cmp(db))
                .then(a.description.cmp(&b.description))
        });

        issues
            .into_iter()
            .take(self.max_key_findings)
            .map(|(domain, issue)| format!("[{}] {}: {}", issue.tier, domain, issue.description))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::domain::Domain;
    use crate::report::domain_report::{DomainReport, Issue, Recommendation};
    use crate::synthesis::tier::PriorityTier;

    fn security_report() -> DomainReport {
        DomainReport::completed(Domain::Security, "write path is exposed")
            .with_issues(vec![
                Issue::new("anonymous writes allowed", PriorityTier::Security)
                    .with_impact(9)
                    .with_effort(2),
            ])
            .with_recommendations(vec![
                Recommendation::new("deny write access", PriorityTier::Security)
                    .with_target("user-db")
                    .with_impact(9),
            ])
            .with_validation_checks(vec!["pen test passes".to_string()])
    }

    fn performance_report() -> DomainReport {
        DomainReport::completed(Domain::Performance, "db writes dominate latency")
            .with_recommendations(vec![
                Recommendation::new("enable write caching", PriorityTier::Performance)
                    .with_target("user-db")
                    .with_impact(7),
            ])
            .with_validation_checks(vec![
                "p99 latency under 200ms".to_string(),
                "pen test passes".to_string(),
            ])
    }

    fn testing_report() -> DomainReport {
        DomainReport::completed(Domain::Testing, "suite is slow and flaky")
            .with_recommendations(vec![
                Recommendation::new("parallelize the suite", PriorityTier::Quality)
                    .with_target("ci-pipeline")
                    .with_impact(6)
                    .with_effort(3),
            ])
            .with_validation_checks(vec!["suite under 5 minutes".to_string()])
    }

    fn set_of(reports: Vec<DomainReport>) -> ResultSet {
        reports.into_iter().collect()
    }

    #[test]
    fn test_conflict_resolution_keeps_security_and_records_rationale() {
        let plan = Synthesizer::new()
            .synthesize(&[set_of(vec![security_report(), performance_report()])]);

        let actions: Vec<&str> = plan.all_actions().map(|a| a.action.as_str()).collect();
        assert!(actions.contains(&"deny write access"));
        assert!(!actions.contains(&"enable write caching"));

        assert_eq!(plan.resolved_conflicts.len(), 1);
        assert!(
            plan.resolved_conflicts[0]
                .rationale
                .contains("security takes precedence over performance")
        );
    }

    #[test]
    fn test_synthesis_is_idempotent() {
        let sets = [set_of(vec![
            security_report(),
            performance_report(),
            testing_report(),
        ])];

        let synthesizer = Synthesizer::new();
        let first = synthesizer.synthesize(&sets);
        let second = synthesizer.synthesize(&sets);
        assert_eq!(first, second);
    }

    #[test]
    fn test_security_actions_precede_testing_actions() {
        let plan =
            Synthesizer::new().synthesize(&[set_of(vec![testing_report(), security_report()])]);

        let order: Vec<Domain> = plan.all_actions().map(|a| a.domain).collect();
        let security_pos = order.iter().position(|d| *d == Domain::Security).unwrap();
        let testing_pos = order.iter().position(|d| *d == Domain::Testing).unwrap();
        assert!(security_pos < testing_pos);

        // And they land in the expected phases
        assert_eq!(
            plan.phase(PhaseName::Critical).unwrap().actions[0].domain,
            Domain::Security
        );
        assert_eq!(
            plan.phase(PhaseName::Core).unwrap().actions[0].domain,
            Domain::Testing
        );
    }

    #[test]
    fn test_failed_domain_is_surfaced_and_siblings_keep_results() {
        let mut set = set_of(vec![security_report()]);
        set.insert(DomainReport::failed(Domain::Testing, "specialist timed out"));

        let plan = Synthesizer::new().synthesize(&[set]);

        assert!(!plan.is_fully_analyzed());
        assert_eq!(plan.incomplete.len(), 1);
        assert_eq!(plan.incomplete[0].domain, Domain::Testing);
        assert_eq!(plan.incomplete[0].reason, "specialist timed out");

        // Sibling results are intact
        assert_eq!(plan.all_actions().count(), 1);
        assert_eq!(plan.success_criteria, vec!["pen test passes".to_string()]);
    }

    #[test]
    fn test_single_domain_identity_pass_through() {
        let plan = Synthesizer::new().synthesize(&[set_of(vec![security_report()])]);

        assert!(plan.resolved_conflicts.is_empty());
        assert_eq!(plan.all_actions().count(), 1);
        assert_eq!(plan.all_actions().next().unwrap().action, "deny write access");
    }

    #[test]
    fn test_success_criteria_union_dedups() {
        let plan = Synthesizer::new()
            .synthesize(&[set_of(vec![security_report(), performance_report()])]);

        assert_eq!(
            plan.success_criteria,
            vec![
                "pen test passes".to_string(),
                "p99 latency under 200ms".to_string(),
            ]
        );
    }

    #[test]
    fn test_merges_result_sets_across_batches() {
        let first = set_of(vec![security_report()]);
        let second = set_of(vec![testing_report()]);

        let plan = Synthesizer::new().synthesize(&[first, second]);
        assert_eq!(plan.all_actions().count(), 2);
    }

    #[test]
    fn test_key_findings_are_tier_ordered_and_capped() {
        let plan = Synthesizer::new()
            .with_max_key_findings(1)
            .synthesize(&[set_of(vec![security_report(), testing_report()])]);

        assert_eq!(plan.key_findings.len(), 1);
        assert!(plan.key_findings[0].starts_with("[security] security:"));
    }

    #[test]
    fn test_all_three_phases_always_present() {
        let plan = Synthesizer::new().synthesize(&[ResultSet::new()]);
        assert_eq!(plan.phases.len(), 3);
        assert!(plan.all_actions().next().is_none());
    }
}
