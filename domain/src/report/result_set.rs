//! Result set - per-domain reports accumulated as work units complete.
//!
//! Keyed by [`Domain`] in a `BTreeMap`, so iteration order is the domain
//! priority order and never depends on work unit completion order.

use crate::classify::domain::Domain;
use crate::report::domain_report::DomainReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from domain to its report for one coordination run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    reports: BTreeMap<Domain, DomainReport>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a report, replacing any earlier report for the same domain.
    pub fn insert(&mut self, report: DomainReport) {
        self.reports.insert(report.domain, report);
    }

    pub fn get(&self, domain: &Domain) -> Option<&DomainReport> {
        self.reports.get(domain)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainReport> {
        self.reports.values()
    }

    /// Reports from units that returned a usable analysis.
    pub fn completed(&self) -> impl Iterator<Item = &DomainReport> {
        self.reports.values().filter(|r| r.success)
    }

    /// Reports from units that failed or timed out.
    pub fn failed(&self) -> impl Iterator<Item = &DomainReport> {
        self.reports.values().filter(|r| !r.success)
    }

    /// Absorb another result set (later batches of the same run).
    pub fn merge(&mut self, other: ResultSet) {
        self.reports.extend(other.reports);
    }

    /// Short per-domain digest of completed findings, used to frame later
    /// batches' work units in staged coordination.
    pub fn context_digest(&self) -> String {
        let lines: Vec<String> = self
            .completed()
            .map(|r| format!("- {}: {}", r.domain, r.summary))
            .collect();

        if lines.is_empty() {
            String::new()
        } else {
            format!("Findings from earlier batches:\n{}", lines.join("\n"))
        }
    }
}

impl FromIterator<DomainReport> for ResultSet {
    fn from_iter<T: IntoIterator<Item = DomainReport>>(iter: T) -> Self {
        let mut set = ResultSet::new();
        for report in iter {
            set.insert(report);
        }
        set
    }
}
