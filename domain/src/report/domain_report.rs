//! Domain report - the structured result one specialist returns.
//!
//! This is the whole contract between the engine and a specialist: a
//! specialist receives a work unit and must answer with a report in this
//! shape. Malformed responses become failed reports upstream.

use crate::classify::domain::Domain;
use crate::synthesis::tier::PriorityTier;
use serde::{Deserialize, Serialize};

fn clamp_score(value: u8) -> u8 {
    value.clamp(1, 10)
}

/// A single finding inside a domain report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub description: String,
    pub tier: PriorityTier,
    /// Estimated impact, 1-10
    pub impact: u8,
    /// Estimated effort to address, 1-10
    pub effort: u8,
}

impl Issue {
    pub fn new(description: impl Into<String>, tier: PriorityTier) -> Self {
        Self {
            description: description.into(),
            tier,
            impact: 5,
            effort: 5,
        }
    }

    pub fn with_impact(mut self, impact: u8) -> Self {
        self.impact = clamp_score(impact);
        self
    }

    pub fn with_effort(mut self, effort: u8) -> Self {
        self.effort = clamp_score(effort);
        self
    }

    /// Impact per unit of effort; used for ordering within a plan phase.
    pub fn leverage(&self) -> f64 {
        self.impact as f64 / self.effort.max(1) as f64
    }
}

/// A recommended action inside a domain report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: String,
    /// Artifact identifier tags this action touches (e.g. `"user-db"`).
    /// Conflict detection keys on these.
    #[serde(default)]
    pub targets: Vec<String>,
    pub tier: PriorityTier,
    /// Estimated impact, 1-10
    pub impact: u8,
    /// Estimated effort, 1-10
    pub effort: u8,
}

impl Recommendation {
    pub fn new(action: impl Into<String>, tier: PriorityTier) -> Self {
        Self {
            action: action.into(),
            targets: Vec::new(),
            tier,
            impact: 5,
            effort: 5,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    pub fn with_impact(mut self, impact: u8) -> Self {
        self.impact = clamp_score(impact);
        self
    }

    pub fn with_effort(mut self, effort: u8) -> Self {
        self.effort = clamp_score(effort);
        self
    }

    pub fn leverage(&self) -> f64 {
        self.impact as f64 / self.effort.max(1) as f64
    }
}

/// Result of one work unit (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainReport {
    /// The domain this report covers
    pub domain: Domain,
    /// One-paragraph summary of the analysis
    pub summary: String,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    /// Free-form prioritization hints from the specialist
    #[serde(default)]
    pub priority_hints: Vec<String>,
    /// Validation checks the specialist wants in the success criteria
    #[serde(default)]
    pub validation_checks: Vec<String>,
    /// Whether the work unit produced a usable analysis
    pub success: bool,
    /// Error message if the unit failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DomainReport {
    /// Creates a successful report for a domain.
    pub fn completed(domain: Domain, summary: impl Into<String>) -> Self {
        Self {
            domain,
            summary: summary.into(),
            issues: Vec::new(),
            recommendations: Vec::new(),
            priority_hints: Vec::new(),
            validation_checks: Vec::new(),
            success: true,
            error: None,
        }
    }

    /// Creates a failed report for a domain that could not be analyzed.
    pub fn failed(domain: Domain, error: impl Into<String>) -> Self {
        Self {
            domain,
            summary: String::new(),
            issues: Vec::new(),
            recommendations: Vec::new(),
            priority_hints: Vec::new(),
            validation_checks: Vec::new(),
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = issues;
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<Recommendation>) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn with_priority_hints(mut self, hints: Vec<String>) -> Self {
        self.priority_hints = hints;
        self
    }

    pub fn with_validation_checks(mut self, checks: Vec<String>) -> Self {
        self.validation_checks = checks;
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_report() {
        let report = DomainReport::completed(Domain::Security, "no critical findings")
            .with_issues(vec![
                Issue::new("session tokens never expire", PriorityTier::Security)
                    .with_impact(9)
                    .with_effort(3),
            ])
            .with_validation_checks(vec!["pen test passes".to_string()]);

        assert!(report.is_success());
        assert!(report.error.is_none());
        assert_eq!(report.issues[0].impact, 9);
        assert!((report.issues[0].leverage() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failed_report() {
        let report = DomainReport::failed(Domain::Testing, "specialist timed out");
        assert!(!report.is_success());
        assert_eq!(report.error.as_deref(), Some("specialist timed out"));
    }

    #[test]
    fn test_scores_are_clamped() {
        let issue = Issue::new("x", PriorityTier::Quality)
            .with_impact(40)
            .with_effort(0);
        assert_eq!(issue.impact, 10);
        assert_eq!(issue.effort, 1);
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let report = DomainReport::completed(Domain::Api, "contract drift found")
            .with_recommendations(vec![
                Recommendation::new("freeze v1 endpoints", PriorityTier::Quality)
                    .with_target("public-api"),
            ]);

        let json = serde_json::to_string(&report).unwrap();
        let back: DomainReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
