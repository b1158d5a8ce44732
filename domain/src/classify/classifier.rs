//! Keyword-based domain classifier.
//!
//! Maps raw problem text to a set of domain tags by case-insensitive
//! substring matching against a fixed keyword table. No NLP, no external
//! calls, and no failure mode: a problem that matches nothing is classified
//! as [`Domain::General`] so downstream components never see an empty set.

use crate::classify::domain::Domain;

/// Keyword table entry: a domain and the substrings that select it.
type KeywordRow = (Domain, &'static [&'static str]);

const KEYWORD_TABLE: &[KeywordRow] = &[
    (
        Domain::Security,
        &[
            "security",
            "vulnerab",
            "auth",
            "encrypt",
            "exploit",
            "injection",
            "credential",
            "permission",
            "secret",
        ],
    ),
    (
        Domain::Infrastructure,
        &[
            "infrastructure",
            "deploy",
            "docker",
            "kubernetes",
            "network",
            "outage",
            "scaling",
            "server",
            "pipeline",
        ],
    ),
    (
        Domain::Database,
        &[
            "database",
            "migration",
            "schema",
            "query",
            "index",
            "postgres",
            "sql",
        ],
    ),
    (
        Domain::Observability,
        &[
            "observability",
            "monitoring",
            "alerting",
            "metrics",
            "tracing",
            "dashboard",
        ],
    ),
    (
        Domain::Architecture,
        &[
            "architecture",
            "coupling",
            "module boundar",
            "monolith",
            "microservice",
            "design pattern",
        ],
    ),
    (
        Domain::Api,
        &[
            "api",
            "endpoint",
            "rest",
            "graphql",
            "versioning",
            "contract",
        ],
    ),
    (
        Domain::Quality,
        &[
            "quality",
            "refactor",
            "lint",
            "code review",
            "maintainab",
            "tech debt",
            "readability",
        ],
    ),
    (
        Domain::Testing,
        &[
            "test",
            "coverage",
            "flaky",
            "regression",
            "assertion",
            "mock",
        ],
    ),
    (
        Domain::Frontend,
        &[
            "frontend",
            "ui ",
            "css",
            "layout",
            "browser",
            "component render",
        ],
    ),
    (
        Domain::Performance,
        &[
            "performance",
            "latency",
            "optimiz",
            "memory",
            "throughput",
            "cpu",
            "bottleneck",
        ],
    ),
    (
        Domain::Documentation,
        &["documentation", "readme", "changelog", "docs", "tutorial"],
    ),
    (
        Domain::Accessibility,
        &["accessibility", "a11y", "screen reader", "aria", "contrast"],
    ),
];

/// Classifies free-text problem descriptions into domain tags.
#[derive(Debug, Clone, Default)]
pub struct DomainClassifier;

impl DomainClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a problem description.
    ///
    /// Returns a non-empty, deduplicated list of domains in priority order.
    /// A text that matches no keyword yields `[Domain::General]`.
    pub fn classify(&self, text: &str) -> Vec<Domain> {
        let lowered = text.to_lowercase();

        let mut domains: Vec<Domain> = KEYWORD_TABLE
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(domain, _)| *domain)
            .collect();

        domains.sort();
        domains.dedup();

        if domains.is_empty() {
            domains.push(Domain::General);
        }
        domains
    }
}
