//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They deserialize directly and convert to application-layer parameters
//! via [`FileConfig::to_params`].

use conclave_application::config::{AdvisoryTimeouts, OrchestratorParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Severity of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The configuration is usable; the value was adjusted or ignored.
    Warning,
    /// The configuration cannot produce a working engine.
    Error,
}

/// One issue detected during config validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending field (e.g. `"orchestrator.preferred_batch_size"`).
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// `[orchestrator]` section: strategy selection and batching limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestratorConfig {
    pub max_parallel_agents: usize,
    pub preferred_batch_size: usize,
    pub hard_concurrency_limit: usize,
    /// Per-batch deadline in seconds.
    pub coordination_timeout_secs: u64,
    pub unit_token_estimate: u64,
}

impl Default for FileOrchestratorConfig {
    fn default() -> Self {
        let params = OrchestratorParams::default();
        Self {
            max_parallel_agents: params.max_parallel_agents,
            preferred_batch_size: params.preferred_batch_size,
            hard_concurrency_limit: params.hard_concurrency_limit,
            coordination_timeout_secs: params.coordination_timeout.as_secs(),
            unit_token_estimate: params.unit_token_estimate,
        }
    }
}

/// `[advisory]` section: external advisory lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAdvisoryConfig {
    pub enabled: bool,
    /// Base URL of the advisory service (required when enabled).
    pub endpoint: Option<String>,
    pub probe_timeout_ms: u64,
    /// Progressive lookup timeout ladder, in milliseconds.
    pub ladder_timeouts_ms: Vec<u64>,
}

impl Default for FileAdvisoryConfig {
    fn default() -> Self {
        let timeouts = AdvisoryTimeouts::default();
        Self {
            enabled: false,
            endpoint: None,
            probe_timeout_ms: timeouts.probe.as_millis() as u64,
            ladder_timeouts_ms: timeouts
                .ladder
                .iter()
                .map(|d| d.as_millis() as u64)
                .collect(),
        }
    }
}

/// `[specialists]` section: how work units reach the execution platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSpecialistsConfig {
    /// Executable dispatched once per work unit.
    pub command: String,
    /// Extra arguments passed before the specialist reference.
    pub args: Vec<String>,
    /// Per-unit timeout in seconds.
    pub unit_timeout_secs: u64,
}

impl Default for FileSpecialistsConfig {
    fn default() -> Self {
        Self {
            command: "conclave-specialist".to_string(),
            args: Vec::new(),
            unit_timeout_secs: 120,
        }
    }
}

/// `[history]` section: coordination tracking and structured logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHistoryConfig {
    /// Bound on the coordination records retained for insights.
    pub capacity: usize,
    /// JSONL coordination log path; unset disables the structured log.
    pub log_file: Option<String>,
}

impl Default for FileHistoryConfig {
    fn default() -> Self {
        Self {
            capacity: OrchestratorParams::default().history_capacity,
            log_file: None,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Strategy selection and batching limits
    pub orchestrator: FileOrchestratorConfig,
    /// Advisory lookup settings
    pub advisory: FileAdvisoryConfig,
    /// Specialist dispatch settings
    pub specialists: FileSpecialistsConfig,
    /// History and structured logging settings
    pub history: FileHistoryConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors mean the engine cannot be constructed from this config;
    /// warnings mean a value was adjusted or will be ignored.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Err(e) = self.to_params().validate() {
            issues.push(ConfigIssue::error("orchestrator", e.to_string()));
        }

        if self.advisory.enabled && self.advisory.endpoint.is_none() {
            issues.push(ConfigIssue::warning(
                "advisory.endpoint",
                "advisory is enabled but no endpoint is configured; lookups will be skipped",
            ));
        }
        if self.advisory.ladder_timeouts_ms.is_empty() {
            issues.push(ConfigIssue::warning(
                "advisory.ladder_timeouts_ms",
                "empty timeout ladder; every advisory lookup will be skipped",
            ));
        }

        if self.specialists.command.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "specialists.command",
                "specialist command must not be empty",
            ));
        }
        if self.specialists.unit_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                "specialists.unit_timeout_secs",
                "per-unit timeout must be positive",
            ));
        }

        if self.history.capacity == 0 {
            issues.push(ConfigIssue::warning(
                "history.capacity",
                "zero history capacity is clamped to one record",
            ));
        }

        issues
    }

    /// Whether any issue is fatal.
    pub fn has_errors(&self) -> bool {
        self.validate()
            .iter()
            .any(|issue| issue.severity == Severity::Error)
    }

    /// Engine parameters described by this file.
    pub fn to_params(&self) -> OrchestratorParams {
        OrchestratorParams {
            max_parallel_agents: self.orchestrator.max_parallel_agents,
            preferred_batch_size: self.orchestrator.preferred_batch_size,
            hard_concurrency_limit: self.orchestrator.hard_concurrency_limit,
            coordination_timeout: Duration::from_secs(self.orchestrator.coordination_timeout_secs),
            unit_token_estimate: self.orchestrator.unit_token_estimate,
            history_capacity: self.history.capacity,
            advisory: self.advisory_timeouts(),
        }
    }

    /// Advisory circuit breaker timeouts described by this file.
    pub fn advisory_timeouts(&self) -> AdvisoryTimeouts {
        AdvisoryTimeouts {
            probe: Duration::from_millis(self.advisory.probe_timeout_ms),
            ladder: self
                .advisory
                .ladder_timeouts_ms
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(!config.has_errors());

        let params = config.to_params();
        assert_eq!(params.max_parallel_agents, 6);
        assert_eq!(params.preferred_batch_size, 4);
        assert_eq!(params.hard_concurrency_limit, 10);
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[orchestrator]
max_parallel_agents = 3
preferred_batch_size = 2
coordination_timeout_secs = 120

[advisory]
enabled = true
endpoint = "https://advisory.internal/api"
probe_timeout_ms = 1000
ladder_timeouts_ms = [2000, 4000]

[specialists]
command = "my-specialist"
args = ["--mode", "analysis"]

[history]
capacity = 25
log_file = "coordination.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.orchestrator.max_parallel_agents, 3);
        assert_eq!(config.orchestrator.preferred_batch_size, 2);
        // Unset fields keep their defaults
        assert_eq!(config.orchestrator.hard_concurrency_limit, 10);

        assert!(config.advisory.enabled);
        assert_eq!(
            config.advisory_timeouts().ladder,
            vec![Duration::from_secs(2), Duration::from_secs(4)]
        );

        assert_eq!(config.specialists.command, "my-specialist");
        assert_eq!(config.specialists.args, vec!["--mode", "analysis"]);
        assert_eq!(config.history.capacity, 25);
        assert_eq!(config.history.log_file.as_deref(), Some("coordination.jsonl"));
    }

    #[test]
    fn test_limits_above_platform_ceiling_are_an_error() {
        let mut config = FileConfig::default();
        config.orchestrator.max_parallel_agents = 11;

        let issues = config.validate();
        assert!(config.has_errors());
        assert_eq!(issues[0].field, "orchestrator");
    }

    #[test]
    fn test_enabled_advisory_without_endpoint_warns() {
        let mut config = FileConfig::default();
        config.advisory.enabled = true;

        let issues = config.validate();
        assert!(!config.has_errors());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].field, "advisory.endpoint");
    }

    #[test]
    fn test_empty_specialist_command_is_an_error() {
        let mut config = FileConfig::default();
        config.specialists.command = "  ".to_string();
        assert!(config.has_errors());
    }

    #[test]
    fn test_zero_history_capacity_warns_only() {
        let mut config = FileConfig::default();
        config.history.capacity = 0;

        let issues = config.validate();
        assert!(!config.has_errors());
        assert_eq!(issues[0].field, "history.capacity");
    }
}
