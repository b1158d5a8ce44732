//! CLI specialist gateway
//!
//! Dispatches work units to specialist processes on the execution
//! platform: one process per unit, the unit as JSON on stdin, a
//! [`DomainReport`] as JSON on stdout. Anything else (bad exit status,
//! unparsable output, a report for the wrong domain) is a per-unit
//! error that the engine turns into a failed report.

use crate::config::FileSpecialistsConfig;
use async_trait::async_trait;
use conclave_application::ports::specialist_gateway::{SpecialistError, SpecialistGateway};
use conclave_domain::{DomainReport, WorkUnit};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Gateway that runs one specialist process per work unit.
#[derive(Debug)]
pub struct CliSpecialistGateway {
    program: PathBuf,
    base_args: Vec<String>,
    unit_timeout: Duration,
}

impl CliSpecialistGateway {
    /// Locate `command` on the PATH and build a gateway around it.
    pub fn discover(
        command: &str,
        base_args: Vec<String>,
        unit_timeout: Duration,
    ) -> Result<Self, SpecialistError> {
        let program = which::which(command).map_err(|e| {
            SpecialistError::Unavailable(format!("'{}' not found on PATH: {}", command, e))
        })?;
        debug!(program = %program.display(), "specialist command resolved");
        Ok(Self {
            program,
            base_args,
            unit_timeout,
        })
    }

    /// Build a gateway from the `[specialists]` config section.
    pub fn from_config(config: &FileSpecialistsConfig) -> Result<Self, SpecialistError> {
        Self::discover(
            &config.command,
            config.args.clone(),
            Duration::from_secs(config.unit_timeout_secs),
        )
    }

    /// Build a gateway around an explicit executable, skipping PATH
    /// discovery.
    pub fn with_program(
        program: impl Into<PathBuf>,
        base_args: Vec<String>,
        unit_timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            base_args,
            unit_timeout,
        }
    }
}

#[async_trait]
impl SpecialistGateway for CliSpecialistGateway {
    async fn dispatch(&self, unit: &WorkUnit) -> Result<DomainReport, SpecialistError> {
        let payload = serde_json::to_vec(unit)
            .map_err(|e| SpecialistError::ExecutionFailed(e.to_string()))?;

        let mut child = Command::new(&self.program)
            .args(&self.base_args)
            .arg(&unit.specialist_ref)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SpecialistError::Unavailable(format!(
                    "failed to spawn {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&payload)
                .await
                .map_err(|e| SpecialistError::ExecutionFailed(e.to_string()))?;
            // Dropping stdin closes the pipe and signals end of input
        }

        let output = match timeout(self.unit_timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(SpecialistError::ExecutionFailed(e.to_string())),
            Err(_) => {
                warn!(
                    specialist = %unit.specialist_ref,
                    timeout = ?self.unit_timeout,
                    "specialist process timed out"
                );
                return Err(SpecialistError::Timeout);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpecialistError::ExecutionFailed(format!(
                "{} exited with {}: {}",
                unit.specialist_ref,
                output.status,
                stderr.trim()
            )));
        }

        let report: DomainReport = serde_json::from_slice(&output.stdout)
            .map_err(|e| SpecialistError::Malformed(e.to_string()))?;

        if report.domain != unit.domain {
            return Err(SpecialistError::Malformed(format!(
                "report covers '{}', expected '{}'",
                report.domain, unit.domain
            )));
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conclave_domain::{CoordinationId, Domain};

    fn unit() -> WorkUnit {
        WorkUnit::new(
            CoordinationId::from_sequence(1),
            Domain::Security,
            "audit the login flow",
        )
    }

    fn shell_gateway(script: &str, timeout: Duration) -> CliSpecialistGateway {
        CliSpecialistGateway::with_program(
            "/bin/sh",
            vec!["-c".to_string(), script.to_string()],
            timeout,
        )
    }

    #[tokio::test]
    async fn test_dispatch_parses_report_from_stdout() {
        let script = r#"cat >/dev/null; echo '{"domain":"security","summary":"no holes found","success":true}'"#;
        let gateway = shell_gateway(script, Duration::from_secs(5));

        let report = gateway.dispatch(&unit()).await.unwrap();
        assert_eq!(report.domain, Domain::Security);
        assert_eq!(report.summary, "no holes found");
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_specialist_receives_unit_as_json_on_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let capture = dir.path().join("unit.json");
        let script = format!(
            r#"cat > {}; echo '{{"domain":"security","summary":"ok","success":true}}'"#,
            capture.display()
        );
        let gateway = shell_gateway(&script, Duration::from_secs(5));

        gateway.dispatch(&unit()).await.unwrap();

        let captured = std::fs::read_to_string(&capture).unwrap();
        let value: serde_json::Value = serde_json::from_str(&captured).unwrap();
        assert_eq!(value["domain"], "security");
        assert_eq!(value["specialist_ref"], "security-specialist");
        assert!(value["prompt_context"]
            .as_str()
            .unwrap()
            .contains("audit the login flow"));
    }

    #[tokio::test]
    async fn test_unparsable_output_is_malformed() {
        let gateway = shell_gateway("cat >/dev/null; echo not json at all", Duration::from_secs(5));
        let err = gateway.dispatch(&unit()).await.unwrap_err();
        assert!(matches!(err, SpecialistError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_wrong_domain_is_malformed() {
        let script = r#"cat >/dev/null; echo '{"domain":"frontend","summary":"wrong","success":true}'"#;
        let gateway = shell_gateway(script, Duration::from_secs(5));

        let err = gateway.dispatch(&unit()).await.unwrap_err();
        assert!(matches!(err, SpecialistError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_execution_failure() {
        let gateway = shell_gateway(
            "cat >/dev/null; echo oops >&2; exit 3",
            Duration::from_secs(5),
        );

        let err = gateway.dispatch(&unit()).await.unwrap_err();
        match err {
            SpecialistError::ExecutionFailed(msg) => assert!(msg.contains("oops")),
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_specialist_times_out() {
        let gateway = shell_gateway("cat >/dev/null; sleep 5", Duration::from_millis(200));
        let err = gateway.dispatch(&unit()).await.unwrap_err();
        assert!(matches!(err, SpecialistError::Timeout));
    }

    #[test]
    fn test_discover_missing_command_is_unavailable() {
        let err = CliSpecialistGateway::discover(
            "definitely-not-a-real-specialist-binary",
            Vec::new(),
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, SpecialistError::Unavailable(_)));
    }

    #[test]
    fn test_discover_resolves_path_commands() {
        assert!(CliSpecialistGateway::discover("sh", Vec::new(), Duration::from_secs(1)).is_ok());
    }
}
