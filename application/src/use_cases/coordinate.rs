//! Coordinate use case
//!
//! The orchestration engine: classifies a problem, plans batches under the
//! concurrency ceiling, dispatches work units to specialists, tracks the
//! run, and synthesizes the final plan.
//!
//! Within a batch, work units run concurrently and completion order never
//! matters (results are keyed by domain). Across batches, execution is
//! strictly sequential: a batch fully completes before the next one is
//! dispatched, so staged coordination can thread earlier findings into
//! later batches' prompt context.

use crate::advisory::AdvisoryClient;
use crate::config::OrchestratorParams;
use crate::ports::advisory::AdvisoryQuery;
use crate::ports::coordination_log::{CoordinationEvent, CoordinationLogger, NoCoordinationLogger};
use crate::ports::progress::{CoordinationProgress, NoProgress};
use crate::ports::specialist_gateway::SpecialistGateway;
use conclave_domain::{
    Batch, CoordinationId, CoordinationInsights, CoordinationOutcome, CoordinationTracker, Domain,
    DomainClassifier, DomainError, DomainReport, Problem, ResultSet, Strategy, SynthesizedPlan,
    Synthesizer, WorkUnit,
};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can abort a coordination run.
///
/// Per-domain failures never appear here: they are captured in the
/// synthesized plan as incomplete analyses. Only construction-time
/// configuration errors and caller-driven cancellation abort a run.
#[derive(Error, Debug)]
pub enum CoordinateError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Coordination cancelled before batch {0}")]
    Cancelled(usize),
}

/// Input for the Coordinate use case
#[derive(Debug, Clone)]
pub struct CoordinateInput {
    /// The free-text problem description
    pub problem: Problem,
}

impl CoordinateInput {
    pub fn new(problem: impl Into<Problem>) -> Self {
        Self {
            problem: problem.into(),
        }
    }
}

/// Output of one coordination run
#[derive(Debug, Clone)]
pub struct CoordinateOutput {
    pub coordination_id: CoordinationId,
    pub strategy: Strategy,
    /// Domains the problem classified into
    pub domains: Vec<Domain>,
    /// Final per-run tally
    pub outcome: CoordinationOutcome,
    /// The merged, conflict-resolved plan
    pub plan: SynthesizedPlan,
}

/// Use case for coordinating one problem end to end
pub struct CoordinateUseCase<G: SpecialistGateway + 'static> {
    gateway: Arc<G>,
    params: OrchestratorParams,
    classifier: DomainClassifier,
    synthesizer: Synthesizer,
    tracker: Mutex<CoordinationTracker>,
    advisory: Option<Arc<AdvisoryClient>>,
    logger: Arc<dyn CoordinationLogger>,
}

impl<G: SpecialistGateway + 'static> CoordinateUseCase<G> {
    /// Create the engine. The only fatal error in the system: invalid
    /// parameters are rejected here and never mid-run.
    pub fn new(gateway: Arc<G>, params: OrchestratorParams) -> Result<Self, CoordinateError> {
        params.validate()?;
        let tracker = CoordinationTracker::new(params.history_capacity);
        Ok(Self {
            gateway,
            params,
            classifier: DomainClassifier::new(),
            synthesizer: Synthesizer::new(),
            tracker: Mutex::new(tracker),
            advisory: None,
            logger: Arc::new(NoCoordinationLogger),
        })
    }

    /// Attach an advisory circuit breaker consulted by every work unit.
    pub fn with_advisory(mut self, client: AdvisoryClient) -> Self {
        self.advisory = Some(Arc::new(client));
        self
    }

    /// Attach a structured coordination logger.
    pub fn with_logger(mut self, logger: Arc<dyn CoordinationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Read-only snapshot of coordination history statistics.
    pub fn insights(&self) -> CoordinationInsights {
        self.lock_tracker().insights()
    }

    // The tracker is single-writer by construction; a poisoned lock only
    // means a panicking test thread, so recover the inner value.
    fn lock_tracker(&self) -> MutexGuard<'_, CoordinationTracker> {
        self.tracker.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Execute with no progress callbacks and no cancellation.
    pub async fn execute(&self, input: CoordinateInput) -> Result<CoordinateOutput, CoordinateError> {
        self.execute_with_progress(input, &NoProgress, CancellationToken::new())
            .await
    }

    /// Execute with progress callbacks.
    ///
    /// The cancellation token is honored at batch boundaries only: the
    /// platform has no mid-batch cancel primitive, so an in-flight batch
    /// always runs to completion.
    pub async fn execute_with_progress(
        &self,
        input: CoordinateInput,
        progress: &dyn CoordinationProgress,
        cancel: CancellationToken,
    ) -> Result<CoordinateOutput, CoordinateError> {
        let domains = self.classifier.classify(input.problem.content());

        let insights = self.lock_tracker().insights();
        let plan = self
            .params
            .to_selector()
            .select_with_insights(&domains, &insights)?;

        let id = self
            .lock_tracker()
            .start(plan.strategy, &domains, plan.estimated_tokens);

        info!(
            id = %id,
            strategy = %plan.strategy,
            domains = domains.len(),
            batches = plan.batch_count(),
            "starting coordination"
        );
        self.logger
            .log(CoordinationEvent::started(&id, plan.strategy, &domains));

        let mut batch_sets: Vec<ResultSet> = Vec::with_capacity(plan.batch_count());
        let mut merged = ResultSet::new();
        let mut degraded_batches = 0;

        for (index, batch) in plan.batches.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(id = %id, batch = index, "coordination cancelled at batch boundary");
                let outcome = CoordinationOutcome::new(
                    merged.completed().count(),
                    merged.failed().count(),
                    degraded_batches,
                );
                let _ = self.lock_tracker().complete(&id, outcome);
                return Err(CoordinateError::Cancelled(index));
            }

            progress.on_batch_start(index, plan.batch_count(), batch.len());
            self.logger
                .log(CoordinationEvent::batch_dispatched(&id, index, batch.len()));

            let earlier_findings = merged.context_digest();
            let (set, degraded) = self
                .run_batch(&id, batch, &input.problem, &earlier_findings, progress)
                .await;

            if degraded {
                degraded_batches += 1;
            }
            progress.on_batch_complete(index, degraded);

            merged.merge(set.clone());
            batch_sets.push(set);
        }

        let outcome = CoordinationOutcome::new(
            merged.completed().count(),
            merged.failed().count(),
            degraded_batches,
        );
        self.lock_tracker().complete(&id, outcome)?;
        self.logger.log(CoordinationEvent::completed(&id, &outcome));
        info!(
            id = %id,
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            degraded = outcome.degraded_batches,
            "coordination finished"
        );

        let synthesized = self.synthesizer.synthesize(&batch_sets);

        Ok(CoordinateOutput {
            coordination_id: id,
            strategy: plan.strategy,
            domains,
            outcome,
            plan: synthesized,
        })
    }

    /// Dispatch one batch and wait for every member.
    ///
    /// A failing unit never aborts its siblings; it becomes a failed report.
    /// Past the per-batch deadline the batch is degraded: whatever completed
    /// is kept and every still-pending domain is marked failed.
    async fn run_batch(
        &self,
        id: &CoordinationId,
        batch: &Batch,
        problem: &Problem,
        earlier_findings: &str,
        progress: &dyn CoordinationProgress,
    ) -> (ResultSet, bool) {
        let mut join_set = JoinSet::new();
        let mut pending: BTreeSet<Domain> = batch.domains().iter().copied().collect();

        for &domain in batch.domains() {
            let gateway = Arc::clone(&self.gateway);
            let advisory = self.advisory.clone();
            let unit = WorkUnit::new(id.clone(), domain, problem.content())
                .with_appended_context(earlier_findings);
            let query = AdvisoryQuery::new(domain, problem.content());

            join_set.spawn(async move {
                let unit = match advisory {
                    Some(client) => match client.consult(&query).await {
                        Some(advisory) => unit.with_appended_context(&format!(
                            "Advisory note ({}): {}",
                            advisory.source, advisory.guidance
                        )),
                        None => unit,
                    },
                    None => unit,
                };
                let result = gateway.dispatch(&unit).await;
                (domain, result)
            });
        }

        let deadline = Instant::now() + self.params.coordination_timeout;
        let mut set = ResultSet::new();
        let mut degraded = false;

        loop {
            match timeout_at(deadline, join_set.join_next()).await {
                Ok(Some(Ok((domain, Ok(report))))) => {
                    pending.remove(&domain);
                    if report.domain != domain {
                        warn!(
                            expected = %domain,
                            got = %report.domain,
                            "specialist answered for the wrong domain"
                        );
                        self.record_unit(&mut set, domain, "report for wrong domain", progress, id);
                        continue;
                    }
                    debug!(domain = %domain, "work unit completed");
                    progress.on_unit_complete(&domain, true);
                    self.logger
                        .log(CoordinationEvent::unit_finished(id, domain, true));
                    set.insert(report);
                }
                Ok(Some(Ok((domain, Err(e))))) => {
                    pending.remove(&domain);
                    warn!(domain = %domain, "work unit failed: {}", e);
                    self.record_unit(&mut set, domain, &e.to_string(), progress, id);
                }
                Ok(Some(Err(e))) => {
                    // The owning domain is marked failed after the loop.
                    warn!("work unit task join error: {}", e);
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        id = %id,
                        timeout = ?self.params.coordination_timeout,
                        "batch deadline exceeded, marking batch degraded"
                    );
                    degraded = true;
                    join_set.abort_all();
                    break;
                }
            }
        }

        // Every requested domain is accounted for, completed or not.
        for domain in pending {
            if set.get(&domain).is_none() {
                let reason = if degraded {
                    "batch deadline exceeded"
                } else {
                    "work unit task aborted"
                };
                self.record_unit(&mut set, domain, reason, progress, id);
            }
        }

        (set, degraded)
    }

    fn record_unit(
        &self,
        set: &mut ResultSet,
        domain: Domain,
        error: &str,
        progress: &dyn CoordinationProgress,
        id: &CoordinationId,
    ) {
        progress.on_unit_complete(&domain, false);
        self.logger
            .log(CoordinationEvent::unit_finished(id, domain, false));
        set.insert(DomainReport::failed(domain, error));
    }
}
