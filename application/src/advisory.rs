//! Advisory client - circuit breaker over the advisory service port.
//!
//! The advisory lookup is never on the critical path: every outcome short
//! of a successful lookup collapses to `None` and the work unit proceeds
//! with its own analysis. The protocol is a fast availability probe (which
//! opens the breaker on failure) followed by a progressive timeout ladder
//! for the real lookup.

use crate::config::AdvisoryTimeouts;
use crate::ports::advisory::{Advisory, AdvisoryQuery, AdvisoryService};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Circuit-breaker wrapper around an [`AdvisoryService`].
///
/// Once the availability probe fails, the breaker opens and every later
/// consult on this client returns `None` without touching the service.
/// Clients are scoped to one engine; a new engine probes afresh.
pub struct AdvisoryClient {
    service: Arc<dyn AdvisoryService>,
    timeouts: AdvisoryTimeouts,
    open: AtomicBool,
}

impl AdvisoryClient {
    pub fn new(service: Arc<dyn AdvisoryService>, timeouts: AdvisoryTimeouts) -> Self {
        Self {
            service,
            timeouts,
            open: AtomicBool::new(false),
        }
    }

    /// Whether the breaker has opened.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }

    /// Best-effort lookup. Never fails; `None` means "proceed without".
    pub async fn consult(&self, query: &AdvisoryQuery) -> Option<Advisory> {
        if self.is_open() {
            debug!(domain = %query.domain, "advisory breaker open, skipping lookup");
            return None;
        }

        match timeout(self.timeouts.probe, self.service.probe()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!("advisory probe failed, opening breaker: {}", e);
                self.open.store(true, Ordering::Relaxed);
                return None;
            }
            Err(_) => {
                warn!("advisory probe timed out, opening breaker");
                self.open.store(true, Ordering::Relaxed);
                return None;
            }
        }

        for (rung, limit) in self.timeouts.ladder.iter().enumerate() {
            match timeout(*limit, self.service.lookup(query)).await {
                Ok(Ok(advisory)) => {
                    debug!(domain = %query.domain, source = %advisory.source, "advisory obtained");
                    return Some(advisory);
                }
                Ok(Err(e)) => {
                    // A definite service error will not improve on retry.
                    warn!(domain = %query.domain, "advisory lookup failed: {}", e);
                    return None;
                }
                Err(_) => {
                    debug!(
                        domain = %query.domain,
                        rung,
                        "advisory lookup timed out, climbing ladder"
                    );
                }
            }
        }

        debug!(domain = %query.domain, "advisory ladder exhausted, proceeding without");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::advisory::AdvisoryError;
    use async_trait::async_trait;
    use conclave_domain::Domain;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::time::sleep;

    struct StubAdvisory {
        probe_delay: Duration,
        probe_fails: bool,
        lookup_delay: Duration,
        lookups: AtomicUsize,
    }

    impl StubAdvisory {
        fn healthy(lookup_delay: Duration) -> Self {
            Self {
                probe_delay: Duration::from_millis(10),
                probe_fails: false,
                lookup_delay,
                lookups: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AdvisoryService for StubAdvisory {
        async fn probe(&self) -> Result<(), AdvisoryError> {
            sleep(self.probe_delay).await;
            if self.probe_fails {
                Err(AdvisoryError::Unavailable("down for maintenance".into()))
            } else {
                Ok(())
            }
        }

        async fn lookup(&self, query: &AdvisoryQuery) -> Result<Advisory, AdvisoryError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            sleep(self.lookup_delay).await;
            Ok(Advisory {
                source: "kb-42".to_string(),
                guidance: format!("prior art for {}", query.domain),
            })
        }
    }

    fn query() -> AdvisoryQuery {
        AdvisoryQuery::new(Domain::Security, "audit the login flow")
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_lookup_returns_advisory() {
        let service = Arc::new(StubAdvisory::healthy(Duration::from_secs(1)));
        let client = AdvisoryClient::new(service, AdvisoryTimeouts::default());

        let advisory = client.consult(&query()).await.unwrap();
        assert_eq!(advisory.source, "kb-42");
        assert!(!client.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_lookup_climbs_the_ladder() {
        // 12s lookup: misses the 5s and 10s rungs, lands inside the 15s one
        let service = Arc::new(StubAdvisory::healthy(Duration::from_secs(12)));
        let client = AdvisoryClient::new(Arc::clone(&service) as _, AdvisoryTimeouts::default());

        let advisory = client.consult(&query()).await;
        assert!(advisory.is_some());
        assert_eq!(service.lookups.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ladder_exhaustion_yields_none_not_error() {
        let service = Arc::new(StubAdvisory::healthy(Duration::from_secs(60)));
        let client = AdvisoryClient::new(Arc::clone(&service) as _, AdvisoryTimeouts::default());

        assert!(client.consult(&query()).await.is_none());
        // Ladder exhaustion is not an availability signal; breaker stays shut
        assert!(!client.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_timeout_opens_breaker_and_skips_lookup() {
        let service = Arc::new(StubAdvisory {
            probe_delay: Duration::from_secs(30),
            probe_fails: false,
            lookup_delay: Duration::from_millis(1),
            lookups: AtomicUsize::new(0),
        });
        let client = AdvisoryClient::new(Arc::clone(&service) as _, AdvisoryTimeouts::default());

        assert!(client.consult(&query()).await.is_none());
        assert!(client.is_open());
        assert_eq!(service.lookups.load(Ordering::SeqCst), 0);

        // Breaker stays open for subsequent consults
        assert!(client.consult(&query()).await.is_none());
        assert_eq!(service.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_error_opens_breaker() {
        let service = Arc::new(StubAdvisory {
            probe_delay: Duration::from_millis(1),
            probe_fails: true,
            lookup_delay: Duration::from_millis(1),
            lookups: AtomicUsize::new(0),
        });
        let client = AdvisoryClient::new(service, AdvisoryTimeouts::default());

        assert!(client.consult(&query()).await.is_none());
        assert!(client.is_open());
    }
}
