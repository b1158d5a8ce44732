//! HTTP advisory service adapter
//!
//! Talks to an external advisory knowledge base over HTTP. The adapter
//! itself applies no timeouts; the application-layer circuit breaker
//! owns the probe and ladder limits.

use async_trait::async_trait;
use conclave_application::ports::advisory::{
    Advisory, AdvisoryError, AdvisoryQuery, AdvisoryService,
};
use tracing::debug;

/// Advisory service backed by an HTTP knowledge base.
///
/// Expects `GET {base}/health` for the availability probe and
/// `POST {base}/advisories` with the query as JSON for lookups.
pub struct HttpAdvisoryService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAdvisoryService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn map_transport_error(e: reqwest::Error) -> AdvisoryError {
    if e.is_timeout() {
        AdvisoryError::Timeout
    } else {
        AdvisoryError::Unavailable(e.to_string())
    }
}

#[async_trait]
impl AdvisoryService for HttpAdvisoryService {
    async fn probe(&self) -> Result<(), AdvisoryError> {
        let response = self
            .client
            .get(self.url("health"))
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AdvisoryError::Unavailable(format!(
                "health check returned {}",
                response.status()
            )))
        }
    }

    async fn lookup(&self, query: &AdvisoryQuery) -> Result<Advisory, AdvisoryError> {
        debug!(domain = %query.domain, "advisory lookup");

        let response = self
            .client
            .post(self.url("advisories"))
            .json(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(AdvisoryError::Unavailable(format!(
                "lookup returned {}",
                response.status()
            )));
        }

        response
            .json::<Advisory>()
            .await
            .map_err(|e| AdvisoryError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let service = HttpAdvisoryService::new("https://advisory.internal/api/");
        assert_eq!(
            service.url("health"),
            "https://advisory.internal/api/health"
        );
        assert_eq!(
            service.url("advisories"),
            "https://advisory.internal/api/advisories"
        );
    }
}
