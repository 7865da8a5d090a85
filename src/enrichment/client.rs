//! Enrichment service client.
//!
//! [`Enricher`] is the seam between the console and the enrichment service.
//! Implementations only need [`Enricher::request`]; the provided
//! [`Enricher::enrich`] turns any failure into a fallback carrying the canned
//! mock record, so enrichment never fails from the caller's point of view.
//!
//! # Failure Classification
//!
//! | Failure | Operator message |
//! |---|---|
//! | connection refused, timeout | cannot connect to the API server |
//! | HTTP 404 | API endpoint not found |
//! | HTTP 5xx | API server error |
//! | other status, `{"error": …}` body, bad JSON | generic failure |

use super::messages::{EnrichedProduct, EnrichmentRequest, EnrichmentResult};
use super::mock::mock_enrichment;
use crate::domain::{CatalogError, Product, Result};
use reqwest::StatusCode;
use std::time::Duration;

/// Source of enrichment data.
pub trait Enricher {
    /// Performs one enrichment call.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EnrichmentUnavailable`] when the service cannot
    /// produce a usable answer.
    fn request(&self, request: &EnrichmentRequest) -> Result<EnrichedProduct>;

    /// Enriches `product`, substituting the mock record on failure.
    fn enrich(&self, product: &Product) -> EnrichmentResult {
        let _span = tracing::debug_span!("enrich", product_id = product.id).entered();

        let request = EnrichmentRequest::for_product(product);
        match self.request(&request) {
            Ok(data) => {
                tracing::debug!("enrichment received");
                EnrichmentResult::Live(data)
            }
            Err(e) => {
                tracing::warn!(error = %e, "enrichment failed, using mock data");
                EnrichmentResult::Fallback {
                    data: mock_enrichment(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// HTTP client posting JSON to the enrichment endpoint.
#[derive(Debug, Clone)]
pub struct HttpEnricher {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpEnricher {
    /// Creates a client for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn unavailable(&self, message: impl Into<String>) -> CatalogError {
        let message = message.into();
        tracing::debug!(endpoint = %self.endpoint, message = %message, "enrichment service unavailable");
        CatalogError::EnrichmentUnavailable(message)
    }
}

impl Enricher for HttpEnricher {
    fn request(&self, request: &EnrichmentRequest) -> Result<EnrichedProduct> {
        tracing::debug!(endpoint = %self.endpoint, product_id = %request.product.id, "posting enrichment request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    self.unavailable(format!(
                        "Cannot connect to the API server. Please ensure the server at {} is running and accessible.",
                        self.endpoint
                    ))
                } else {
                    self.unavailable(format!("Failed to connect to the enrichment API: {e}"))
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(self.unavailable(format!(
                "API endpoint not found. Please check if the correct endpoint is available at {}",
                self.endpoint
            )));
        }
        if status.is_server_error() {
            return Err(self.unavailable(format!(
                "API server error ({status}). Please check the server logs for more information."
            )));
        }
        if !status.is_success() {
            return Err(self.unavailable(format!("API responded with status: {status}")));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|e| self.unavailable(format!("invalid response body: {e}")))?;

        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            let message = error
                .as_str()
                .map_or_else(|| error.to_string(), str::to_string);
            return Err(self.unavailable(format!("API reported an error: {message}")));
        }

        serde_json::from_value(body)
            .map_err(|e| self.unavailable(format!("unexpected response shape: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Enricher for Failing {
        fn request(&self, _request: &EnrichmentRequest) -> Result<EnrichedProduct> {
            Err(CatalogError::EnrichmentUnavailable("down".to_string()))
        }
    }

    struct Echo;

    impl Enricher for Echo {
        fn request(&self, request: &EnrichmentRequest) -> Result<EnrichedProduct> {
            Ok(EnrichedProduct {
                product_name: Some(format!("{} (enriched)", request.product.name)),
                ..EnrichedProduct::default()
            })
        }
    }

    #[test]
    fn failure_falls_back_to_mock() {
        let result = Failing.enrich(&Product::new(1, "Kit"));
        assert!(result.is_fallback());
        assert_eq!(result.data(), &mock_enrichment());
        let EnrichmentResult::Fallback { reason, .. } = result else {
            panic!("expected fallback");
        };
        assert!(reason.contains("down"));
    }

    #[test]
    fn success_is_live() {
        let result = Echo.enrich(&Product::new(1, "Kit"));
        assert!(!result.is_fallback());
        assert_eq!(result.data().product_name.as_deref(), Some("Kit (enriched)"));
    }
}
