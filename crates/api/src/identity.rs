//! HTTP client for the external visitor-identity collaborator.
//!
//! Implements [`VisitorIdentity`] over plain JSON POSTs. The submission
//! pipeline treats both calls as best-effort; any failure here is logged
//! by the caller and never fails the submission.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use formgate_core::identity::{IdentityError, VisitorIdentity};

/// HTTP request timeout for a single identity call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Visitor-identity collaborator reached over HTTP.
pub struct HttpVisitorIdentity {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVisitorIdentity {
    /// Create a client for the collaborator at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<(), IdentityError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| IdentityError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IdentityError(format!(
                "{url} returned HTTP {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl VisitorIdentity for HttpVisitorIdentity {
    async fn identify(
        &self,
        visitor_id: &str,
        contact: &Map<String, Value>,
    ) -> Result<(), IdentityError> {
        self.post(
            "/identify",
            &json!({
                "visitor_id": visitor_id,
                "contact": contact,
            }),
        )
        .await
    }

    async fn increment_form_count(&self, visitor_id: &str) -> Result<(), IdentityError> {
        self.post(
            "/increment-form-count",
            &json!({"visitor_id": visitor_id}),
        )
        .await
    }
}
