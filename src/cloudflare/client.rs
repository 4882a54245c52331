use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::types::CloudflareEnvelope;
use super::CloudflareError;

pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Thin bearer-token client over the Cloudflare v4 REST and GraphQL APIs.
pub struct CloudflareClient {
    http: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl CloudflareClient {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self::with_base_url(api_token, CF_API_BASE)
    }

    /// Point the client at a different API root, e.g. a local stub.
    pub fn with_base_url(api_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_token: api_token.into(),
            base_url: base_url.into(),
        }
    }

    /// GET a REST path and unwrap the `{success, result, errors}` envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CloudflareError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CloudflareError::Upstream { status: status.as_u16(), body });
        }

        let envelope: CloudflareEnvelope<T> = serde_json::from_str(&body)
            .map_err(|e| CloudflareError::Parse(e.to_string()))?;

        if !envelope.success {
            let detail = envelope
                .errors
                .map(|errors| serde_json::to_string(&errors).unwrap_or_default())
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(CloudflareError::Api(detail));
        }

        envelope
            .result
            .ok_or_else(|| CloudflareError::Parse("response missing result field".to_string()))
    }

    /// POST a GraphQL query and return the raw response body. Callers inspect
    /// the `errors` array themselves; only transport failures error here.
    pub async fn graphql(&self, query: &str) -> Result<Value, CloudflareError> {
        let url = format!("{}/graphql", self.base_url);
        tracing::debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CloudflareError::Upstream { status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map_err(|e| CloudflareError::Parse(e.to_string()))
    }
}
