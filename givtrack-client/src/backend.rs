//! Backend HTTP client
//!
//! Anonymous read-only access to the contribution API. Two endpoints:
//! - `GET <base>/blogs?qrCode=<code>` returns a `{"data": [...]}` envelope
//! - `GET <base>/blogs` returns a bare array of records (the browse list)
//!
//! Non-2xx responses carry a `{"message": "..."}` body which becomes the
//! user-visible error text.

use givtrack_common::models::{ContributionRecord, ErrorBody, RecordEnvelope};
use givtrack_common::{Error, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("givtrack/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the contribution backend
#[derive(Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client with a bounded per-request timeout
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Backend(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up records by QR code
    ///
    /// Returns the raw (possibly empty, possibly multi-element) result list;
    /// classification is the resolver's job.
    pub async fn fetch_by_code(&self, code: &str) -> Result<Vec<ContributionRecord>> {
        let url = format!("{}/blogs", self.base_url);
        tracing::debug!(code = %code, url = %url, "Querying backend by QR code");

        let response = self
            .http_client
            .get(&url)
            .query(&[("qrCode", code)])
            .send()
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Backend(error_message(response).await));
        }

        let envelope: RecordEnvelope = response
            .json()
            .await
            .map_err(|e| Error::Backend(format!("malformed response: {}", e)))?;

        tracing::debug!(code = %code, matches = envelope.data.len(), "Backend lookup complete");
        Ok(envelope.data)
    }

    /// Fetch the full browsable record list
    pub async fn fetch_all(&self) -> Result<Vec<ContributionRecord>> {
        let url = format!("{}/blogs", self.base_url);
        tracing::debug!(url = %url, "Fetching full record list");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Backend(error_message(response).await));
        }

        let records: Vec<ContributionRecord> = response
            .json()
            .await
            .map_err(|e| Error::Backend(format!("malformed response: {}", e)))?;

        tracing::info!(count = records.len(), "Retrieved record list from backend");
        Ok(records)
    }
}

/// Extract the human-readable message from an error body, falling back to the
/// status line when the body is absent or malformed
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    }
}
