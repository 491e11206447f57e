//! Data Slick extraction API client.
//!
//! Wire types for the extraction job contract and a minimal client for
//! `POST /api/extract`. Jobs are processed asynchronously by the backend;
//! results arrive later at the caller's webhook (see [`WebhookPayload`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use extract_client::{ExtractClient, ExtractRequest, FieldType, SchemaMapping};
//!
//! let client = ExtractClient::from_env()?;
//!
//! let mut schema = SchemaMapping::new();
//! schema.insert("title".into(), FieldType::String);
//!
//! let response = client
//!     .extract(&ExtractRequest {
//!         page_url: "https://page.example".into(),
//!         webhook_url: "https://hook.example/x".into(),
//!         schema,
//!         prompt: "Extract title".into(),
//!     })
//!     .await?;
//! println!("job {}", response.job_id);
//! ```

pub mod config;
pub mod error;
pub mod types;

pub use config::{ClientConfig, Environment};
pub use error::{ClientError, Result, INVALID_REQUEST_FALLBACK};
pub use types::*;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

/// Check that `input` is an absolute `http` or `https` URL.
///
/// Unparseable input, relative references, the empty string and every other
/// scheme are rejected.
pub fn validate_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Client for the extraction job API.
#[derive(Clone)]
pub struct ExtractClient {
    http_client: Client,
    config: ClientConfig,
}

impl ExtractClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    /// Create from `EXTRACTOR_API_URL` / `EXTRACTOR_ENV`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    /// Use a preconfigured reqwest client (timeouts, proxies).
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Submit an extraction job. Returns as soon as the backend accepts it.
    pub async fn extract(&self, request: &ExtractRequest) -> Result<ExtractResponse> {
        let endpoint = self.config.extract_endpoint();
        debug!(
            endpoint = %endpoint,
            page_url = %request.page_url,
            fields = request.schema.len(),
            "Submitting extraction job"
        );

        let response = self
            .http_client
            .post(&endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Extraction request failed");
                ClientError::Network(e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let reason = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .filter(|reason| !reason.is_empty())
                .unwrap_or_else(|| INVALID_REQUEST_FALLBACK.to_string());
            warn!(reason = %reason, "Extraction request rejected");
            return Err(ClientError::BadRequest(reason));
        }
        if !status.is_success() {
            warn!(status = %status, "Extraction API error");
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }

        let job: ExtractResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        debug!(job_id = %job.job_id, "Extraction job accepted");
        Ok(job)
    }
}
