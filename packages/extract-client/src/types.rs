use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name → type tag, in field order.
pub type SchemaMapping = IndexMap<String, FieldType>;

/// The type tag attached to every schema field. Only `string` exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
}

/// Body of `POST /api/extract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    pub page_url: String,
    pub webhook_url: String,
    pub schema: SchemaMapping,
    pub prompt: String,
}

/// Successful response from `POST /api/extract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub job_id: String,
}

/// Body of a 400 response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Webhook callback keyed by a `success` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomePayload {
    pub job_id: String,
    pub success: bool,
    pub source_url: String,
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Webhook callback keyed by a `status` string, with processing metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub job_id: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub metadata: JobMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMetadata {
    pub page_url: String,
    pub extracted_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

/// A webhook callback in either of the shapes the backend has shipped.
///
/// Neither shape is treated as canonical; use the accessors to read the
/// fields both of them carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WebhookPayload {
    Outcome(OutcomePayload),
    Status(StatusPayload),
}

impl WebhookPayload {
    pub fn job_id(&self) -> &str {
        match self {
            WebhookPayload::Outcome(p) => &p.job_id,
            WebhookPayload::Status(p) => &p.job_id,
        }
    }

    pub fn succeeded(&self) -> bool {
        match self {
            WebhookPayload::Outcome(p) => p.success,
            WebhookPayload::Status(p) => p.status == JobStatus::Completed,
        }
    }

    /// The page the job extracted from.
    pub fn source_url(&self) -> &str {
        match self {
            WebhookPayload::Outcome(p) => &p.source_url,
            WebhookPayload::Status(p) => &p.metadata.page_url,
        }
    }

    pub fn data(&self) -> Option<&Map<String, Value>> {
        match self {
            WebhookPayload::Outcome(p) => p.data.as_ref(),
            WebhookPayload::Status(p) => p.data.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WebhookPayload::Outcome(p) => p.error.as_deref(),
            WebhookPayload::Status(p) => p.error.as_deref(),
        }
    }
}
