//! Error types for the extraction API client.
//!
//! `Display` renders the bare failure reason, so callers can prefix it
//! (`"Error: {err}"`) without doubling up on wording.

use thiserror::Error;

/// Result type for extraction client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Fallback reason for a 400 response whose body carries no usable `error`.
pub const INVALID_REQUEST_FALLBACK: &str = "Invalid request data";

/// Extraction client errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The backend rejected the request (HTTP 400), with its own explanation
    #[error("{0}")]
    BadRequest(String),

    /// Any other non-2xx response
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// Transport failure (connection refused, DNS, TLS, timeout)
    #[error("{0}")]
    Network(String),

    /// A 2xx response whose body could not be decoded
    #[error("invalid response body: {0}")]
    Parse(String),

    /// Client configuration is unusable (bad base URL)
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status associated with this error, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::BadRequest(_) => Some(400),
            ClientError::Http { status } => Some(*status),
            _ => None,
        }
    }
}
