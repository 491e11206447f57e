//! Active-tab lookup.
//!
//! In a browser this is the extension tabs API; elsewhere it is whatever the
//! host knows about "the page the user is looking at".

use async_trait::async_trait;
use thiserror::Error;

/// Why the active tab URL could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabError {
    /// The runtime answered, but there is no foreground tab with a URL
    #[error("No active tab found")]
    NoActiveTab,

    /// The runtime reported an error of its own
    #[error("{0}")]
    Runtime(String),

    /// No tab runtime is present at all
    #[error("Tab runtime is not available")]
    RuntimeUnavailable,
}

/// Resolves the URL of the user's current foreground tab.
#[async_trait]
pub trait ActiveTabResolver: Send + Sync {
    async fn active_tab_url(&self) -> Result<String, TabError>;
}
