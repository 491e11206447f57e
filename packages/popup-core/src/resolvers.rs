//! Active-tab resolver implementations.

use async_trait::async_trait;
use tracing::debug;

use crate::traits::{ActiveTabResolver, TabError};

/// A tab whose URL is known up front, e.g. passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticTab {
    url: Option<String>,
}

impl StaticTab {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// A resolver that reports no active tab.
    pub fn none() -> Self {
        Self { url: None }
    }
}

#[async_trait]
impl ActiveTabResolver for StaticTab {
    async fn active_tab_url(&self) -> Result<String, TabError> {
        self.url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or(TabError::NoActiveTab)
    }
}

/// Development fallback: when the primary resolver has no runtime at all,
/// ask the fallback instead. Every other primary failure is reported as is.
#[derive(Debug, Clone)]
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> WithFallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> ActiveTabResolver for WithFallback<P, F>
where
    P: ActiveTabResolver,
    F: ActiveTabResolver,
{
    async fn active_tab_url(&self) -> Result<String, TabError> {
        match self.primary.active_tab_url().await {
            Err(TabError::RuntimeUnavailable) => {
                debug!("Tab runtime unavailable, using fallback location");
                self.fallback.active_tab_url().await
            }
            other => other,
        }
    }
}
