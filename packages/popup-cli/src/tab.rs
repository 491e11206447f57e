//! Page URL resolution for the terminal popup.
//!
//! A terminal has no browser tab. The page comes from `--page-url` /
//! `EXTRACTOR_PAGE_URL`; without one the tab runtime counts as unavailable,
//! and `--dev-fallback` substitutes the working directory.

use std::env;

use async_trait::async_trait;
use popup_core::{ActiveTabResolver, TabError, WithFallback};
use url::Url;

pub type CliTabResolver = WithFallback<ConfiguredPage, WorkingDirectory>;

pub fn resolver(page_url: Option<String>, dev_fallback: bool) -> CliTabResolver {
    WithFallback::new(
        ConfiguredPage {
            url: page_url.filter(|url| !url.trim().is_empty()),
        },
        WorkingDirectory {
            enabled: dev_fallback,
        },
    )
}

/// The page URL given on the command line or in the environment.
pub struct ConfiguredPage {
    url: Option<String>,
}

#[async_trait]
impl ActiveTabResolver for ConfiguredPage {
    async fn active_tab_url(&self) -> Result<String, TabError> {
        self.url.clone().ok_or(TabError::RuntimeUnavailable)
    }
}

/// The terminal's own location, as a `file://` URL.
pub struct WorkingDirectory {
    enabled: bool,
}

#[async_trait]
impl ActiveTabResolver for WorkingDirectory {
    async fn active_tab_url(&self) -> Result<String, TabError> {
        if !self.enabled {
            return Err(TabError::RuntimeUnavailable);
        }
        let cwd = env::current_dir().map_err(|e| TabError::Runtime(e.to_string()))?;
        Url::from_directory_path(&cwd)
            .map(String::from)
            .map_err(|_| TabError::Runtime(format!("cannot express {} as a URL", cwd.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_configured_page_wins() {
        let tabs = resolver(Some("https://page.example".into()), true);
        assert_eq!(tabs.active_tab_url().await, Ok("https://page.example".to_string()));
    }

    #[tokio::test]
    async fn test_missing_page_without_fallback() {
        let tabs = resolver(Some("  ".into()), false);
        assert_eq!(tabs.active_tab_url().await, Err(TabError::RuntimeUnavailable));
    }

    #[tokio::test]
    async fn test_fallback_uses_working_directory() {
        let url = resolver(None, true).active_tab_url().await.unwrap();
        assert!(url.starts_with("file://"), "got {url}");
    }
}
