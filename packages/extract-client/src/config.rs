//! Client configuration loaded from environment variables.

use std::env;

use crate::error::{ClientError, Result};

/// Base URL used when running against a local backend.
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:3000";

/// Base URL of the hosted backend.
pub const PRODUCTION_BASE_URL: &str = "https://your-production-url.vercel.app";

/// Overrides the base URL outright.
pub const API_URL_VAR: &str = "EXTRACTOR_API_URL";

/// Selects the default base URL (`development` or anything else).
pub const ENVIRONMENT_VAR: &str = "EXTRACTOR_ENV";

/// Deployment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Development => DEVELOPMENT_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }

    fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("development") {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

/// Settings for [`ExtractClient`](crate::ExtractClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            base_url: environment.base_url().to_string(),
        }
    }

    /// Load configuration from `EXTRACTOR_API_URL` / `EXTRACTOR_ENV`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(base_url) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            return Self::for_base_url(base_url);
        }

        let environment = lookup(ENVIRONMENT_VAR)
            .map(|name| Environment::from_name(&name))
            .unwrap_or_default();
        Ok(Self::for_environment(environment))
    }

    /// Use an explicit base URL. It must be an absolute http(s) URL.
    pub fn for_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim().to_string();
        if !crate::validate_url(&base_url) {
            return Err(ClientError::Config(format!(
                "{API_URL_VAR} must be an http(s) URL, got {base_url:?}"
            )));
        }
        Ok(Self { base_url })
    }

    /// The extraction endpoint for this base URL.
    pub fn extract_endpoint(&self) -> String {
        format!("{}/api/extract", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}
