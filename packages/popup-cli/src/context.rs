//! Application context shared by all commands

use anyhow::{Context, Result};
use console::style;
use extract_client::{ClientConfig, ExtractClient};
use popup_core::SubmissionController;

use crate::tab::{self, CliTabResolver};

pub type Controller = SubmissionController<ExtractClient, CliTabResolver>;

pub struct AppContext {
    client: ExtractClient,
    page_url: Option<String>,
    dev_fallback: bool,
}

impl AppContext {
    pub fn new(
        api_url: Option<String>,
        page_url: Option<String>,
        dev_fallback: bool,
    ) -> Result<Self> {
        let config = match api_url {
            Some(url) => ClientConfig::for_base_url(url),
            None => ClientConfig::from_env(),
        }
        .context("Failed to load API configuration")?;
        tracing::debug!(api = %config.base_url, "Configuration loaded");

        Ok(Self {
            client: ExtractClient::new(config),
            page_url,
            dev_fallback,
        })
    }

    /// A fresh popup controller wired to the configured API and page.
    pub fn controller(&self) -> Controller {
        SubmissionController::new(
            self.client.clone(),
            tab::resolver(self.page_url.clone(), self.dev_fallback),
        )
    }

    pub fn page_label(&self) -> String {
        match (&self.page_url, self.dev_fallback) {
            (Some(url), _) => url.clone(),
            (None, true) => "(working directory)".to_string(),
            (None, false) => "(none)".to_string(),
        }
    }

    pub fn print_header(&self, msg: &str) {
        println!();
        println!("{}", style(msg).bold());
    }

    pub fn print_warning(&self, msg: &str) {
        println!("{}", style(msg).yellow());
    }
}
