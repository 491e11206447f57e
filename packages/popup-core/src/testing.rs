//! Mock collaborators for testing front-ends and the submission flow without
//! a browser or a backend.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use extract_client::{ClientError, ExtractRequest, ExtractResponse};
use tokio::sync::Notify;

use crate::traits::{ActiveTabResolver, ExtractBackend, TabError};

/// A backend returning a canned result and recording every request.
#[derive(Clone)]
pub struct MockBackend {
    result: Result<ExtractResponse, ClientError>,
    requests: Arc<RwLock<Vec<ExtractRequest>>>,
    gate: Option<Arc<Notify>>,
}

impl MockBackend {
    /// Accept every job with the given id.
    pub fn accepting(job_id: impl Into<String>) -> Self {
        Self::with_result(Ok(ExtractResponse {
            job_id: job_id.into(),
        }))
    }

    /// Fail every job with the given error.
    pub fn failing(error: ClientError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<ExtractResponse, ClientError>) -> Self {
        Self {
            result,
            requests: Arc::new(RwLock::new(Vec::new())),
            gate: None,
        }
    }

    /// Hold every call until [`MockBackend::release`] is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Let one held call complete.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn requests(&self) -> Vec<ExtractRequest> {
        self.requests.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

#[async_trait]
impl ExtractBackend for MockBackend {
    async fn extract(&self, request: &ExtractRequest) -> Result<ExtractResponse, ClientError> {
        self.requests.write().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.clone()
    }
}

/// A tab resolver returning a canned result and counting calls.
#[derive(Clone)]
pub struct MockTabResolver {
    result: Result<String, TabError>,
    calls: Arc<RwLock<usize>>,
}

impl MockTabResolver {
    pub fn at(url: impl Into<String>) -> Self {
        Self {
            result: Ok(url.into()),
            calls: Arc::new(RwLock::new(0)),
        }
    }

    pub fn failing(error: TabError) -> Self {
        Self {
            result: Err(error),
            calls: Arc::new(RwLock::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.read().unwrap()
    }
}

#[async_trait]
impl ActiveTabResolver for MockTabResolver {
    async fn active_tab_url(&self) -> Result<String, TabError> {
        *self.calls.write().unwrap() += 1;
        self.result.clone()
    }
}
