//! Submission controller: form state, validation and the submit flow.
//!
//! The flow is linear: validate → mark loading → resolve the active tab →
//! send the request → settle the status message. It suspends only at the tab
//! lookup and the backend call, and cannot be cancelled once started.
//!
//! The controller is a handle over shared state; clones see the same form.
//! Concurrent `submit` calls do not corrupt state, but their relative order
//! (and therefore which message wins) is not defined. Front-ends disable
//! their submit trigger while [`SubmissionController::is_loading`] is true.

use std::fmt;
use std::sync::{Arc, Mutex};

use extract_client::{ExtractRequest, ExtractResponse, SchemaMapping};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::SubmitError;
use crate::lock;
use crate::status::{MessageKind, StatusLine, StatusMessage};
use crate::traits::{ActiveTabResolver, ExtractBackend};
use crate::validation::{validate_form, ValidationError};

/// Shown while a job is being submitted.
pub const PROCESSING_MESSAGE: &str = "Processing...";

#[derive(Debug, Default)]
struct Form {
    schema: SchemaMapping,
    prompt: String,
    webhook_url: String,
    is_loading: bool,
}

/// Everything a front-end needs to render the popup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupState {
    pub schema: SchemaMapping,
    pub prompt: String,
    pub webhook_url: String,
    pub is_loading: bool,
    pub message: String,
    pub message_kind: Option<MessageKind>,
}

/// How a call to [`SubmissionController::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was rejected locally; nothing was sent.
    Invalid(ValidationError),
    /// The backend accepted the job.
    Started(ExtractResponse),
    /// Tab lookup or the backend call failed.
    Failed(SubmitError),
}

impl SubmitOutcome {
    pub fn job_id(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Started(response) => Some(&response.job_id),
            _ => None,
        }
    }
}

pub struct SubmissionController<B, T> {
    form: Arc<Mutex<Form>>,
    status: StatusLine,
    backend: Arc<B>,
    tabs: Arc<T>,
}

impl<B, T> Clone for SubmissionController<B, T> {
    fn clone(&self) -> Self {
        Self {
            form: Arc::clone(&self.form),
            status: self.status.clone(),
            backend: Arc::clone(&self.backend),
            tabs: Arc::clone(&self.tabs),
        }
    }
}

impl<B, T> SubmissionController<B, T>
where
    B: ExtractBackend,
    T: ActiveTabResolver,
{
    pub fn new(backend: B, tabs: T) -> Self {
        Self::with_status(backend, tabs, StatusLine::new())
    }

    /// Use a specific status line (custom TTL, or one shared with the view).
    pub fn with_status(backend: B, tabs: T, status: StatusLine) -> Self {
        Self {
            form: Arc::new(Mutex::new(Form::default())),
            status,
            backend: Arc::new(backend),
            tabs: Arc::new(tabs),
        }
    }

    /// Replace the schema verbatim.
    pub fn set_schema(&self, schema: SchemaMapping) {
        lock(&self.form).schema = schema;
    }

    /// Listener for [`SchemaEditor`](crate::SchemaEditor) that forwards
    /// every emitted mapping into this controller.
    pub fn schema_listener(&self) -> impl FnMut(&SchemaMapping) + Send + 'static {
        let form = Arc::clone(&self.form);
        move |mapping: &SchemaMapping| {
            lock(&form).schema = mapping.clone();
        }
    }

    pub fn set_prompt(&self, text: impl Into<String>) {
        lock(&self.form).prompt = text.into();
    }

    pub fn set_webhook_url(&self, text: impl Into<String>) {
        lock(&self.form).webhook_url = text.into();
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.form).is_loading
    }

    pub fn status(&self) -> StatusMessage {
        self.status.current()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let form = lock(&self.form);
        validate_form(&form.schema, &form.prompt, &form.webhook_url)
    }

    pub fn snapshot(&self) -> PopupState {
        let status = self.status.current();
        let form = lock(&self.form);
        PopupState {
            schema: form.schema.clone(),
            prompt: form.prompt.clone(),
            webhook_url: form.webhook_url.clone(),
            is_loading: form.is_loading,
            message: status.text,
            message_kind: status.kind,
        }
    }

    /// Validate the form and submit an extraction job for the active tab.
    ///
    /// Must be called from within a tokio runtime. Every message set here
    /// except [`PROCESSING_MESSAGE`] clears itself after the status TTL.
    pub async fn submit(&self) -> SubmitOutcome {
        let (schema, prompt, webhook_url) = {
            let form = lock(&self.form);
            let checked = validate_form(&form.schema, &form.prompt, &form.webhook_url);
            if let Err(invalid) = checked {
                drop(form);
                debug!(reason = %invalid, "Form rejected");
                self.status.flash(invalid.to_string(), Some(MessageKind::Error));
                return SubmitOutcome::Invalid(invalid);
            }
            (form.schema.clone(), form.prompt.clone(), form.webhook_url.clone())
        };

        lock(&self.form).is_loading = true;
        self.status.hold(PROCESSING_MESSAGE, None);

        let outcome = match self.dispatch(schema, prompt, webhook_url).await {
            Ok(response) => {
                info!(job_id = %response.job_id, "Extraction started");
                self.status.flash(
                    format!("Extraction started! Job ID: {}", response.job_id),
                    Some(MessageKind::Success),
                );
                SubmitOutcome::Started(response)
            }
            Err(err) => {
                warn!(error = %err, "Extraction submission failed");
                self.status
                    .flash(format!("Error: {err}"), Some(MessageKind::Error));
                SubmitOutcome::Failed(err)
            }
        };

        lock(&self.form).is_loading = false;
        outcome
    }

    async fn dispatch(
        &self,
        schema: SchemaMapping,
        prompt: String,
        webhook_url: String,
    ) -> Result<ExtractResponse, SubmitError> {
        let page_url = self.tabs.active_tab_url().await?;

        let request = ExtractRequest {
            page_url,
            webhook_url,
            schema,
            prompt,
        };
        debug!(
            page_url = %request.page_url,
            fields = request.schema.len(),
            "Sending extraction request"
        );

        Ok(self.backend.extract(&request).await?)
    }
}

impl<B, T> fmt::Debug for SubmissionController<B, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionController")
            .field("form", &*lock(&self.form))
            .field("status", &self.status.current())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema_editor::SchemaEditor;
    use crate::testing::{MockBackend, MockTabResolver};
    use crate::traits::TabError;
    use extract_client::{ClientError, FieldType};
    use std::time::Duration;

    type Controller = SubmissionController<MockBackend, MockTabResolver>;

    fn controller(backend: &MockBackend, tabs: &MockTabResolver) -> Controller {
        SubmissionController::new(backend.clone(), tabs.clone())
    }

    fn title_schema() -> SchemaMapping {
        let mut schema = SchemaMapping::new();
        schema.insert("title".into(), FieldType::String);
        schema
    }

    fn fill(controller: &Controller) {
        controller.set_schema(title_schema());
        controller.set_prompt("Extract title");
        controller.set_webhook_url("https://hook.example/x");
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_successful_submit() {
        let backend = MockBackend::accepting("abc123");
        let tabs = MockTabResolver::at("https://page.example");
        let controller = controller(&backend, &tabs);
        fill(&controller);

        let outcome = controller.submit().await;

        assert_eq!(outcome.job_id(), Some("abc123"));
        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0],
            ExtractRequest {
                page_url: "https://page.example".into(),
                webhook_url: "https://hook.example/x".into(),
                schema: title_schema(),
                prompt: "Extract title".into(),
            }
        );

        let state = controller.snapshot();
        assert_eq!(state.message, "Extraction started! Job ID: abc123");
        assert_eq!(state.message_kind, Some(MessageKind::Success));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_calls() {
        let backend = MockBackend::accepting("abc123");
        let tabs = MockTabResolver::at("https://page.example");
        let controller = controller(&backend, &tabs);
        controller.set_prompt("Extract title");

        let outcome = controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::EmptySchema));
        assert_eq!(tabs.call_count(), 0);
        assert_eq!(backend.call_count(), 0);
        let state = controller.snapshot();
        assert_eq!(state.message, "Please add at least one field to your schema");
        assert_eq!(state.message_kind, Some(MessageKind::Error));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_validate_priority() {
        let backend = MockBackend::accepting("x");
        let tabs = MockTabResolver::at("https://page.example");
        let controller = controller(&backend, &tabs);

        assert_eq!(controller.validate(), Err(ValidationError::EmptySchema));
        controller.set_schema(title_schema());
        assert_eq!(controller.validate(), Err(ValidationError::MissingPrompt));
        controller.set_prompt("Extract title");
        assert_eq!(controller.validate(), Err(ValidationError::MissingWebhookUrl));
        controller.set_webhook_url("ftp://example.com");
        assert_eq!(controller.validate(), Err(ValidationError::InvalidWebhookUrl));
        controller.set_webhook_url("http://example.com");
        assert_eq!(controller.validate(), Ok(()));
    }

    #[tokio::test]
    async fn test_backend_failure_sets_error_message() {
        let backend = MockBackend::failing(ClientError::Http { status: 500 });
        let tabs = MockTabResolver::at("https://page.example");
        let controller = controller(&backend, &tabs);
        fill(&controller);

        let outcome = controller.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Failed(SubmitError::Backend(_))));
        let state = controller.snapshot();
        assert_eq!(state.message, "Error: HTTP error! status: 500");
        assert_eq!(state.message_kind, Some(MessageKind::Error));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_bad_request_reason_is_surfaced() {
        let backend =
            MockBackend::failing(ClientError::BadRequest("Invalid pageUrl format".into()));
        let tabs = MockTabResolver::at("chrome://extensions");
        let controller = controller(&backend, &tabs);
        fill(&controller);

        controller.submit().await;

        assert_eq!(controller.status().text, "Error: Invalid pageUrl format");
    }

    #[tokio::test]
    async fn test_tab_failure_skips_backend() {
        let backend = MockBackend::accepting("abc123");
        let tabs = MockTabResolver::failing(TabError::NoActiveTab);
        let controller = controller(&backend, &tabs);
        fill(&controller);

        let outcome = controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed(SubmitError::Tab(TabError::NoActiveTab)));
        assert_eq!(backend.call_count(), 0);
        assert_eq!(controller.status().text, "Error: No active tab found");
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_inputs_are_sent_untrimmed() {
        let backend = MockBackend::accepting("abc123");
        let tabs = MockTabResolver::at("https://page.example");
        let controller = controller(&backend, &tabs);
        controller.set_schema(title_schema());
        controller.set_prompt("  Extract title\n");
        controller.set_webhook_url("https://hook.example/x");

        controller.submit().await;

        assert_eq!(backend.requests()[0].prompt, "  Extract title\n");
    }

    #[tokio::test]
    async fn test_loading_while_in_flight() {
        let backend = MockBackend::accepting("abc123").gated();
        let tabs = MockTabResolver::at("https://page.example");
        let controller = controller(&backend, &tabs);
        fill(&controller);

        let running = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit().await }
        });
        while backend.call_count() == 0 {
            tokio::task::yield_now().await;
        }

        let state = controller.snapshot();
        assert!(state.is_loading);
        assert_eq!(state.message, PROCESSING_MESSAGE);
        assert_eq!(state.message_kind, None);

        backend.release();
        let outcome = running.await.unwrap();
        assert_eq!(outcome.job_id(), Some("abc123"));
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_editor_feeds_controller() {
        let backend = MockBackend::accepting("abc123");
        let tabs = MockTabResolver::at("https://page.example");
        let controller = controller(&backend, &tabs);
        let mut editor = SchemaEditor::new(controller.schema_listener());

        editor.add_field("title");
        let price = editor.add_field("price").unwrap();
        editor.remove_field(price);

        assert_eq!(controller.snapshot().schema, title_schema());
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_auto_clear() {
        let backend = MockBackend::accepting("abc123");
        let tabs = MockTabResolver::at("https://page.example");
        let controller = controller(&backend, &tabs);
        fill(&controller);

        controller.submit().await;
        assert!(!controller.status().is_empty());

        tokio::time::sleep(Duration::from_millis(5000)).await;
        settle().await;
        assert_eq!(controller.status(), StatusMessage::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_timer_cannot_clear_later_result() {
        let backend = MockBackend::accepting("abc123");
        let tabs = MockTabResolver::at("https://page.example");
        let controller = controller(&backend, &tabs);

        controller.submit().await;
        assert_eq!(controller.status().text, "Please add at least one field to your schema");

        tokio::time::sleep(Duration::from_millis(4000)).await;
        fill(&controller);
        controller.submit().await;

        // Past the first message's deadline, short of the second's.
        tokio::time::sleep(Duration::from_millis(2000)).await;
        settle().await;
        assert_eq!(controller.status().text, "Extraction started! Job ID: abc123");

        tokio::time::sleep(Duration::from_millis(3000)).await;
        settle().await;
        assert!(controller.status().is_empty());
    }
}
