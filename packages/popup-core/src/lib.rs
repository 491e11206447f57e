//! Popup core for Data Slick.
//!
//! Two plain stateful objects, independent of any rendering framework:
//!
//! - [`SchemaEditor`] keeps an ordered list of uniquely named fields and hands
//!   the derived [`SchemaMapping`] to a listener after every mutation.
//! - [`SubmissionController`] owns the prompt, webhook URL, schema and status
//!   message, validates the form and submits an extraction job.
//!
//! Data flows one way: editor → mapping → controller → backend.
//!
//! # Usage
//!
//! ```rust,ignore
//! use popup_core::{SchemaEditor, SubmissionController, StaticTab};
//! use extract_client::ExtractClient;
//!
//! let controller = SubmissionController::new(
//!     ExtractClient::from_env()?,
//!     StaticTab::new("https://page.example"),
//! );
//! let mut editor = SchemaEditor::new(controller.schema_listener());
//!
//! editor.add_field("title");
//! controller.set_prompt("Extract the article title");
//! controller.set_webhook_url("https://hook.example/x");
//!
//! let outcome = controller.submit().await;
//! println!("{}", controller.snapshot().message);
//! ```
//!
//! # Modules
//!
//! - [`schema_editor`] - Field list editing and mapping emission
//! - [`controller`] - Form state, validation and the submit flow
//! - [`status`] - Transient status message with auto-clear
//! - [`traits`] - Backend and active-tab collaborators
//! - [`resolvers`] - Active-tab resolver implementations
//! - [`testing`] - Mock collaborators for tests

pub mod controller;
pub mod error;
pub mod resolvers;
pub mod schema_editor;
pub mod status;
pub mod testing;
pub mod traits;
pub mod validation;

pub use controller::{PopupState, SubmissionController, SubmitOutcome, PROCESSING_MESSAGE};
pub use error::SubmitError;
pub use extract_client::{ExtractRequest, ExtractResponse, FieldType, SchemaMapping};
pub use resolvers::{StaticTab, WithFallback};
pub use schema_editor::{Field, FieldId, SchemaEditor};
pub use status::{MessageKind, StatusLine, StatusMessage, MESSAGE_TTL};
pub use traits::{ActiveTabResolver, ExtractBackend, TabError};
pub use validation::ValidationError;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock shared popup state. A panic while holding the lock leaves plain data
/// behind, so a poisoned guard is still usable.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
