//! Form validation rules, checked in fixed priority order.

use extract_client::{validate_url, SchemaMapping};
use thiserror::Error;

/// The first rule the form breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please add at least one field to your schema")]
    EmptySchema,

    #[error("Please enter an extraction prompt")]
    MissingPrompt,

    #[error("Please enter a webhook URL")]
    MissingWebhookUrl,

    #[error("Please enter a valid webhook URL")]
    InvalidWebhookUrl,
}

/// Check the form. Pure; the first failing rule wins.
pub fn validate_form(
    schema: &SchemaMapping,
    prompt: &str,
    webhook_url: &str,
) -> Result<(), ValidationError> {
    if schema.is_empty() {
        return Err(ValidationError::EmptySchema);
    }
    if prompt.trim().is_empty() {
        return Err(ValidationError::MissingPrompt);
    }
    if webhook_url.trim().is_empty() {
        return Err(ValidationError::MissingWebhookUrl);
    }
    if !validate_url(webhook_url) {
        return Err(ValidationError::InvalidWebhookUrl);
    }
    Ok(())
}
