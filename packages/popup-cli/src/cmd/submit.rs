//! One-shot submission

use anyhow::{Context, Result};
use popup_core::{
    ActiveTabResolver, ExtractBackend, SchemaEditor, SubmissionController, SubmitOutcome,
};
use std::process::ExitCode;

use crate::context::AppContext;
use crate::render;

pub async fn run(
    ctx: &AppContext,
    fields: Vec<String>,
    prompt: String,
    webhook: String,
    json: bool,
) -> Result<ExitCode> {
    let controller = ctx.controller();
    let (outcome, skipped) = submit(&controller, &fields, prompt, webhook).await;

    for name in &skipped {
        ctx.print_warning(&format!("Skipping field {name:?}: empty or duplicate name"));
    }

    if json {
        let state = controller.snapshot();
        println!(
            "{}",
            serde_json::to_string_pretty(&state).context("Failed to encode popup state")?
        );
    } else {
        render::print_status(&controller.status());
    }

    Ok(ExitCode::from(exit_status(&outcome)))
}

/// Fill the form and submit it. Also returns the field names the editor
/// turned away.
async fn submit<B, T>(
    controller: &SubmissionController<B, T>,
    fields: &[String],
    prompt: String,
    webhook: String,
) -> (SubmitOutcome, Vec<String>)
where
    B: ExtractBackend,
    T: ActiveTabResolver,
{
    let mut editor = SchemaEditor::new(controller.schema_listener());
    let skipped = fields
        .iter()
        .filter(|name| editor.add_field(name).is_none())
        .cloned()
        .collect();

    controller.set_prompt(prompt);
    controller.set_webhook_url(webhook);

    (controller.submit().await, skipped)
}

/// 0 when the job started, 2 when the form was rejected, 1 when the
/// tab lookup or the backend failed.
fn exit_status(outcome: &SubmitOutcome) -> u8 {
    match outcome {
        SubmitOutcome::Started(_) => 0,
        SubmitOutcome::Invalid(_) => 2,
        SubmitOutcome::Failed(_) => 1,
    }
}
