//! Interactive popup loop

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use popup_core::{FieldId, SchemaEditor, SubmitOutcome};
use std::process::ExitCode;

use crate::context::{AppContext, Controller};
use crate::render;

const ACTIONS: &[&str] = &[
    "Add field",
    "Rename field",
    "Remove field",
    "Edit extraction prompt",
    "Edit webhook URL",
    "Extract data",
    "Exit",
];

pub async fn run(ctx: &AppContext) -> Result<ExitCode> {
    let controller = ctx.controller();
    let mut editor = SchemaEditor::new(controller.schema_listener());

    loop {
        render::print_popup(editor.fields(), &controller.snapshot(), &ctx.page_label());
        println!();

        let action = blocking(|| {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt("What would you like to do?")
                .items(ACTIONS)
                .default(0)
                .interact()
        })
        .await?;

        match action {
            0 => add_field(ctx, &mut editor).await?,
            1 => rename_field(ctx, &mut editor).await?,
            2 => remove_field(ctx, &mut editor).await?,
            3 => edit_prompt(&controller).await?,
            4 => edit_webhook(&controller).await?,
            5 => extract(ctx, &controller).await,
            _ => break,
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn add_field(ctx: &AppContext, editor: &mut SchemaEditor) -> Result<()> {
    let name = text_input("New field name", String::new()).await?;
    editor.set_pending_name(name);
    if editor.add_pending().is_none() && !editor.pending_name().trim().is_empty() {
        ctx.print_warning(&format!(
            "A field named {:?} already exists",
            editor.pending_name().trim()
        ));
    }
    Ok(())
}

async fn rename_field(ctx: &AppContext, editor: &mut SchemaEditor) -> Result<()> {
    let Some((id, current)) = pick_field(ctx, editor, "Rename which field?").await? else {
        return Ok(());
    };
    let name = text_input("Field name", current).await?;
    if !editor.rename_field(id, &name) {
        ctx.print_warning("Field names must be non-empty and unique");
    }
    Ok(())
}

async fn remove_field(ctx: &AppContext, editor: &mut SchemaEditor) -> Result<()> {
    if let Some((id, _)) = pick_field(ctx, editor, "Remove which field?").await? {
        editor.remove_field(id);
    }
    Ok(())
}

async fn pick_field(
    ctx: &AppContext,
    editor: &SchemaEditor,
    prompt: &'static str,
) -> Result<Option<(FieldId, String)>> {
    if editor.is_empty() {
        ctx.print_warning("No fields defined. Add a field to get started.");
        return Ok(None);
    }

    let names: Vec<String> = editor.fields().iter().map(|f| f.name().to_string()).collect();
    let choices = names.clone();
    let index = blocking(move || {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&choices[..])
            .default(0)
            .interact_opt()
    })
    .await?;

    Ok(index.map(|i| (editor.fields()[i].id(), names[i].clone())))
}

async fn edit_prompt(controller: &Controller) -> Result<()> {
    let current = controller.snapshot().prompt;
    let prompt = text_input("Describe what data to extract", current).await?;
    controller.set_prompt(prompt);
    Ok(())
}

async fn edit_webhook(controller: &Controller) -> Result<()> {
    let current = controller.snapshot().webhook_url;
    let url = text_input("Webhook URL", current).await?;
    controller.set_webhook_url(url);
    Ok(())
}

async fn extract(ctx: &AppContext, controller: &Controller) {
    ctx.print_header("Extracting...");
    if let SubmitOutcome::Started(response) = controller.submit().await {
        tracing::info!(job_id = %response.job_id, "Job submitted from popup");
    }
}

async fn text_input(prompt: &'static str, initial: String) -> Result<String> {
    blocking(move || {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
    })
    .await
}

/// Run a terminal prompt off the async workers so status timers keep ticking.
async fn blocking<T, F>(prompt: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(prompt)
        .await
        .context("Prompt task panicked")?
        .context("Failed to read from terminal")
}
