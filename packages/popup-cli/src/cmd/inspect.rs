//! Webhook payload inspection

use anyhow::{Context, Result};
use colored::Colorize;
use extract_client::WebhookPayload;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

pub fn run(path: &Path) -> Result<ExitCode> {
    let raw = read_input(path)?;
    let payload: WebhookPayload =
        serde_json::from_str(&raw).context("Not a recognized webhook payload")?;

    println!("{}", summarize(&payload)?);
    Ok(ExitCode::SUCCESS)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn summarize(payload: &WebhookPayload) -> Result<String> {
    let shape = match payload {
        WebhookPayload::Outcome(_) => "success/sourceUrl",
        WebhookPayload::Status(_) => "status/metadata",
    };
    let result = if payload.succeeded() {
        "succeeded".green()
    } else {
        "failed".red()
    };

    let mut lines = vec![
        format!("Job:    {}", payload.job_id().bold()),
        format!("Result: {}", result),
        format!("Source: {}", payload.source_url()),
        format!("Shape:  {}", shape.dimmed()),
    ];
    if let WebhookPayload::Status(status) = payload {
        lines.push(format!(
            "Timing: extracted {} in {} ms",
            status.metadata.extracted_at.to_rfc3339(),
            status.metadata.processing_time_ms
        ));
    }
    if let Some(error) = payload.error() {
        lines.push(format!("Error:  {}", error.red()));
    }
    match payload.data() {
        Some(data) => {
            let pretty = serde_json::to_string_pretty(data).context("Failed to render data")?;
            lines.push(format!("Data:\n{}", pretty));
        }
        None => lines.push("Data:   (none)".to_string()),
    }
    Ok(lines.join("\n"))
}
