//! Terminal rendering of popup state.

use colored::Colorize;
use popup_core::{Field, MessageKind, PopupState, StatusMessage};

pub fn status_line(status: &StatusMessage) -> Option<String> {
    if status.is_empty() {
        return None;
    }
    let line = match status.kind {
        Some(MessageKind::Error) => status.text.red().to_string(),
        Some(MessageKind::Success) => status.text.green().to_string(),
        None => status.text.blue().to_string(),
    };
    Some(line)
}

pub fn print_status(status: &StatusMessage) {
    if let Some(line) = status_line(status) {
        println!("{}", line);
    }
}

pub fn print_popup(fields: &[Field], state: &PopupState, page: &str) {
    println!();
    println!("{}", "Visual Data Extractor".bold());
    println!("{} {}", "Page:".dimmed(), page);

    let status = StatusMessage {
        text: state.message.clone(),
        kind: state.message_kind,
    };
    if let Some(line) = status_line(&status) {
        println!();
        println!("  {}", line);
    }

    println!();
    println!("{}", "Data Schema".bold());
    if fields.is_empty() {
        println!(
            "  {}",
            "No fields defined. Add a field to get started.".italic().dimmed()
        );
    }
    for field in fields {
        println!("  • {}", field.name().cyan());
    }

    println!();
    println!("{}", "Extraction Prompt".bold());
    println!("  {}", placeholder(&state.prompt, "Describe what data to extract..."));

    println!();
    println!("{}", "Webhook URL".bold());
    println!("  {}", placeholder(&state.webhook_url, "https://your-webhook.com/endpoint"));
}

fn placeholder(value: &str, hint: &str) -> String {
    if value.is_empty() {
        hint.dimmed().to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_status_renders_nothing() {
        assert_eq!(status_line(&StatusMessage::default()), None);
    }

    #[test]
    fn test_status_keeps_text() {
        colored::control::set_override(false);
        let line = status_line(&StatusMessage {
            text: "Error: HTTP error! status: 500".into(),
            kind: Some(MessageKind::Error),
        });
        assert_eq!(line.as_deref(), Some("Error: HTTP error! status: 500"));
    }
}
