//! Data Slick popup for the terminal.
//!
//! Without a subcommand this runs the interactive popup: define schema
//! fields, write a prompt, set a webhook and submit an extraction job for the
//! configured page.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;
mod context;
mod render;
mod tab;

use context::AppContext;

#[derive(Parser)]
#[command(name = "slick")]
#[command(about = "Define a schema and start a web page extraction job")]
#[command(version)]
struct Cli {
    /// Extraction API base URL (defaults per EXTRACTOR_ENV)
    #[arg(long, global = true, env = "EXTRACTOR_API_URL")]
    api_url: Option<String>,

    /// URL of the page to extract from
    #[arg(long, global = true, env = "EXTRACTOR_PAGE_URL")]
    page_url: Option<String>,

    /// Use the working directory as the page when no page URL is configured
    #[arg(long, global = true)]
    dev_fallback: bool,

    /// Log request details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one extraction job without prompting
    Submit {
        /// Schema field name (repeatable)
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,

        /// What to extract, in plain language
        #[arg(short, long)]
        prompt: String,

        /// Where the backend should deliver results
        #[arg(short, long, env = "EXTRACTOR_WEBHOOK_URL")]
        webhook: String,

        /// Print the final popup state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a captured webhook callback body
    InspectWebhook {
        /// JSON file, or `-` for stdin
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,popup_core=debug,extract_client=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let Cli {
        api_url,
        page_url,
        dev_fallback,
        command,
        ..
    } = cli;

    match command {
        Some(Commands::InspectWebhook { path }) => cmd::inspect::run(&path),
        Some(Commands::Submit {
            fields,
            prompt,
            webhook,
            json,
        }) => {
            let ctx = AppContext::new(api_url, page_url, dev_fallback)?;
            cmd::submit::run(&ctx, fields, prompt, webhook, json).await
        }
        None => {
            let ctx = AppContext::new(api_url, page_url, dev_fallback)?;
            cmd::interactive::run(&ctx).await
        }
    }
}
