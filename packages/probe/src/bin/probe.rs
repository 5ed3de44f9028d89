//! Trip probe CLI
//!
//! `run` reads newline-delimited JSON chat messages and pushes each one
//! through the pipeline, one at a time. `routes` prints the routing table.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mishwari_client::MishwariClient;
use openai_client::OpenAIClient;
use probe_core::config::{routing_from_env, Config};
use probe_core::domains::inbound::InboundMessage;
use probe_core::kernel::{LlmExtractionService, MishwariAdapter, ProbeKernel};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "probe")]
#[command(about = "Turns chat-group trip posts into backend trip records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process JSONL messages from a file or stdin
    Run {
        /// Read from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Print the loaded group routing table
    Routes,
}

#[derive(Serialize)]
struct LineReport<'a> {
    line: usize,
    chat_id: &'a str,
    outcome: &'static str,
    detail: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stdout carries the line reports)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,probe_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { input } => run(input).await,
        Commands::Routes => {
            print_routes();
            Ok(())
        }
    }
}

async fn run(input: Option<PathBuf>) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(model = %config.llm_model, backend = %config.mishwari_api_url, "Configuration loaded");

    let llm = OpenAIClient::new(&config.llm_api_key).with_base_url(&config.llm_base_url);
    let extractor = LlmExtractionService::new(Arc::new(llm), &config.llm_model);

    let mut mishwari = MishwariClient::new(&config.mishwari_api_url);
    if let Some(key) = &config.mishwari_api_key {
        mishwari = mishwari.with_api_key(key);
    }
    let backend = MishwariAdapter::new(Arc::new(mishwari));

    let kernel = ProbeKernel::new(Arc::new(extractor), Arc::new(backend), config.trip_rules());

    match input {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            process_lines(BufReader::new(file), &kernel, &config).await
        }
        None => process_lines(BufReader::new(tokio::io::stdin()), &kernel, &config).await,
    }
}

/// One message at a time; a bad line is reported and skipped.
async fn process_lines<R>(reader: R, kernel: &ProbeKernel, config: &Config) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let message: InboundMessage = match serde_json::from_str(&line) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "Skipping malformed input line");
                continue;
            }
        };

        let outcome = kernel.handle_inbound(&message, &config.routing).await;
        let report = LineReport {
            line: line_no,
            chat_id: &message.chat_id,
            outcome: outcome.as_str(),
            detail: format!("{:?}", outcome),
        };
        println!("{}", serde_json::to_string(&report)?);
    }

    tracing::info!(lines = line_no, "Input exhausted");
    Ok(())
}

fn print_routes() {
    let routing = routing_from_env();
    if routing.is_empty() {
        println!("No specific routes; every group uses the general operator.");
        return;
    }

    for (group, route) in routing.routes() {
        println!(
            "{}\t{}\t{}\t{}",
            group,
            route.describe(),
            route.operator_id,
            route.default_from_city.as_deref().unwrap_or("-")
        );
    }
}
