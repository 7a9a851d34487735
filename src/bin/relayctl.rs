//! CLI operations tool for mail-relay.
//!
//! Provides commands for pushing test jobs onto the send queue, watching
//! status events, and checking queue health without touching the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Queue a test email
//! cargo run --bin relayctl -- send --to someone@example.com \
//!     --subject "Hello" --text "See https://example.com"
//!
//! # Watch status events as jobs are dispatched
//! cargo run --bin relayctl -- watch
//!
//! # Check queue connection and depth
//! cargo run --bin relayctl -- queue check
//! cargo run --bin relayctl -- queue len
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` (default: `redis://localhost:6379`): Redis connection string
//! - `QUEUE_NAME` (default: `email_queue`): list the relay pops jobs from
//! - `STATUS_CHANNEL` (default: `email:send`): pub/sub channel for status events
//!
//! # Features
//!
//! - **Job Injection**: Push well-formed jobs without writing a producer
//! - **Status Tail**: Live view of success/failure events per job
//! - **Queue Tools**: Connection checks and queue depth
//! - **Interactive Prompts**: Confirmation dialogs before queueing
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use mail_relay::domain::status_event::StatusEvent;
use mail_relay::utils::link_id::generate_link_id;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use redis::Commands as _;
use serde_json::json;

/// CLI tool for operating mail-relay.
#[derive(Parser)]
#[command(name = "relayctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Push a test email job onto the send queue
    Send {
        /// Recipient address (repeat for multiple recipients)
        #[arg(short, long, required = true)]
        to: Vec<String>,

        /// Subject line
        #[arg(short, long)]
        subject: String,

        /// Plain-text body
        #[arg(long)]
        text: Option<String>,

        /// HTML body
        #[arg(long)]
        html: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Watch status events published by the relay
    Watch,

    /// Queue operations
    Queue {
        #[command(subcommand)]
        action: QueueAction,
    },
}

/// Queue diagnostic subcommands.
#[derive(Subcommand)]
enum QueueAction {
    /// Check Redis connection
    Check,

    /// Show the number of jobs waiting in the queue
    Len,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let queue_name = std::env::var("QUEUE_NAME").unwrap_or_else(|_| "email_queue".to_string());
    let status_channel =
        std::env::var("STATUS_CHANNEL").unwrap_or_else(|_| "email:send".to_string());

    let client = redis::Client::open(redis_url.as_str()).context("Invalid REDIS_URL")?;

    match cli.command {
        Commands::Send {
            to,
            subject,
            text,
            html,
            yes,
        } => send_job(&client, &queue_name, to, subject, text, html, yes)?,
        Commands::Watch => watch_events(&client, &status_channel)?,
        Commands::Queue { action } => handle_queue_action(action, &client, &queue_name)?,
    }

    Ok(())
}

/// Queues one email job with interactive confirmation.
///
/// # Flow
///
/// 1. Mint a job id
/// 2. Build the JSON payload (absent bodies are omitted, not null)
/// 3. Display job details
/// 4. Confirm (unless `--yes` flag)
/// 5. LPUSH onto the send queue
#[allow(clippy::too_many_arguments)]
fn send_job(
    client: &redis::Client,
    queue_name: &str,
    to: Vec<String>,
    subject: String,
    text: Option<String>,
    html: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "📤 Queue Email Job".bright_blue().bold());
    println!();

    if text.is_none() && html.is_none() {
        anyhow::bail!("Provide --text and/or --html; the relay rejects jobs without a body");
    }

    let job_id = generate_link_id();

    let mut job = serde_json::Map::new();
    job.insert("id".into(), json!(job_id));
    job.insert("to".into(), json!(to));
    job.insert("subject".into(), json!(subject));
    if let Some(ref text) = text {
        job.insert("text".into(), json!(text));
    }
    if let Some(ref html) = html {
        job.insert("html".into(), json!(html));
    }
    let payload = serde_json::Value::Object(job).to_string();

    // Show job details
    println!("{}", "Job details:".bright_white().bold());
    println!("  Id:      {}", job_id.bright_yellow());
    println!("  To:      {}", to.join(", ").cyan());
    println!("  Subject: {}", subject.cyan());
    if let Some(ref text) = text {
        println!("  Text:    {} chars", text.len().to_string().bright_black());
    }
    if let Some(ref html) = html {
        println!("  HTML:    {} chars", html.len().to_string().bright_black());
    }
    println!("  Queue:   {}", queue_name.bright_black());
    println!();

    // Confirm
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Queue this job?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let mut conn = client
        .get_connection()
        .context("Failed to connect to Redis")?;
    conn.lpush::<_, _, i64>(queue_name, &payload)
        .context("Failed to queue job")?;

    println!();
    println!("{}", "✅ Job queued!".green().bold());
    println!();
    println!("{}", "Follow the outcome with:".bright_white());
    println!(
        "  cargo run --bin relayctl -- watch   {}",
        format!("# look for jobId {}", job_id).bright_black()
    );
    println!();

    Ok(())
}

/// Tails the status channel, printing one line per event.
///
/// # Output Format
///
/// ```text
/// 👀 Watching status events on 'email:send' (Ctrl+C to stop)
///
///   ✅ hL5QmQ1rNf2k  success
///   ❌ 9v3XK_wq81Za  failure   SendGrid rejected the message (status 401)
/// ```
fn watch_events(client: &redis::Client, status_channel: &str) -> Result<()> {
    let mut conn = client
        .get_connection()
        .context("Failed to connect to Redis")?;
    let mut pubsub = conn.as_pubsub();
    pubsub
        .subscribe(status_channel)
        .with_context(|| format!("Failed to subscribe to '{}'", status_channel))?;

    println!(
        "{}",
        format!(
            "👀 Watching status events on '{}' (Ctrl+C to stop)",
            status_channel
        )
        .bright_blue()
        .bold()
    );
    println!();

    loop {
        let msg = pubsub.get_message()?;
        let payload: String = msg.get_payload()?;

        match serde_json::from_str::<StatusEvent>(&payload) {
            Ok(event) => {
                if event.outcome.is_success() {
                    println!("  ✅ {}  {}", event.job_id.cyan(), "success".green().bold());
                } else {
                    println!(
                        "  ❌ {}  {}   {}",
                        event.job_id.cyan(),
                        "failure".red().bold(),
                        event.error.unwrap_or_default()
                    );
                }
            }
            // Unknown publishers share the channel; show their payloads raw.
            Err(_) => println!("  {}", payload.bright_black()),
        }
    }
}

/// Handles queue diagnostic commands.
fn handle_queue_action(action: QueueAction, client: &redis::Client, queue_name: &str) -> Result<()> {
    let mut conn = client
        .get_connection()
        .context("Failed to connect to Redis")?;

    match action {
        QueueAction::Check => {
            println!("{}", "🔍 Checking Redis connection...".bright_blue());

            let pong: String = redis::cmd("PING").query(&mut conn)?;
            anyhow::ensure!(pong == "PONG", "Unexpected PING reply: {pong}");

            println!("{}", "✅ Redis connection OK".green().bold());
        }
        QueueAction::Len => {
            println!("{}", "📋 Queue Depth".bright_blue().bold());
            println!();

            let len: i64 = conn.llen(queue_name)?;

            println!(
                "  {} jobs waiting in '{}'",
                len.to_string().bright_green().bold(),
                queue_name.cyan()
            );
            println!();
        }
    }

    Ok(())
}
