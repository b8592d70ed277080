//! taskping — send a one-shot Discord webhook notification.
//!
//! Reads the webhook URL from `--url` or the `DISCORD_WEBHOOK_URL`
//! environment variable; a `.env` file is honored when present. Exits
//! non-zero when delivery fails.

use anyhow::Context;
use clap::Parser;

use taskping_notify::{Category, DiscordNotifier, Notification};

/// Send a formatted notification to a Discord webhook.
#[derive(Parser, Debug)]
#[command(name = "taskping", version, about)]
struct Cli {
    /// Discord webhook URL.
    #[arg(long, env = "DISCORD_WEBHOOK_URL")]
    url: String,

    /// Notification category: task_complete, build_complete, user_decision,
    /// or error. Unrecognized values fall back to task_complete.
    #[arg(long, default_value = "task_complete")]
    category: String,

    /// Project name shown in the embed description.
    #[arg(long)]
    project: Option<String>,

    /// Free-text details field.
    #[arg(long)]
    details: Option<String>,

    /// Metadata entry as KEY=VALUE; repeatable, order is preserved.
    #[arg(long = "meta", value_name = "KEY=VALUE")]
    meta: Vec<String>,

    /// Send a plain-text message instead of a structured embed.
    #[arg(long, conflicts_with_all = ["category", "project", "details", "meta"])]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap so env-backed args see it.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let notifier = DiscordNotifier::new(cli.url)?;

    let delivered = match cli.message {
        Some(content) => notifier.send_simple_message(&content).await,
        None => {
            let mut notification = Notification::new(Category::parse(&cli.category));
            if let Some(project) = cli.project {
                notification = notification.project_name(project);
            }
            if let Some(details) = cli.details {
                notification = notification.details(details);
            }
            for entry in &cli.meta {
                let (label, value) = entry.split_once('=').with_context(|| {
                    format!("invalid --meta entry (expected KEY=VALUE): {entry}")
                })?;
                notification = notification.metadata(label, value);
            }
            notifier.send_notification(&notification).await
        }
    };

    if !delivered {
        anyhow::bail!("notification delivery failed");
    }
    Ok(())
}
