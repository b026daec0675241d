use anyhow::Result;
use clap::Parser;
use gitpulse_core::{chart, describe, event_url};
use gitpulse_engine::aggregator::{self, RunParams};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "gitpulse", about = "Per-project GitLab activity summary")]
struct Cli {
    /// GitLab instance URL
    #[arg(long, env = "GITPULSE_URL")]
    url: String,

    /// Personal access token
    #[arg(long, env = "GITPULSE_TOKEN")]
    token: String,

    /// Start of the date range (YYYY-MM-DD)
    #[arg(long)]
    from: String,

    /// End of the date range (YYYY-MM-DD)
    #[arg(long)]
    to: String,

    /// Print every event, not just the per-project tallies
    #[arg(long)]
    events: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let params = RunParams {
        base_url: cli.url,
        token: cli.token,
        date_from: cli.from,
        date_to: cli.to,
    };

    info!("fetching activity {} .. {}", params.date_from, params.date_to);
    let projects = aggregator::run(&params).await?;

    if projects.is_empty() {
        println!("No activity in the selected period.");
        return Ok(());
    }

    for project in &projects {
        println!();
        println!(
            "{} ({} events)",
            project.project_name,
            project.events.len()
        );
        for slice in chart::shape(&project.tally) {
            println!("  {:>5}  {}", slice.value, slice.label);
        }
        if cli.events {
            for event in &project.events {
                let line = describe(event);
                match event_url(event, &params.base_url, &project.project_path) {
                    Some(url) => println!("    {}  {line}  <{url}>", event.created_at.date_naive()),
                    None => println!("    {}  {line}", event.created_at.date_naive()),
                }
            }
        }
    }

    Ok(())
}
