//! CLI for the Greenkeeper to Dependabot migration.
//!
//! Scans every repository of a GitHub organization for the Greenkeeper badge
//! and opens a pull request replacing Greenkeeper with Dependabot.

use clap::Parser;
use greenkeeper_migrate::{RunSummary, Runner, RunnerConfig, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Greenkeeper Migrate - Replace Greenkeeper with Dependabot across an organization.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Organization whose repositories are migrated.
    #[arg(long)]
    owner: String,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Preview changes without pushing branches or opening pull requests.
    #[arg(long)]
    dry_run: bool,

    /// Path to a TOML migration plan overriding the built-in one.
    #[arg(long)]
    plan: Option<PathBuf>,

    /// GitHub Enterprise API base URL.
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with `RUST_LOG` filtering, defaulting to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mut config = RunnerConfig::new(args.owner, args.token, args.dry_run);
    if let Some(api_url) = args.api_url {
        config = config.with_api_url(api_url);
    }
    if let Some(path) = args.plan {
        config = config.with_plan_path(path);
    }
    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Repositories scanned: {}", summary.repositories_scanned);
    println!("  Using Greenkeeper: {}", summary.repositories_eligible);
    println!("  Skipped: {}", summary.repositories_skipped);

    if summary.dry_run {
        println!("  PRs previewed: {}", summary.prs_previewed);
    } else {
        println!("  PRs created: {}", summary.prs_created);
        if summary.labels_failed > 0 {
            println!("  PRs missing label: {}", summary.labels_failed);
        }
    }
    println!("  Failures: {}", summary.failures);

    if !summary.pull_request_urls.is_empty() {
        println!("\nPull requests:");
        for url in &summary.pull_request_urls {
            println!("  {url}");
        }
    }
}
