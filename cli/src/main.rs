//! revas - command-line access to the review-assignment API.
//!
//! # Environment Variables
//!
//! - `UDACITY_AUTH_TOKEN` - API token (required)
//! - `REVAS_BASE_URL` - API base URL (optional, defaults to production)
//!
//! # Examples
//!
//! ```bash
//! # Projects the reviewer is certified for
//! revas certifications --certified
//!
//! # Ask for reviews on every certified project, in every certified language
//! revas request
//!
//! # Only some projects
//! revas request --project-id 145 --project-id 14
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use revas_core::{Credentials, Endpoints, ReviewsClient, UreqTransport};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "revas")]
#[command(about = "Query and request reviews from the review-assignment API")]
#[command(version)]
struct Cli {
    /// API base URL (or set `REVAS_BASE_URL` env var)
    #[arg(long, env = "REVAS_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List certification records
    Certifications {
        /// Print only the ids of certified projects
        #[arg(long)]
        certified: bool,
    },

    /// Show the languages the reviewer is certified in
    Languages,

    /// Request new reviews
    Request {
        /// Project to request (repeatable); defaults to every certified project
        #[arg(long = "project-id")]
        project_ids: Vec<u64>,
    },

    /// Show how many submissions are assigned
    AssignedCount,

    /// List open submission requests
    SubmissionRequests,
}

/// A blank base URL counts as unset, matching `Endpoints::from_env`.
fn base_url_override(base_url: Option<&str>) -> Option<&str> {
    base_url.map(str::trim).filter(|base| !base.is_empty())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match base_url_override(cli.base_url.as_deref()) {
        Some(base) => {
            let credentials =
                Credentials::from_env().context("Failed to read API credentials")?;
            ReviewsClient::new(
                credentials,
                Endpoints::with_base_url(base),
                UreqTransport::new(),
            )
        }
        None => ReviewsClient::from_env().context("Failed to read API credentials")?,
    };

    match cli.command {
        Commands::Certifications { certified } => {
            if certified {
                let ids = client
                    .certified_project_ids()
                    .context("Failed to list certifications")?;
                print_json(&Value::from(ids))?;
            } else {
                let certifications = client
                    .certifications()
                    .context("Failed to list certifications")?;
                print_json(&certifications)?;
            }
        }
        Commands::Languages => {
            let languages = client
                .certified_language_codes()
                .context("Failed to read reviewer profile")?;
            print_json(&Value::from(languages))?;
        }
        Commands::Request { project_ids } => {
            let project_ids = if project_ids.is_empty() {
                client
                    .certified_project_ids()
                    .context("Failed to list certifications")?
            } else {
                project_ids
            };
            let selection = client
                .projects_with_languages(&project_ids)
                .context("Failed to read reviewer profile")?;
            if selection.is_empty() {
                bail!("Nothing to request: no certified projects or languages");
            }
            tracing::info!(pairs = selection.projects.len(), "Requesting reviews");
            let ack = client
                .request_reviews(&selection.to_value()?)
                .context("Failed to request reviews")?;
            print_json(&ack)?;
        }
        Commands::AssignedCount => {
            let count = client
                .assigned_count()
                .context("Failed to read assigned count")?;
            print_json(&count)?;
        }
        Commands::SubmissionRequests => {
            let requests = client
                .submission_requests()
                .context("Failed to list submission requests")?;
            print_json(&requests)?;
        }
    }

    Ok(())
}
