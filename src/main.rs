//! CLI entry point for the coursefiles tool.

use anyhow::Result;
use clap::Parser;
use coursefiles_core::api::ApiClient;
use coursefiles_core::favorites::JsonFileFavorites;
use tracing::debug;

mod cli;
mod commands;

use cli::{Args, Command};

/// Base URL used when neither `--api-base` nor the environment sets one.
const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let api_base = args
        .api_base
        .clone()
        .or_else(|| std::env::var("COURSEFILES_API_BASE").ok())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    debug!(api_base = %api_base, "resolved API base");

    let client = ApiClient::from_base(&api_base)?;
    let store = JsonFileFavorites::at_default_location();

    match args.command {
        Command::Courses {
            page,
            search,
            faculty,
        } => commands::courses::run(&client, &store, page, &search, faculty).await,
        Command::Show { course_id, tab } => {
            commands::show::run(&client, &course_id, tab.into()).await
        }
        Command::Upload {
            course_id,
            kind,
            title,
            description,
            semester,
            year,
            files,
            url,
        } => {
            commands::upload::run(
                &client,
                &course_id,
                kind.into(),
                title,
                description,
                semester.map(Into::into),
                year.as_deref(),
                &files,
                url.as_deref(),
            )
            .await
        }
        Command::Bundle {
            course_id,
            resource,
            output,
        } => commands::bundle::run(&client, &course_id, &resource, &output).await,
        Command::Favorites { action } => commands::favorites::run(&client, &store, action).await,
        Command::About => {
            commands::about();
            Ok(())
        }
    }
}
