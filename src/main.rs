//! Main entry point for the GitHub stats card generator
//!
//! This file sets up logging, parses command line arguments, and runs one
//! fetch, render and write pass.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use github_stats_card::{
    Config, StatsGenerator, DEFAULT_API_URL, DEFAULT_CALENDAR_DAYS, DEFAULT_GRAPHQL_URL,
    DEFAULT_OUTPUT_PATH,
};

/// Command line arguments for the stats card generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub login to collect stats for
    #[arg(long, env = "GH_USERNAME")]
    username: String,

    /// Personal access token used for the GitHub API
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    token: String,

    /// SVG template with {{ placeholder }} fields
    /// If not provided, the built-in card layout is used
    #[arg(long)]
    template: Option<PathBuf>,

    /// Where to write the rendered SVG
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Days of contribution calendar to analyze (at most 365)
    #[arg(long, default_value_t = DEFAULT_CALENDAR_DAYS)]
    days: i64,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// GitHub GraphQL endpoint
    #[arg(long, default_value = DEFAULT_GRAPHQL_URL)]
    graphql_url: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    // RUST_LOG overrides the flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("github_stats_card={}", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting GitHub stats card generator");

    let config = Config {
        username: args.username,
        token: args.token,
        api_base_url: args.api_url,
        graphql_url: args.graphql_url,
        template_path: args.template,
        output_path: args.output,
        calendar_days: args.days,
    };

    let generator = StatsGenerator::from_config(&config).await?;
    let written = generator.generate(chrono::Utc::now()).await?;

    info!("Stats card generation complete: {}", written.display());
    Ok(())
}
