//! CLI administration tool for linktrack.
//!
//! # Usage
//!
//! ```bash
//! # Apply the database schema
//! cargo run --bin admin -- migrate
//!
//! # Shorten a URL
//! cargo run --bin admin -- create --url="https://www.rust-lang.org/learn"
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (default `sqlite://linktrack.db`): SQLite connection string
//! - `BASE_URL` (default `http://localhost:3000`): prefix for printed short URLs
//!
//! Both commands exit with a non-zero status on any failure.

use linktrack::application::services::LinkService;
use linktrack::application::services::link_service::short_url;
use linktrack::config::{self, Config};
use linktrack::infrastructure::persistence::{
    self, SqliteClickRepository, SqliteLinkRepository,
};
use linktrack::telemetry;
use linktrack::utils::url_validator::validate_long_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing linktrack.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link for a long URL
    Create {
        /// The long URL to shorten
        #[arg(long)]
        url: String,
    },

    /// Apply database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    telemetry::init("warn", &config.log_format);

    match cli.command {
        Commands::Create { url } => create_link(&config, &url).await,
        Commands::Migrate => migrate(&config).await,
    }
}

async fn open_pool(config: &Config) -> Result<SqlitePool> {
    persistence::connect(&config.database_url, config.db_max_connections)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", config.database_url))
}

/// Validates the URL, creates the link and prints its code and short URL.
async fn create_link(config: &Config, long_url: &str) -> Result<()> {
    validate_long_url(long_url).with_context(|| format!("Invalid URL '{long_url}'"))?;

    let pool = Arc::new(open_pool(config).await?);

    let service = LinkService::new(
        Arc::new(SqliteLinkRepository::new(pool.clone())),
        Arc::new(SqliteClickRepository::new(pool.clone())),
    );

    let result = service.create_link(long_url).await;
    pool.close().await;

    let link = result.context("Failed to create short link")?;

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!("  Code:      {}", link.short_code.bright_yellow().bold());
    println!(
        "  Short URL: {}",
        short_url(&config.base_url, &link.short_code).cyan()
    );
    println!("  Target:    {}", link.long_url.bright_black());
    println!();

    Ok(())
}

/// Applies the embedded migrations for `links` and `clicks`.
async fn migrate(config: &Config) -> Result<()> {
    println!("{}", "🗄  Running database migrations".bright_blue().bold());

    let pool = open_pool(config).await?;

    let result = persistence::run_migrations(&pool).await;
    pool.close().await;

    result.context("Failed to apply migrations")?;

    println!("{}", "✅ Migrations applied successfully".green().bold());

    Ok(())
}
