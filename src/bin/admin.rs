//! CLI administration tool for site-edge.
//!
//! Creates, inspects and soft-deletes short links, and checks the database,
//! without exposing any write endpoint over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link with a generated code
//! cargo run --bin admin -- link create https://example.com/some/long/url
//!
//! # Create a short link that also answers to a custom alias
//! cargo run --bin admin -- link create https://example.com/talk --alias talk
//!
//! # Show a link by alias or generated code
//! cargo run --bin admin -- link show talk
//!
//! # Soft-delete a link
//! cargo run --bin admin -- link delete talk
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`site_edge::config`].

use site_edge::application::services::ShortLinkService;
use site_edge::config::{Config, load_from_env};
use site_edge::domain::entities::ShortLink;
use site_edge::infrastructure::persistence::PgShortLinkRepository;
use site_edge::server::connect_database;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing site-edge.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Short link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Destination URL (prompted for if omitted)
        url: Option<String>,

        /// Custom alias the link also answers to
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show a short link by alias or generated code
    Show {
        code: String,

        /// Include soft-deleted links
        #[arg(long)]
        deleted: bool,
    },

    /// Soft-delete a short link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_from_env()?;
    let pool = connect_database(&config).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches short link commands.
async fn handle_link_action(action: LinkAction, config: &Config, pool: PgPool) -> Result<()> {
    let repository = Arc::new(PgShortLinkRepository::new(Arc::new(pool)));
    let service = ShortLinkService::new(repository, &config.site);

    match action {
        LinkAction::Create { url, alias } => create_link(&service, url, alias).await,
        LinkAction::Show { code, deleted } => show_link(&service, &code, deleted).await,
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await,
    }
}

/// Creates a short link and prints its public URL.
async fn create_link(
    service: &ShortLinkService,
    url: Option<String>,
    alias: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(url) => url,
        None => Input::new().with_prompt("Destination URL").interact_text()?,
    };

    let link = service
        .create_short_link(&url, alias.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short link: {e}"))?;

    println!("{}", "✅ Short link created!".green().bold());
    println!();
    print_link(service, &link);

    Ok(())
}

async fn show_link(service: &ShortLinkService, code: &str, include_deleted: bool) -> Result<()> {
    let link = service
        .find_by_code(code, include_deleted)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {e}"))?
        .context("Short link not found")?;

    print_link(service, &link);

    Ok(())
}

/// Soft-deletes a link after confirmation.
///
/// The codes stay reserved; a deleted link's alias cannot be reused.
async fn delete_link(service: &ShortLinkService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Short Link".bright_blue().bold());
    println!();

    let link = service
        .find_by_code(code, false)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {e}"))?
        .context("Short link not found")?;

    print_link(service, &link);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_short_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete short link: {e}"))?;

    println!();
    println!("{}", "✅ Short link deleted".green().bold());
    println!();

    Ok(())
}

fn print_link(service: &ShortLinkService, link: &ShortLink) {
    let status = if link.is_deleted() {
        "DELETED".red()
    } else {
        "ACTIVE".green()
    };

    println!("  ID:          {}", link.id.to_string().bright_black());
    println!("  Short URL:   {}", service.short_url(link).bright_yellow().bold());
    println!("  Slug:        {}", link.generated_slug.cyan());
    if let Some(alias) = &link.custom_alias {
        println!("  Alias:       {}", alias.cyan());
    }
    println!("  Destination: {}", link.destination_url.bright_white());
    println!(
        "  Created:     {}",
        link.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!("  Status:      {status}");
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let (total, active): (i64, i64) = sqlx::query_as(
                "SELECT COUNT(*), COUNT(*) FILTER (WHERE deleted_at IS NULL) FROM short_links",
            )
            .fetch_one(pool)
            .await?;

            println!("  PostgreSQL:   {}", version.bright_white());
            println!("  Short links:  {}", total.to_string().bright_green().bold());
            println!("  Active:       {}", active.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
