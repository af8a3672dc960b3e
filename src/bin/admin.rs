//! CLI administration tool for shortly.
//!
//! Provides commands for bootstrapping accounts, inspecting and deleting
//! link mappings, and checking the database without going through the HTTP
//! API. This is the only way to create the first administrator.
//!
//! # Usage
//!
//! ```bash
//! # Create an administrator (password is prompted)
//! cargo run --bin admin -- user create root --role admin
//!
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # List all links grouped by owner
//! cargo run --bin admin -- links list
//!
//! # Delete a link
//! cargo run --bin admin -- links delete 42
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BASE_URL` (optional): prefix used when printing short links

use shortly::application::services::{CredentialService, LinkService};
use shortly::domain::entities::Role;
use shortly::infrastructure::persistence::{PgAccountRepository, PgLinkRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortly.
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
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage link mappings
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account
    Create {
        username: String,

        /// Account role: user or admin
        #[arg(short, long, default_value = "user")]
        role: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,
}

#[derive(Subcommand)]
enum LinksAction {
    /// List all links grouped by owner
    List,

    /// Delete a link by id
    Delete {
        id: i64,

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

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Links { action } => handle_links_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgAccountRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create {
            username,
            role,
            yes,
        } => create_user(repo, username, role, yes).await?,
        UserAction::List => list_users(repo).await?,
    }

    Ok(())
}

/// Creates an account with an interactively prompted password.
///
/// # Flow
///
/// 1. Parse the role
/// 2. Prompt for the password twice
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Hash with bcrypt and store
async fn create_user(
    repo: Arc<PgAccountRepository>,
    username: String,
    role: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let role: Role = role.parse()?;

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    println!("  Role:     {}", role.to_string().bright_yellow().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = CredentialService::new(repo);
    let account = service
        .register(&username, &password, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ Account created successfully!".green().bold(),
        account.id.to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Lists all accounts.
///
/// # Output Format
///
/// ```text
/// 📋 Accounts
///
///   ID  Username                       Role    Created
///   ─────────────────────────────────────────────────────────────────
///   1   root                           admin   2025-01-15 10:30
/// ```
async fn list_users(repo: Arc<PgAccountRepository>) -> Result<()> {
    use shortly::domain::repositories::AccountRepository;

    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let accounts = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if accounts.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- user create <name> --role admin",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<30} {:<7} {:<20}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(65).bright_black());

    for account in &accounts {
        let role = if account.is_admin() {
            account.role.as_str().bright_yellow()
        } else {
            account.role.as_str().normal()
        };

        println!(
            "  {:<3} {:<30} {:<7} {}",
            account.id.to_string().bright_black(),
            account.username.cyan(),
            role,
            account
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        accounts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn handle_links_action(action: LinksAction, pool: &PgPool) -> Result<()> {
    let base_url = std::env::var("BASE_URL").unwrap_or_else(|_| "https://short.ly".to_string());
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repo, base_url);

    match action {
        LinksAction::List => list_links(&service).await?,
        LinksAction::Delete { id, yes } => delete_link(&service, id, yes).await?,
    }

    Ok(())
}

/// Prints every mapping grouped by owner.
async fn list_links(service: &LinkService<PgLinkRepository>) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let owners = service
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if owners.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    let mut total = 0;
    for owner in &owners {
        println!(
            "  {} {}",
            owner.username.cyan().bold(),
            format!("(user_{})", owner.owner_id).bright_black()
        );

        for link in &owner.links {
            println!(
                "    {:<6} {:<32} {}",
                link.id.to_string().bright_black(),
                service.short_url(&link.short_code).bright_green(),
                link.original_link
            );
        }
        total += owner.links.len();
        println!();
    }

    println!("  Total: {}", total.to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a mapping after confirmation (default: No).
async fn delete_link(service: &LinkService<PgLinkRepository>, id: i64, yes: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete link {}?", id))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted successfully!".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "📦 Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
