//! CLI administration tool for the hosting panel.
//!
//! Issues and revokes panel login sessions, lists domains and runs database
//! checks without going through the web pages.
//!
//! # Usage
//!
//! ```bash
//! # Issue a session token for an account
//! cargo run --bin admin -- session create --user admin
//!
//! # List all sessions
//! cargo run --bin admin -- session list
//!
//! # Revoke a session by ID or label
//! cargo run --bin admin -- session revoke "laptop"
//!
//! # List domains and their status
//! cargo run --bin admin -- domains
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `SESSION_SIGNING_SECRET` (required for `session create`): the same key
//!   the server uses to hash session tokens

use hosting_panel::application::services::hash_session_token;
use hosting_panel::domain::entities::{DomainStatus, Role};
use hosting_panel::domain::repositories::{DomainRepository, SessionRepository};
use hosting_panel::infrastructure::persistence::{PgDomainRepository, PgSessionRepository};
use hosting_panel::web::middleware::session::is_cookie_safe;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the hosting panel.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage panel login sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// List domains with their owner and status
    Domains,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Issue a new session token for an account
    Create {
        /// Account name (`admin.admin_name`)
        #[arg(short, long)]
        user: Option<String>,

        /// Label to recognise the session by (e.g. "laptop")
        #[arg(short, long)]
        label: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all sessions
    List,

    /// Revoke a session
    Revoke {
        /// Session ID or label
        id_or_label: String,
    },
}

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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Session { action } => handle_session_action(action, &pool).await?,
        Commands::Domains => list_domains(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_session_action(action: SessionAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgSessionRepository::new(Arc::new(pool.clone())));

    match action {
        SessionAction::Create {
            user,
            label,
            token,
            yes,
        } => create_session(repo, user, label, token, yes).await?,
        SessionAction::List => list_sessions(repo).await?,
        SessionAction::Revoke { id_or_label } => revoke_session(repo, id_or_label).await?,
    }

    Ok(())
}

/// Issues a session token for an admin or reseller account.
///
/// # Flow
///
/// 1. Prompt for the account name and label (or use provided)
/// 2. Resolve the account; client accounts are refused
/// 3. Generate a random token or use the provided value
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Store the HMAC-SHA256 of the token
///
/// The raw token is printed once and cannot be retrieved later.
async fn create_session(
    repo: Arc<PgSessionRepository>,
    user: Option<String>,
    label: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let secret =
        std::env::var("SESSION_SIGNING_SECRET").context("SESSION_SIGNING_SECRET must be set")?;

    println!("{}", "🔑 Create Panel Session".bright_blue().bold());
    println!();

    let admin_name = match user {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Account name")
            .with_initial_text("admin")
            .interact_text()?,
    };

    let account = repo
        .find_account(&admin_name)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Account '{}' not found", admin_name))?;

    if account.role == Role::Client {
        anyhow::bail!("Client accounts cannot log in to the panel pages");
    }

    let label = match label {
        Some(l) => l,
        None => Input::new()
            .with_prompt("Session label")
            .with_initial_text("browser")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            if !is_cookie_safe(&t) {
                anyhow::bail!(
                    "Token must be printable ASCII without spaces, quotes, commas or semicolons"
                );
            }
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            let generated = generate_token();
            println!("{}", "✨ Generated new token".green());
            generated
        }
    };

    println!();
    println!("{}", "Session details:".bright_white().bold());
    println!("  Account: {}", account.username.cyan());
    println!("  Role:    {}", account.role.as_admin_type().cyan());
    println!("  Label:   {}", label.cyan());
    println!("  Token:   {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this session?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_session_token(&secret, &token_value);

    repo.create_session(account.user_id, &label, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create session: {}", e))?;

    println!();
    println!("{}", "✅ Session created successfully!".green().bold());
    println!();
    println!(
        "  Log in at {} with the token above.",
        "http://localhost:3000/login".bright_cyan()
    );
    println!();

    Ok(())
}

/// Lists all sessions with status indicators.
async fn list_sessions(repo: Arc<PgSessionRepository>) -> Result<()> {
    println!("{}", "📋 Panel Sessions".bright_blue().bold());
    println!();

    let sessions = repo
        .list_sessions()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list sessions: {}", e))?;

    if sessions.is_empty() {
        println!("{}", "  No sessions found".yellow());
        println!();
        println!(
            "  Create one with: {} admin session create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<16} {:<20} {:<18} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "Account".bright_white().bold(),
        "Label".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for session in &sessions {
        let status = if session.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = session
            .last_used_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<4} {:<16} {:<20} {:<18} {:<18} {}",
            session.id.to_string().bright_black(),
            session.admin_name.cyan(),
            session.label,
            session
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        sessions.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a session by ID (numeric input) or label, after confirmation.
async fn revoke_session(repo: Arc<PgSessionRepository>, id_or_label: String) -> Result<()> {
    println!("{}", "🔒 Revoke Panel Session".bright_blue().bold());
    println!();

    let session = match id_or_label.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_label(&id_or_label).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    .context("Session not found")?;

    if session.is_revoked() {
        println!("{}", "⚠️  This session is already revoked".yellow());
        return Ok(());
    }

    println!("  Account: {}", session.admin_name.cyan());
    println!("  Label:   {}", session.label.cyan());
    println!("  ID:      {}", session.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this session?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_session(session.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke session: {}", e))?;

    println!();
    println!("{}", "✅ Session revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Prints every domain with its owner and status.
async fn list_domains(pool: &PgPool) -> Result<()> {
    println!("{}", "🌐 Domains".bright_blue().bold());
    println!();

    let repo = PgDomainRepository::new(Arc::new(pool.clone()));
    let domains = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list domains: {}", e))?;

    if domains.is_empty() {
        println!("{}", "  No domains found".yellow());
        return Ok(());
    }

    println!(
        "  {:<6} {:<36} {:<16} {:<10}",
        "ID".bright_white().bold(),
        "Domain".bright_white().bold(),
        "Owner".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(72).bright_black());

    for domain in &domains {
        let status = match &domain.status {
            DomainStatus::Ok => domain.status.as_str().green(),
            DomainStatus::Disabled => domain.status.as_str().red(),
            DomainStatus::Other(_) => domain.status.as_str().yellow(),
        };

        println!(
            "  {:<6} {:<36} {:<16} {}",
            domain.id.to_string().bright_black(),
            domain.name.cyan(),
            domain.admin_name,
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        domains.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

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
            let accounts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin")
                .fetch_one(pool)
                .await?;
            let domains: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM domain")
                .fetch_one(pool)
                .await?;
            let sessions: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE revoked_at IS NULL")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL:      {}", version.bright_white());
            println!(
                "  Accounts:        {}",
                accounts.to_string().bright_green().bold()
            );
            println!(
                "  Domains:         {}",
                domains.to_string().bright_green().bold()
            );
            println!(
                "  Active sessions: {}",
                sessions.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Generates a cryptographically random token.
///
/// 48 characters from A-Z, a-z, 0-9.
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
