//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, service wiring and the Axum server
//! lifecycle.

use crate::application::hooks::ScriptHooks;
use crate::application::services::{AuthService, DomainStatusService, EmailTemplateService};
use crate::config::Config;
use crate::infrastructure::persistence::{
    PgAccountLifecycle, PgDomainRepository, PgEmailTemplateRepository, PgSessionRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL pool using the configured limits.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Wires repositories and services into the shared application state.
pub fn build_state(pool: Arc<PgPool>, config: &Config) -> AppState {
    let domain_repository = Arc::new(PgDomainRepository::new(pool.clone()));
    let lifecycle = Arc::new(PgAccountLifecycle::new(pool.clone()));
    let template_repository = Arc::new(PgEmailTemplateRepository::new(pool.clone()));
    let session_repository = Arc::new(PgSessionRepository::new(pool));

    AppState::new(
        Arc::new(AuthService::new(
            session_repository,
            config.session_signing_secret.clone(),
        )),
        Arc::new(DomainStatusService::new(domain_repository, lifecycle)),
        Arc::new(EmailTemplateService::new(template_repository)),
        Arc::new(ScriptHooks::with_tracing()),
        config.secure_cookies,
    )
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Database migrations
/// - Services and shared state
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let state = build_state(Arc::new(pool), &config);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
