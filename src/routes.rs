//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`         - Health check (public)
//! - `/login`               - Login page (public)
//! - `/admin/*`, `/reseller/*`, `/logout` - Panel pages (cookie session required)
//! - `/static/*`            - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter on session pages
//! - **Session** - Cookie session resolving the caller identity
//! - **Path normalization** - Trailing slash handling

use crate::middleware::rate_limit;
use crate::middleware::tracing;
use crate::state::AppState;
use crate::web;
use crate::web::handlers::health_handler;
use crate::web::middleware::session;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let protected = web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        session::layer,
    ));
    let protected = rate_limit::apply(protected, rate_limit::SECURE, behind_proxy);

    let public = rate_limit::apply(
        web::routes::public_routes(),
        rate_limit::PUBLIC,
        behind_proxy,
    );

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(protected)
        .merge(public)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
