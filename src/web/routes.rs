//! Panel route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    domain_status_change_handler, login_page_handler, login_submit_handler, logout_handler,
    lost_password_page_handler, lost_password_submit_handler, users_handler,
};
use axum::{Router, routing::get};

/// Pages requiring a session.
///
/// Protected via [`crate::web::middleware::session`]; each handler then
/// checks the role it serves.
///
/// # Endpoints
///
/// - `GET /admin/users` - Domain listing (admin)
/// - `GET /admin/domain_status_change` - Toggle a customer's domains (admin)
/// - `GET|POST /reseller/settings_lostpassword` - Lost password emails (reseller)
/// - `GET /logout` - Clear the session cookie
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(users_handler))
        .route(
            "/admin/domain_status_change",
            get(domain_status_change_handler),
        )
        .route(
            "/reseller/settings_lostpassword",
            get(lost_password_page_handler).post(lost_password_submit_handler),
        )
        .route("/logout", get(logout_handler))
}

/// Pages reachable without a session.
///
/// # Endpoints
///
/// - `GET /login` - Login page
/// - `POST /login` - Exchange a session token for the cookie
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/login", get(login_page_handler).post(login_submit_handler))
}
