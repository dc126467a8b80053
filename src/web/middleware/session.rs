//! Cookie-based session middleware for panel pages.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::{Redirect, Response},
};

use crate::state::AppState;

/// Name of the cookie carrying the raw session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Extracts the session token from a `Cookie` header value.
///
/// Handles multiple cookies separated by semicolons; other cookies are ignored.
pub fn session_token(cookie_header: &str) -> Option<&str> {
    cookie_header.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
    })
}

/// Whether `token` can be carried verbatim in a cookie value.
pub fn is_cookie_safe(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_graphic() && !matches!(c, ';' | ',' | '"' | '\\'))
}

/// Authenticates page requests using the session cookie.
///
/// # Flow
///
/// 1. Extract the `session_token` cookie
/// 2. Resolve it to an [`crate::domain::entities::Identity`] via
///    [`crate::application::services::AuthService`]
/// 3. Insert the identity into request extensions for handlers to check
/// 4. On a missing or invalid session, redirect to `/login`
///
/// Role checks are left to handlers, which call
/// [`crate::domain::entities::Identity::check_identity`].
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/admin/users", get(users_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), session::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let token = req
        .headers()
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(session_token)
        .map(str::to_owned);

    let Some(token) = token else {
        return Err(Redirect::to("/login"));
    };

    match st.auth_service.authenticate(&token).await {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        Err(_) => Err(Redirect::to("/login")),
    }
}
