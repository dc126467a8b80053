//! Login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{
        HeaderMap, StatusCode,
        header::{COOKIE, SET_COOKIE},
    },
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::dto::forms::LoginForm;
use crate::web::middleware::session::{SESSION_COOKIE, session_token};

const INVALID_TOKEN: &str = "Invalid or revoked session token.";
const TOKEN_REQUIRED: &str = "Enter a session token.";

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_page_handler() -> LoginTemplate {
    LoginTemplate { error: None }
}

/// Exchanges a session token for the session cookie.
///
/// # Endpoint
///
/// `POST /login`
///
/// On success the raw token is stored in an `HttpOnly` cookie and the
/// caller is redirected to the home page of their role. Client accounts
/// have no page here and get 403.
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if form.validate().is_err() {
        return Ok(login_error(StatusCode::BAD_REQUEST, TOKEN_REQUIRED));
    }

    if !form.is_cookie_safe() {
        return Ok(invalid_token());
    }

    let identity = match state.auth_service.authenticate(&form.token).await {
        Ok(identity) => identity,
        Err(AppError::Unauthorized { .. }) => return Ok(invalid_token()),
        Err(e) => return Err(e),
    };

    let Some(home) = identity.role.home_path() else {
        return Err(AppError::forbidden(
            "This account has no access to the panel pages.",
            json!({ "role": identity.role.as_admin_type() }),
        ));
    };

    tracing::info!(user = %identity.username, role = identity.role.as_admin_type(), "Logged in");

    let cookie = session_cookie(&form.token, state.secure_cookies);
    Ok(([(SET_COOKIE, cookie)], Redirect::to(home)).into_response())
}

/// Revokes the current session and clears the session cookie.
///
/// # Endpoint
///
/// `GET /logout`
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(session_token);

    if let Some(token) = token {
        state.auth_service.logout(token).await?;
    }

    let cookie = format!("{}; Max-Age=0", session_cookie("", state.secure_cookies));
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/login")).into_response())
}

fn invalid_token() -> Response {
    login_error(StatusCode::UNAUTHORIZED, INVALID_TOKEN)
}

fn login_error(status: StatusCode, message: &str) -> Response {
    let page = LoginTemplate {
        error: Some(message.to_string()),
    };
    (status, page).into_response()
}

fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
