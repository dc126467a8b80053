//! Admin action toggling a customer's domains on or off.

use axum::{
    Extension,
    extract::{Query, State},
    response::Redirect,
};
use serde_json::json;

use crate::application::hooks::ScriptEvent;
use crate::domain::entities::{Identity, Role};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::dto::forms::DomainStatusQuery;

const PAGE: &str = "domain_status_change";

/// Requests activation or deactivation of the account owning a domain.
///
/// # Endpoint
///
/// `GET /admin/domain_status_change?domain_id={id}`
///
/// The next status is derived from the stored one: `ok` schedules a
/// deactivation, `disabled` an activation. The change is picked up later
/// by the backend engine; this handler only writes the pending status.
///
/// # Responses
///
/// - **303 See Other** to `/admin/users` once the change is queued
/// - **400 Bad Request** for a missing, malformed or unknown `domain_id`,
///   or a domain in any other status
/// - **403 Forbidden** for non-admin callers
pub async fn domain_status_change_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<DomainStatusQuery>,
) -> Result<Redirect, AppError> {
    identity.check_identity(Role::Admin)?;

    state.hooks.dispatch(ScriptEvent::Start {
        role: Role::Admin,
        page: PAGE,
    });

    let domain_id = query.domain_id().ok_or_else(|| {
        AppError::bad_request(
            "Invalid or missing domain_id",
            json!({ "domain_id": query.domain_id }),
        )
    })?;

    state.domain_status_service.toggle(domain_id).await?;

    Ok(Redirect::to("/admin/users"))
}
