//! Admin users listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State};

use crate::application::hooks::ScriptEvent;
use crate::domain::entities::{DomainSummary, Identity, Role, StatusAction};
use crate::error::AppError;
use crate::state::AppState;

const PAGE: &str = "users";

/// One row of the listing.
pub struct DomainRow {
    pub id: i64,
    pub name: String,
    pub admin_name: String,
    pub status: String,
    pub toggle_label: Option<&'static str>,
}

impl From<DomainSummary> for DomainRow {
    fn from(summary: DomainSummary) -> Self {
        let toggle_label = summary.status.toggle_action().map(|action| match action {
            StatusAction::Activate => "Activate",
            StatusAction::Deactivate => "Deactivate",
        });

        Self {
            id: summary.id,
            status: summary.status.as_str().to_string(),
            name: summary.name,
            admin_name: summary.admin_name,
            toggle_label,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
pub struct UsersTemplate {
    pub username: String,
    pub domains: Vec<DomainRow>,
}

/// Lists every domain with its owner and a status toggle link.
///
/// # Endpoint
///
/// `GET /admin/users`
pub async fn users_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<UsersTemplate, AppError> {
    identity.check_identity(Role::Admin)?;

    state.hooks.dispatch(ScriptEvent::Start {
        role: Role::Admin,
        page: PAGE,
    });

    let domains = state
        .domain_status_service
        .list_domains()
        .await?
        .into_iter()
        .map(DomainRow::from)
        .collect();

    state.hooks.dispatch(ScriptEvent::End {
        role: Role::Admin,
        page: PAGE,
    });

    Ok(UsersTemplate {
        username: identity.username,
        domains,
    })
}
