//! Reseller settings page for the lost password emails.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, Form, extract::State};

use crate::application::hooks::ScriptEvent;
use crate::application::services::TemplateForm;
use crate::domain::entities::{Identity, Role, TEMPLATE_PLACEHOLDERS};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::dto::forms::LostPasswordForm;

const PAGE: &str = "settings_lostpassword";

pub struct Placeholder {
    pub token: &'static str,
    pub description: &'static str,
}

#[derive(Template, WebTemplate)]
#[template(path = "reseller/settings_lostpassword.html")]
pub struct LostPasswordTemplate {
    pub username: String,
    pub errors: Vec<String>,
    pub notices: Vec<String>,
    pub placeholders: Vec<Placeholder>,
    pub subject1: String,
    pub message1: String,
    pub subject2: String,
    pub message2: String,
    pub sender_email: String,
    pub sender_name: String,
}

impl LostPasswordTemplate {
    fn new(username: String, form: TemplateForm) -> Self {
        let TemplateForm {
            templates,
            messages,
            ..
        } = form;

        Self {
            username,
            errors: messages.errors,
            notices: messages.notices,
            placeholders: TEMPLATE_PLACEHOLDERS
                .iter()
                .map(|&(token, description)| Placeholder { token, description })
                .collect(),
            sender_email: templates.activation.sender_email,
            sender_name: templates.activation.sender_name,
            subject1: templates.activation.subject,
            message1: templates.activation.message,
            subject2: templates.lost_password.subject,
            message2: templates.lost_password.message,
        }
    }
}

/// Shows the stored templates of the calling reseller.
///
/// # Endpoint
///
/// `GET /reseller/settings_lostpassword`
pub async fn lost_password_page_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<LostPasswordTemplate, AppError> {
    identity.check_identity(Role::Reseller)?;

    state.hooks.dispatch(ScriptEvent::Start {
        role: Role::Reseller,
        page: PAGE,
    });

    let form = state
        .email_template_service
        .render(identity.user_id)
        .await?;

    state.hooks.dispatch(ScriptEvent::End {
        role: Role::Reseller,
        page: PAGE,
    });

    Ok(LostPasswordTemplate::new(identity.username, form))
}

/// Saves both templates when `uaction=apply`, otherwise re-renders.
///
/// # Endpoint
///
/// `POST /reseller/settings_lostpassword`
///
/// Missing subjects or messages are reported on the page with the
/// submitted values kept in the form; nothing is stored in that case.
pub async fn lost_password_submit_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<LostPasswordForm>,
) -> Result<LostPasswordTemplate, AppError> {
    identity.check_identity(Role::Reseller)?;

    state.hooks.dispatch(ScriptEvent::Start {
        role: Role::Reseller,
        page: PAGE,
    });

    let service = &state.email_template_service;
    let result = if form.is_apply() {
        service.submit(identity.user_id, form.into()).await?
    } else {
        service.render(identity.user_id).await?
    };

    state.hooks.dispatch(ScriptEvent::End {
        role: Role::Reseller,
        page: PAGE,
    });

    Ok(LostPasswordTemplate::new(identity.username, result))
}
