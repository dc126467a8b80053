//! Query and form payloads posted by panel pages.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::TemplateSubmission;
use crate::web::middleware::session;

/// Query of `GET /admin/domain_status_change`.
///
/// `domain_id` stays a string so a malformed value reaches the handler and
/// becomes a 400 page instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct DomainStatusQuery {
    pub domain_id: Option<String>,
}

impl DomainStatusQuery {
    pub fn domain_id(&self) -> Option<i64> {
        self.domain_id.as_deref()?.trim().parse().ok()
    }
}

/// Body of `POST /reseller/settings_lostpassword`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LostPasswordForm {
    /// Only `apply` saves the templates.
    pub uaction: String,
    pub subject1: String,
    pub message1: String,
    pub subject2: String,
    pub message2: String,
}

impl LostPasswordForm {
    pub fn is_apply(&self) -> bool {
        self.uaction == "apply"
    }
}

impl From<LostPasswordForm> for TemplateSubmission {
    fn from(form: LostPasswordForm) -> Self {
        Self {
            subject1: form.subject1,
            message1: form.message1,
            subject2: form.subject2,
            message2: form.message2,
        }
    }
}

/// Body of `POST /login`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 256))]
    pub token: String,
}

impl LoginForm {
    /// Whether the token can be echoed back in a `Set-Cookie` header.
    pub fn is_cookie_safe(&self) -> bool {
        session::is_cookie_safe(&self.token)
    }
}
