//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::hooks::ScriptHooks;
use crate::application::services::{AuthService, DomainStatusService, EmailTemplateService};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub domain_status_service: Arc<DomainStatusService>,
    pub email_template_service: Arc<EmailTemplateService>,
    pub hooks: Arc<ScriptHooks>,
    /// Adds the `Secure` attribute to the session cookie.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        domain_status_service: Arc<DomainStatusService>,
        email_template_service: Arc<EmailTemplateService>,
        hooks: Arc<ScriptHooks>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            auth_service,
            domain_status_service,
            email_template_service,
            hooks,
            secure_cookies,
        }
    }
}
