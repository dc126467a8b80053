//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! - [`services::domain_status_service::DomainStatusService`] - Domain status toggle and listing
//! - [`services::email_template_service::EmailTemplateService`] - Lost password email templates
//! - [`services::auth_service::AuthService`] - Session authentication
//! - [`hooks`] - Page script start/end listeners
//! - [`messages`] - Page messages returned to the web layer

pub mod hooks;
pub mod messages;
pub mod services;
