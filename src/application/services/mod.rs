//! Business logic services for the application layer.

pub mod auth_service;
pub mod domain_status_service;
pub mod email_template_service;

pub use auth_service::{AuthService, hash_session_token};
pub use domain_status_service::DomainStatusService;
pub use email_template_service::{EmailTemplateService, TemplateForm, TemplateSubmission};
