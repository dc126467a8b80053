//! Repository trait definitions for the domain layer.
//!
//! Traits define the data-access contract; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`DomainRepository`] - Hosted domain lookups
//! - [`AccountLifecycle`] - Domain activation/deactivation requests
//! - [`EmailTemplateRepository`] - Lost password email templates
//! - [`SessionRepository`] - Login sessions

pub mod domain_repository;
pub mod email_template_repository;
pub mod session_repository;

pub use domain_repository::{AccountLifecycle, DomainRepository};
pub use email_template_repository::EmailTemplateRepository;
pub use session_repository::SessionRepository;

#[cfg(test)]
pub use domain_repository::{MockAccountLifecycle, MockDomainRepository};
#[cfg(test)]
pub use email_template_repository::MockEmailTemplateRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
