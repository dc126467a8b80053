//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgDomainRepository`] - Hosted domain lookups
//! - [`PgAccountLifecycle`] - Domain activation/deactivation requests
//! - [`PgEmailTemplateRepository`] - Lost password email templates
//! - [`PgSessionRepository`] - Login sessions

pub mod pg_domain_repository;
pub mod pg_email_template_repository;
pub mod pg_session_repository;

pub use pg_domain_repository::{PgAccountLifecycle, PgDomainRepository};
pub use pg_email_template_repository::PgEmailTemplateRepository;
pub use pg_session_repository::PgSessionRepository;
