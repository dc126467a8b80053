//! Core domain entities.
//!
//! - [`DomainRecord`] / [`DomainSummary`] - hosted domains and their status
//! - [`EmailTemplate`] - lost password emails of a reseller
//! - [`Identity`] - the authenticated caller
//! - [`Session`] - issued login sessions

pub mod domain;
pub mod email_template;
pub mod identity;
pub mod session;

pub use domain::{DomainRecord, DomainStatus, DomainSummary, StatusAction};
pub use email_template::{
    EmailTemplate, LostPasswordTemplates, TEMPLATE_PLACEHOLDERS, TemplateKind, TemplateUpdate,
};
pub use identity::{Identity, Role};
pub use session::Session;
