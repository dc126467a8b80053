//! Repository trait for lost password email templates.

use crate::domain::entities::{EmailTemplate, TemplateKind, TemplateUpdate};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage of per-owner email templates.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEmailTemplateRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailTemplateRepository: Send + Sync {
    /// Loads the template of `kind` owned by `owner_id`.
    ///
    /// Falls back to the built-in default subject and message when the owner
    /// never saved one. Sender fields always come from the owner's account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner account does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn get(&self, owner_id: i64, kind: TemplateKind) -> Result<EmailTemplate, AppError>;

    /// Stores subject and message of both lost password templates owned by
    /// `owner_id`. Either both are written or neither is.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn save_both(
        &self,
        owner_id: i64,
        activation: &TemplateUpdate,
        lost_password: &TemplateUpdate,
    ) -> Result<(), AppError>;
}
