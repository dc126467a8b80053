//! Repository trait for login sessions.

use crate::domain::entities::{Identity, Session};
use crate::error::AppError;
use async_trait::async_trait;

/// Session storage backing cookie authentication and the admin CLI.
///
/// Tokens are looked up by their HMAC-SHA256 hash; raw tokens never reach
/// the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Resolves the identity owning a non-revoked session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_identity(&self, token_hash: &str) -> Result<Option<Identity>, AppError>;

    /// Updates the `last_used_at` timestamp of a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn touch(&self, token_hash: &str) -> Result<(), AppError>;

    /// Finds an account by login name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_account(&self, admin_name: &str) -> Result<Option<Identity>, AppError>;

    /// Creates a session for `admin_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token hash is already in use.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_session(
        &self,
        admin_id: i64,
        label: &str,
        token_hash: &str,
    ) -> Result<Session, AppError>;

    /// Lists all sessions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_sessions(&self) -> Result<Vec<Session>, AppError>;

    /// Finds a session by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Session>, AppError>;

    /// Finds the most recent session with the given label.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_label(&self, label: &str) -> Result<Option<Session>, AppError>;

    /// Revokes a session, preventing further authentication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn revoke_session(&self, id: i64) -> Result<(), AppError>;

    /// Revokes the live session with the given token hash.
    ///
    /// Returns `false` if no non-revoked session matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn revoke_by_hash(&self, token_hash: &str) -> Result<bool, AppError>;
}
