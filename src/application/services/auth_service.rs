//! Authentication service for panel login sessions.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::Identity;
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a raw session token with HMAC-SHA256 keyed by `secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC. The admin CLI uses the
/// same function when issuing sessions, so both sides must share the secret.
pub fn hash_session_token(secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Resolves session cookies to caller identities.
///
/// An attacker with read-only access to the `sessions` table cannot forge or
/// replay a session without the server-side secret.
pub struct AuthService {
    repository: Arc<dyn SessionRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - session repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when sessions were created
    pub fn new(repository: Arc<dyn SessionRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    fn hash_token(&self, token: &str) -> String {
        hash_session_token(&self.signing_secret, token)
    }

    /// Authenticates a raw session token.
    ///
    /// On success, updates the session's `last_used_at` timestamp. A failure
    /// to do so is logged and does not fail the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is empty, unknown or
    /// revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        if token.is_empty() {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Empty session token"}),
            ));
        }

        let token_hash = self.hash_token(token);

        let Some(identity) = self.repository.find_identity(&token_hash).await? else {
            tracing::debug!("Rejected unknown or revoked session token");
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked session"}),
            ));
        };

        if let Err(e) = self.repository.touch(&token_hash).await {
            tracing::warn!(error = %e, user_id = identity.user_id, "Failed to update session usage");
        }

        Ok(identity)
    }

    /// Revokes the session behind a raw token so it cannot be replayed.
    ///
    /// Unknown or already revoked tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        if token.is_empty() {
            return Ok(());
        }

        if self.repository.revoke_by_hash(&self.hash_token(token)).await? {
            tracing::debug!("Session revoked on logout");
        }
        Ok(())
    }
}
