//! Panel login session.

use chrono::{DateTime, Utc};

/// A session token issued to an account.
///
/// Only the HMAC of the raw token is stored.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub admin_id: i64,
    pub admin_name: String,
    pub label: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}
