//! Authenticated caller identity.

use serde_json::json;

use crate::error::AppError;

/// Account type, stored as `admin.admin_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Reseller,
    Client,
}

impl Role {
    /// Parses the `admin_type` column. Unknown values yield `None`.
    pub fn from_admin_type(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Self::Admin),
            "reseller" => Some(Self::Reseller),
            "user" => Some(Self::Client),
            _ => None,
        }
    }

    pub fn as_admin_type(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Reseller => "reseller",
            Self::Client => "user",
        }
    }

    /// Landing page after login, if this panel serves the role at all.
    pub fn home_path(self) -> Option<&'static str> {
        match self {
            Self::Admin => Some("/admin/users"),
            Self::Reseller => Some("/reseller/settings_lostpassword"),
            Self::Client => None,
        }
    }
}

/// The caller resolved from the session cookie.
///
/// Passed explicitly to handlers through request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl Identity {
    /// Fails unless the caller holds exactly `required`.
    pub fn check_identity(&self, required: Role) -> Result<(), AppError> {
        if self.role == required {
            return Ok(());
        }

        tracing::debug!(
            user_id = self.user_id,
            role = self.role.as_admin_type(),
            required = required.as_admin_type(),
            "Identity check failed"
        );

        Err(AppError::forbidden(
            "You are not allowed to access this page.",
            json!({ "required": required.as_admin_type() }),
        ))
    }
}
