//! PostgreSQL implementation of the session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Identity, Role, Session};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use serde_json::json;

#[derive(FromRow)]
struct IdentityRow {
    admin_id: i64,
    admin_name: String,
    admin_type: String,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = AppError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        let role = Role::from_admin_type(&row.admin_type).ok_or_else(|| {
            AppError::internal(
                "Unknown account type",
                json!({ "admin_id": row.admin_id, "admin_type": row.admin_type }),
            )
        })?;

        Ok(Identity {
            user_id: row.admin_id,
            username: row.admin_name,
            role,
        })
    }
}

#[derive(FromRow)]
struct SessionRow {
    id: i64,
    admin_id: i64,
    admin_name: String,
    label: String,
    token_hash: String,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    revoked_at: Option<DateTime<Utc>>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            admin_id: row.admin_id,
            admin_name: row.admin_name,
            label: row.label,
            token_hash: row.token_hash,
            created_at: row.created_at,
            last_used_at: row.last_used_at,
            revoked_at: row.revoked_at,
        }
    }
}

const SESSION_COLUMNS: &str = r#"
    s.id, s.admin_id, a.admin_name, s.label, s.token_hash,
    s.created_at, s.last_used_at, s.revoked_at
"#;

/// PostgreSQL repository for login sessions.
///
/// Stores HMAC hashes of session tokens. Raw tokens are never persisted.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn find_identity(&self, token_hash: &str) -> Result<Option<Identity>, AppError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT a.admin_id, a.admin_name, a.admin_type
            FROM sessions s
            JOIN admin a ON a.admin_id = s.admin_id
            WHERE s.token_hash = $1
              AND s.revoked_at IS NULL
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Identity::try_from).transpose()
    }

    async fn touch(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE sessions
            SET last_used_at = NOW()
            WHERE token_hash = $1
              AND revoked_at IS NULL
            "#,
        )
        .bind(token_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_account(&self, admin_name: &str) -> Result<Option<Identity>, AppError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT admin_id, admin_name, admin_type
            FROM admin
            WHERE admin_name = $1
            "#,
        )
        .bind(admin_name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Identity::try_from).transpose()
    }

    async fn create_session(
        &self,
        admin_id: i64,
        label: &str,
        token_hash: &str,
    ) -> Result<Session, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            r#"
            WITH s AS (
                INSERT INTO sessions (admin_id, label, token_hash)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {SESSION_COLUMNS}
            FROM s
            JOIN admin a ON a.admin_id = s.admin_id
            "#
        ))
        .bind(admin_id)
        .bind(label)
        .bind(token_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, AppError> {
        let rows = sqlx::query_as::<_, SessionRow>(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM sessions s
            JOIN admin a ON a.admin_id = s.admin_id
            ORDER BY s.created_at DESC, s.id DESC
            "#
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Session::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Session>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM sessions s
            JOIN admin a ON a.admin_id = s.admin_id
            WHERE s.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Session::from))
    }

    async fn find_by_label(&self, label: &str) -> Result<Option<Session>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM sessions s
            JOIN admin a ON a.admin_id = s.admin_id
            WHERE s.label = $1
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT 1
            "#
        ))
        .bind(label)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Session::from))
    }

    async fn revoke_session(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE sessions
            SET revoked_at = NOW()
            WHERE id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn revoke_by_hash(&self, token_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET revoked_at = NOW()
            WHERE token_hash = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
