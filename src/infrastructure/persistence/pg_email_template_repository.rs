//! PostgreSQL implementation of the email template repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{EmailTemplate, TemplateKind, TemplateUpdate};
use crate::domain::repositories::EmailTemplateRepository;
use crate::error::AppError;
use serde_json::json;

#[derive(FromRow)]
struct TemplateRow {
    sender_email: String,
    sender_name: String,
    subject: Option<String>,
    message: Option<String>,
}

/// PostgreSQL repository for per-owner email templates (`email_tpls`).
///
/// Sender fields are read from the owner's `admin` row on every load.
pub struct PgEmailTemplateRepository {
    pool: Arc<PgPool>,
}

impl PgEmailTemplateRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailTemplateRepository for PgEmailTemplateRepository {
    async fn get(&self, owner_id: i64, kind: TemplateKind) -> Result<EmailTemplate, AppError> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r#"
            SELECT a.email AS sender_email,
                   COALESCE(NULLIF(TRIM(CONCAT_WS(' ', a.fname, a.lname)), ''), a.admin_name) AS sender_name,
                   t.subject,
                   t.message
            FROM admin a
            LEFT JOIN email_tpls t ON t.owner_id = a.admin_id AND t.name = $2
            WHERE a.admin_id = $1
            "#,
        )
        .bind(owner_id)
        .bind(kind.storage_name())
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("Account not found", json!({ "owner_id": owner_id })))?;

        let mut template = EmailTemplate::default_for(kind, row.sender_email, row.sender_name);
        if let (Some(subject), Some(message)) = (row.subject, row.message) {
            template.apply(&TemplateUpdate { subject, message });
        }

        Ok(template)
    }

    async fn save_both(
        &self,
        owner_id: i64,
        activation: &TemplateUpdate,
        lost_password: &TemplateUpdate,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for (kind, update) in [
            (TemplateKind::Activation, activation),
            (TemplateKind::LostPassword, lost_password),
        ] {
            sqlx::query(
                r#"
                INSERT INTO email_tpls (owner_id, name, subject, message)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (owner_id, name)
                DO UPDATE SET subject = EXCLUDED.subject,
                              message = EXCLUDED.message,
                              updated_at = NOW()
                "#,
            )
            .bind(owner_id)
            .bind(kind.storage_name())
            .bind(&update.subject)
            .bind(&update.message)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
