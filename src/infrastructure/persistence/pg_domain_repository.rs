//! PostgreSQL implementation of the domain repository and account lifecycle.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{DomainRecord, DomainStatus, DomainSummary, StatusAction};
use crate::domain::repositories::{AccountLifecycle, DomainRepository};
use crate::error::AppError;
use serde_json::json;

#[derive(FromRow)]
struct DomainRow {
    domain_id: i64,
    domain_name: String,
    domain_admin_id: i64,
    domain_status: String,
}

impl From<DomainRow> for DomainRecord {
    fn from(row: DomainRow) -> Self {
        DomainRecord {
            id: row.domain_id,
            name: row.domain_name,
            admin_id: row.domain_admin_id,
            status: DomainStatus::parse(&row.domain_status),
        }
    }
}

#[derive(FromRow)]
struct DomainSummaryRow {
    domain_id: i64,
    domain_name: String,
    domain_admin_id: i64,
    admin_name: String,
    domain_status: String,
}

impl From<DomainSummaryRow> for DomainSummary {
    fn from(row: DomainSummaryRow) -> Self {
        DomainSummary {
            id: row.domain_id,
            name: row.domain_name,
            admin_id: row.domain_admin_id,
            admin_name: row.admin_name,
            status: DomainStatus::parse(&row.domain_status),
        }
    }
}

/// PostgreSQL repository for hosted domains.
pub struct PgDomainRepository {
    pool: Arc<PgPool>,
}

impl PgDomainRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainRepository for PgDomainRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<DomainRecord>, AppError> {
        let row = sqlx::query_as::<_, DomainRow>(
            r#"
            SELECT domain_id, domain_name, domain_admin_id, domain_status
            FROM domain
            WHERE domain_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(DomainRecord::from))
    }

    async fn list(&self) -> Result<Vec<DomainSummary>, AppError> {
        let rows = sqlx::query_as::<_, DomainSummaryRow>(
            r#"
            SELECT d.domain_id, d.domain_name, d.domain_admin_id, a.admin_name, d.domain_status
            FROM domain d
            JOIN admin a ON a.admin_id = d.domain_admin_id
            ORDER BY d.domain_name
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(DomainSummary::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

/// PostgreSQL implementation of the account lifecycle.
///
/// Writes pending statuses (`todisable` / `toenable`) that the provisioning
/// backend turns into `disabled` / `ok` once the change is applied on the
/// servers. Only rows currently in the action's source status are touched;
/// domains, subdomains and aliases in any other status keep it.
pub struct PgAccountLifecycle {
    pool: Arc<PgPool>,
}

impl PgAccountLifecycle {
    /// Creates a new lifecycle handler with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountLifecycle for PgAccountLifecycle {
    async fn change_domain_status(
        &self,
        account_id: i64,
        action: StatusAction,
    ) -> Result<(), AppError> {
        let from = action.source_status();
        let to = action.pending_status();

        let mut tx = self.pool.begin().await?;

        let domains = sqlx::query(
            r#"
            UPDATE domain SET domain_status = $3, updated_at = NOW()
            WHERE domain_admin_id = $1 AND domain_status = $2
            "#,
        )
        .bind(account_id)
        .bind(from)
        .bind(to)
        .execute(&mut *tx)
        .await?;

        if domains.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::internal(
                "Account owns no domain",
                json!({ "account_id": account_id, "action": action.as_str() }),
            ));
        }

        let subdomains = sqlx::query(
            r#"
            UPDATE subdomain SET subdomain_status = $3
            WHERE subdomain_status = $2
              AND domain_id IN (SELECT domain_id FROM domain WHERE domain_admin_id = $1)
            "#,
        )
        .bind(account_id)
        .bind(from)
        .bind(to)
        .execute(&mut *tx)
        .await?;

        let aliases = sqlx::query(
            r#"
            UPDATE domain_aliases SET alias_status = $3
            WHERE alias_status = $2
              AND domain_id IN (SELECT domain_id FROM domain WHERE domain_admin_id = $1)
            "#,
        )
        .bind(account_id)
        .bind(from)
        .bind(to)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            account_id,
            %action,
            domains = domains.rows_affected(),
            subdomains = subdomains.rows_affected(),
            aliases = aliases.rows_affected(),
            "Pending status written"
        );

        Ok(())
    }
}
