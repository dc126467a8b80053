//! Repository traits for hosted domains and the account lifecycle.

use crate::domain::entities::{DomainRecord, DomainSummary, StatusAction};
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the `domain` table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDomainRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Finds a domain by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<DomainRecord>, AppError>;

    /// Lists all domains with their owner's login name, ordered by domain name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<DomainSummary>, AppError>;

    /// Round-trips a trivial query to check store availability.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database does not answer.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Account lifecycle operations carried out on behalf of a customer account.
///
/// The panel only decides *which* action to request. Implementations write
/// whatever state the provisioning backend needs to carry it out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountLifecycle: Send + Sync {
    /// Requests activation or deactivation of all domains owned by `account_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the account owns no domain or on
    /// database errors.
    async fn change_domain_status(
        &self,
        account_id: i64,
        action: StatusAction,
    ) -> Result<(), AppError>;
}
