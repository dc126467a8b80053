//! Domain status toggle and users listing.

use crate::domain::entities::{DomainSummary, StatusAction};
use crate::domain::repositories::{AccountLifecycle, DomainRepository};
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Flips a customer's domains between `ok` and `disabled`.
///
/// The next action is derived from the stored status only: `ok` requests a
/// deactivation, `disabled` an activation. Any other status is rejected
/// without touching the account.
pub struct DomainStatusService {
    domains: Arc<dyn DomainRepository>,
    lifecycle: Arc<dyn AccountLifecycle>,
}

impl DomainStatusService {
    /// Creates a new domain status service.
    pub fn new(domains: Arc<dyn DomainRepository>, lifecycle: Arc<dyn AccountLifecycle>) -> Self {
        Self { domains, lifecycle }
    }

    /// Toggles the status of the account owning `domain_id`.
    ///
    /// Returns the action that was requested.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the domain does not exist or its
    /// status is neither `ok` nor `disabled`.
    /// Propagates lifecycle and database errors unchanged.
    pub async fn toggle(&self, domain_id: i64) -> Result<StatusAction, AppError> {
        let domain = self.domains.find_by_id(domain_id).await?.ok_or_else(|| {
            AppError::bad_request("Unknown domain", json!({ "domain_id": domain_id }))
        })?;

        let Some(action) = domain.status.toggle_action() else {
            return Err(AppError::bad_request(
                "Domain status cannot be toggled",
                json!({ "domain_id": domain_id, "status": domain.status.as_str() }),
            ));
        };

        self.lifecycle
            .change_domain_status(domain.admin_id, action)
            .await?;

        tracing::info!(
            domain_id,
            domain = %domain.name,
            admin_id = domain.admin_id,
            %action,
            "Domain status change requested"
        );

        Ok(action)
    }

    /// Lists all domains with their owners.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_domains(&self) -> Result<Vec<DomainSummary>, AppError> {
        self.domains.list().await
    }

    /// Checks that the store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database is unreachable.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.domains.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DomainRecord, DomainStatus};
    use crate::domain::repositories::{MockAccountLifecycle, MockDomainRepository};

    fn record(id: i64, admin_id: i64, status: &str) -> DomainRecord {
        DomainRecord {
            id,
            name: format!("domain{id}.example"),
            admin_id,
            status: DomainStatus::parse(status),
        }
    }

    fn repo_returning(record: Option<DomainRecord>) -> MockDomainRepository {
        let mut mock_repo = MockDomainRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(record.clone()));
        mock_repo
    }

    #[tokio::test]
    async fn test_toggle_ok_deactivates_owner() {
        let mock_repo = repo_returning(Some(record(10, 42, "ok")));

        let mut mock_lifecycle = MockAccountLifecycle::new();
        mock_lifecycle
            .expect_change_domain_status()
            .withf(|account_id, action| *account_id == 42 && *action == StatusAction::Deactivate)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = DomainStatusService::new(Arc::new(mock_repo), Arc::new(mock_lifecycle));

        let result = service.toggle(10).await;

        assert_eq!(result.unwrap(), StatusAction::Deactivate);
    }

    #[tokio::test]
    async fn test_toggle_disabled_activates_owner() {
        let mock_repo = repo_returning(Some(record(11, 7, "disabled")));

        let mut mock_lifecycle = MockAccountLifecycle::new();
        mock_lifecycle
            .expect_change_domain_status()
            .withf(|account_id, action| *account_id == 7 && *action == StatusAction::Activate)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = DomainStatusService::new(Arc::new(mock_repo), Arc::new(mock_lifecycle));

        let result = service.toggle(11).await;

        assert_eq!(result.unwrap(), StatusAction::Activate);
    }

    #[tokio::test]
    async fn test_toggle_unknown_domain_is_bad_request() {
        let mock_repo = repo_returning(None);

        let mut mock_lifecycle = MockAccountLifecycle::new();
        mock_lifecycle.expect_change_domain_status().times(0);

        let service = DomainStatusService::new(Arc::new(mock_repo), Arc::new(mock_lifecycle));

        let result = service.toggle(999).await;

        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_toggle_transitional_status_is_bad_request() {
        for status in ["toadd", "tochange", "todisable", "toenable", "some error"] {
            let mock_repo = repo_returning(Some(record(12, 3, status)));

            let mut mock_lifecycle = MockAccountLifecycle::new();
            mock_lifecycle.expect_change_domain_status().times(0);

            let service =
                DomainStatusService::new(Arc::new(mock_repo), Arc::new(mock_lifecycle));

            let result = service.toggle(12).await;

            assert!(
                matches!(result, Err(AppError::BadRequest { .. })),
                "status {status} must not be toggled"
            );
        }
    }

    #[tokio::test]
    async fn test_toggle_propagates_lifecycle_failure() {
        let mock_repo = repo_returning(Some(record(13, 5, "ok")));

        let mut mock_lifecycle = MockAccountLifecycle::new();
        mock_lifecycle
            .expect_change_domain_status()
            .times(1)
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let service = DomainStatusService::new(Arc::new(mock_repo), Arc::new(mock_lifecycle));

        let result = service.toggle(13).await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_list_domains() {
        let mut mock_repo = MockDomainRepository::new();
        mock_repo.expect_list().times(1).returning(|| {
            Ok(vec![DomainSummary {
                id: 1,
                name: "a.example".to_string(),
                admin_id: 2,
                admin_name: "customer".to_string(),
                status: DomainStatus::Ok,
            }])
        });

        let service =
            DomainStatusService::new(Arc::new(mock_repo), Arc::new(MockAccountLifecycle::new()));

        let list = service.list_domains().await.unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].admin_name, "customer");
    }
}
