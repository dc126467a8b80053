//! Lost password email template editing.

use crate::application::messages::PageMessages;
use crate::domain::entities::{LostPasswordTemplates, TemplateKind, TemplateUpdate};
use crate::domain::repositories::EmailTemplateRepository;
use crate::error::AppError;
use crate::utils::input::clean_input;
use std::sync::Arc;
use validator::Validate;

pub const SUBJECT_REQUIRED: &str = "You must specify a subject.";
pub const MESSAGE_REQUIRED: &str = "You must specify a message.";
pub const TEMPLATES_UPDATED: &str = "Lost password email templates were updated.";

/// Raw fields posted by the lost password settings form.
///
/// `1` is the activation email, `2` the lost password email.
#[derive(Debug, Clone, Default, Validate)]
pub struct TemplateSubmission {
    #[validate(length(min = 1))]
    pub subject1: String,
    #[validate(length(min = 1))]
    pub message1: String,
    #[validate(length(min = 1))]
    pub subject2: String,
    #[validate(length(min = 1))]
    pub message2: String,
}

impl TemplateSubmission {
    fn cleaned(self) -> Self {
        Self {
            subject1: clean_input(&self.subject1),
            message1: clean_input(&self.message1),
            subject2: clean_input(&self.subject2),
            message2: clean_input(&self.message2),
        }
    }

    /// Every rule is checked so the submitter sees all violations at once.
    fn violations(&self) -> Vec<&'static str> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };

        let fields = errors.field_errors();
        let mut violations = Vec::new();

        if fields.contains_key("subject1") || fields.contains_key("subject2") {
            violations.push(SUBJECT_REQUIRED);
        }
        if fields.contains_key("message1") || fields.contains_key("message2") {
            violations.push(MESSAGE_REQUIRED);
        }

        violations
    }

    fn activation(&self) -> TemplateUpdate {
        TemplateUpdate {
            subject: self.subject1.clone(),
            message: self.message1.clone(),
        }
    }

    fn lost_password(&self) -> TemplateUpdate {
        TemplateUpdate {
            subject: self.subject2.clone(),
            message: self.message2.clone(),
        }
    }
}

/// What the settings form shows after a load or a submission.
#[derive(Debug, Clone)]
pub struct TemplateForm {
    pub templates: LostPasswordTemplates,
    pub messages: PageMessages,
    pub saved: bool,
}

/// Loads and updates the two lost password templates of an owner.
pub struct EmailTemplateService {
    repository: Arc<dyn EmailTemplateRepository>,
}

impl EmailTemplateService {
    /// Creates a new email template service.
    pub fn new(repository: Arc<dyn EmailTemplateRepository>) -> Self {
        Self { repository }
    }

    /// Loads the stored templates of `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn load(&self, owner_id: i64) -> Result<LostPasswordTemplates, AppError> {
        Ok(LostPasswordTemplates {
            activation: self
                .repository
                .get(owner_id, TemplateKind::Activation)
                .await?,
            lost_password: self
                .repository
                .get(owner_id, TemplateKind::LostPassword)
                .await?,
        })
    }

    /// Renders the form for `owner_id` without changes.
    ///
    /// # Errors
    ///
    /// See [`EmailTemplateService::load`].
    pub async fn render(&self, owner_id: i64) -> Result<TemplateForm, AppError> {
        Ok(TemplateForm {
            templates: self.load(owner_id).await?,
            messages: PageMessages::default(),
            saved: false,
        })
    }

    /// Validates a submission and stores it when valid.
    ///
    /// Validation failures are not errors: they come back as page messages
    /// together with the submitted values, and nothing is persisted. Sender
    /// fields are always those of the stored templates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn submit(
        &self,
        owner_id: i64,
        submission: TemplateSubmission,
    ) -> Result<TemplateForm, AppError> {
        let submission = submission.cleaned();
        let mut templates = self.load(owner_id).await?;

        let activation = submission.activation();
        let lost_password = submission.lost_password();
        templates.activation.apply(&activation);
        templates.lost_password.apply(&lost_password);

        let mut messages = PageMessages::default();
        for violation in submission.violations() {
            messages.error(violation);
        }

        if messages.has_errors() {
            tracing::debug!(owner_id, errors = ?messages.errors, "Template submission rejected");
            return Ok(TemplateForm {
                templates,
                messages,
                saved: false,
            });
        }

        self.repository
            .save_both(owner_id, &activation, &lost_password)
            .await?;

        tracing::info!(owner_id, "Lost password email templates updated");
        messages.notice(TEMPLATES_UPDATED);

        Ok(TemplateForm {
            templates,
            messages,
            saved: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EmailTemplate;
    use crate::domain::repositories::MockEmailTemplateRepository;

    fn stored(kind: TemplateKind) -> EmailTemplate {
        EmailTemplate {
            subject: format!("stored subject {}", kind.storage_name()),
            message: format!("stored message {}", kind.storage_name()),
            sender_email: "reseller@example.com".to_string(),
            sender_name: "Jane Reseller".to_string(),
        }
    }

    fn repo_with_stored_templates() -> MockEmailTemplateRepository {
        let mut mock_repo = MockEmailTemplateRepository::new();
        mock_repo
            .expect_get()
            .withf(|owner_id, _| *owner_id == 5)
            .returning(|_, kind| Ok(stored(kind)));
        mock_repo
    }

    fn submission(subject1: &str, message1: &str, subject2: &str, message2: &str) -> TemplateSubmission {
        TemplateSubmission {
            subject1: subject1.to_string(),
            message1: message1.to_string(),
            subject2: subject2.to_string(),
            message2: message2.to_string(),
        }
    }

    #[tokio::test]
    async fn test_render_loads_both_templates() {
        let service = EmailTemplateService::new(Arc::new(repo_with_stored_templates()));

        let form = service.render(5).await.unwrap();

        assert_eq!(form.templates.activation, stored(TemplateKind::Activation));
        assert_eq!(
            form.templates.lost_password,
            stored(TemplateKind::LostPassword)
        );
        assert!(form.messages.is_empty());
        assert!(!form.saved);
    }

    #[tokio::test]
    async fn test_submit_empty_subject_rejected_without_persistence() {
        let mut mock_repo = repo_with_stored_templates();
        mock_repo.expect_save_both().times(0);

        let service = EmailTemplateService::new(Arc::new(mock_repo));

        let form = service.submit(5, submission("", "x", "y", "z")).await.unwrap();

        assert_eq!(form.messages.errors, vec![SUBJECT_REQUIRED.to_string()]);
        assert!(form.messages.notices.is_empty());
        assert!(!form.saved);
    }

    #[tokio::test]
    async fn test_submit_reports_all_violations() {
        let mut mock_repo = repo_with_stored_templates();
        mock_repo.expect_save_both().times(0);

        let service = EmailTemplateService::new(Arc::new(mock_repo));

        let form = service
            .submit(5, submission("a", "", "", "d"))
            .await
            .unwrap();

        assert_eq!(
            form.messages.errors,
            vec![SUBJECT_REQUIRED.to_string(), MESSAGE_REQUIRED.to_string()]
        );
    }

    #[tokio::test]
    async fn test_submit_whitespace_only_counts_as_empty() {
        let mut mock_repo = repo_with_stored_templates();
        mock_repo.expect_save_both().times(0);

        let service = EmailTemplateService::new(Arc::new(mock_repo));

        let form = service
            .submit(5, submission("a", "b", "c", "  \r\n "))
            .await
            .unwrap();

        assert_eq!(form.messages.errors, vec![MESSAGE_REQUIRED.to_string()]);
    }

    #[tokio::test]
    async fn test_rejected_submission_rerenders_submitted_values() {
        let mut mock_repo = repo_with_stored_templates();
        mock_repo.expect_save_both().times(0);

        let service = EmailTemplateService::new(Arc::new(mock_repo));

        let form = service
            .submit(5, submission("", "typed body", "typed subject", "other"))
            .await
            .unwrap();

        assert_eq!(form.templates.activation.subject, "");
        assert_eq!(form.templates.activation.message, "typed body");
        assert_eq!(form.templates.lost_password.subject, "typed subject");
        assert_eq!(
            form.templates.activation.sender_email,
            "reseller@example.com"
        );
    }

    #[tokio::test]
    async fn test_submit_valid_persists_both_templates() {
        let mut mock_repo = repo_with_stored_templates();
        mock_repo
            .expect_save_both()
            .withf(|owner_id, activation, lost_password| {
                *owner_id == 5
                    && activation.subject == "Activate"
                    && activation.message == "Click {LINK}"
                    && lost_password.subject == "Password"
                    && lost_password.message == "Your password: {PASSWORD}"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = EmailTemplateService::new(Arc::new(mock_repo));

        let form = service
            .submit(
                5,
                submission(
                    " Activate ",
                    "Click {LINK}\r\n",
                    "Password",
                    "Your password: {PASSWORD}",
                ),
            )
            .await
            .unwrap();

        assert!(form.saved);
        assert!(form.messages.errors.is_empty());
        assert_eq!(form.messages.notices, vec![TEMPLATES_UPDATED.to_string()]);
        assert_eq!(form.templates.activation.subject, "Activate");
        assert_eq!(form.templates.lost_password.message, "Your password: {PASSWORD}");
        assert_eq!(form.templates.lost_password.sender_name, "Jane Reseller");
    }

    #[tokio::test]
    async fn test_submit_propagates_store_failure() {
        let mut mock_repo = repo_with_stored_templates();
        mock_repo
            .expect_save_both()
            .times(1)
            .returning(|_, _, _| Err(AppError::internal("Database error", serde_json::json!({}))));

        let service = EmailTemplateService::new(Arc::new(mock_repo));

        let result = service.submit(5, submission("a", "b", "c", "d")).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
