#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use hosting_panel::application::hooks::{ScriptEvent, ScriptHooks, ScriptListener};
use hosting_panel::application::services::{
    AuthService, DomainStatusService, EmailTemplateService, hash_session_token,
};
use hosting_panel::domain::entities::{
    DomainRecord, DomainStatus, DomainSummary, EmailTemplate, Identity, Role, Session,
    StatusAction, TemplateKind, TemplateUpdate,
};
use hosting_panel::domain::repositories::{
    AccountLifecycle, DomainRepository, EmailTemplateRepository, SessionRepository,
};
use hosting_panel::error::AppError;
use hosting_panel::state::AppState;
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const SIGNING_SECRET: &str = "test-signing-secret";

pub const ADMIN_ID: i64 = 1;
pub const RESELLER_ID: i64 = 2;
pub const CLIENT_ID: i64 = 3;

pub fn admin() -> Identity {
    Identity {
        user_id: ADMIN_ID,
        username: "admin".to_string(),
        role: Role::Admin,
    }
}

pub fn reseller() -> Identity {
    Identity {
        user_id: RESELLER_ID,
        username: "reseller1".to_string(),
        role: Role::Reseller,
    }
}

pub fn client() -> Identity {
    Identity {
        user_id: CLIENT_ID,
        username: "client1".to_string(),
        role: Role::Client,
    }
}

// ─── In-memory repositories ──────────────────────────────────────────────────

/// Domains shared by the repository and lifecycle fakes, so a toggle is
/// visible on the next listing.
#[derive(Default)]
pub struct InMemoryDomains {
    pub domains: Mutex<Vec<DomainSummary>>,
    pub requests: Mutex<Vec<(i64, StatusAction)>>,
    pub unavailable: bool,
}

impl InMemoryDomains {
    pub fn with(domains: Vec<DomainSummary>) -> Self {
        Self {
            domains: Mutex::new(domains),
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn status_of(&self, id: i64) -> Option<String> {
        self.domains
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.status.as_str().to_string())
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }
}

pub fn domain(id: i64, name: &str, admin_id: i64, status: &str) -> DomainSummary {
    DomainSummary {
        id,
        name: name.to_string(),
        admin_id,
        admin_name: format!("customer{admin_id}"),
        status: DomainStatus::parse(status),
    }
}

#[async_trait]
impl DomainRepository for InMemoryDomains {
    async fn find_by_id(&self, id: i64) -> Result<Option<DomainRecord>, AppError> {
        self.check_available()?;
        Ok(self
            .domains
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .map(|d| DomainRecord {
                id: d.id,
                name: d.name.clone(),
                admin_id: d.admin_id,
                status: d.status.clone(),
            }))
    }

    async fn list(&self) -> Result<Vec<DomainSummary>, AppError> {
        self.check_available()?;
        let mut domains = self.domains.lock().unwrap().clone();
        domains.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(domains)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }
}

#[async_trait]
impl AccountLifecycle for InMemoryDomains {
    async fn change_domain_status(
        &self,
        account_id: i64,
        action: StatusAction,
    ) -> Result<(), AppError> {
        self.check_available()?;
        let mut domains = self.domains.lock().unwrap();
        let mut touched = 0;
        let from = DomainStatus::parse(action.source_status());
        for d in domains
            .iter_mut()
            .filter(|d| d.admin_id == account_id && d.status == from)
        {
            d.status = DomainStatus::parse(action.pending_status());
            touched += 1;
        }
        if touched == 0 {
            return Err(AppError::internal("Account owns no domain", json!({})));
        }
        self.requests.lock().unwrap().push((account_id, action));
        Ok(())
    }
}

/// Email templates keyed by owner and kind; owners must be registered.
#[derive(Default)]
pub struct InMemoryTemplates {
    pub owners: HashMap<i64, (String, String)>,
    pub stored: Mutex<HashMap<(i64, TemplateKind), TemplateUpdate>>,
}

impl InMemoryTemplates {
    pub fn with_owner(owner_id: i64, email: &str, name: &str) -> Self {
        let mut owners = HashMap::new();
        owners.insert(owner_id, (email.to_string(), name.to_string()));
        Self {
            owners,
            ..Self::default()
        }
    }

    pub fn stored(&self, owner_id: i64, kind: TemplateKind) -> Option<TemplateUpdate> {
        self.stored.lock().unwrap().get(&(owner_id, kind)).cloned()
    }
}

#[async_trait]
impl EmailTemplateRepository for InMemoryTemplates {
    async fn get(&self, owner_id: i64, kind: TemplateKind) -> Result<EmailTemplate, AppError> {
        let (email, name) = self
            .owners
            .get(&owner_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Owner not found", json!({})))?;

        let mut template = EmailTemplate::default_for(kind, email, name);
        if let Some(update) = self.stored(owner_id, kind) {
            template.apply(&update);
        }
        Ok(template)
    }

    async fn save_both(
        &self,
        owner_id: i64,
        activation: &TemplateUpdate,
        lost_password: &TemplateUpdate,
    ) -> Result<(), AppError> {
        let mut stored = self.stored.lock().unwrap();
        stored.insert((owner_id, TemplateKind::Activation), activation.clone());
        stored.insert((owner_id, TemplateKind::LostPassword), lost_password.clone());
        Ok(())
    }
}

/// Accounts plus sessions keyed by token hash.
#[derive(Default)]
pub struct InMemorySessions {
    pub accounts: Vec<Identity>,
    pub sessions: Mutex<Vec<Session>>,
}

impl InMemorySessions {
    pub fn with_accounts(accounts: Vec<Identity>) -> Self {
        Self {
            accounts,
            ..Self::default()
        }
    }

    /// Registers `token` for `account` the way the admin CLI does.
    pub fn issue(&self, account: &Identity, token: &str) {
        let mut sessions = self.sessions.lock().unwrap();
        let id = sessions.len() as i64 + 1;
        sessions.push(Session {
            id,
            admin_id: account.user_id,
            admin_name: account.username.clone(),
            label: format!("session-{id}"),
            token_hash: hash_session_token(SIGNING_SECRET, token),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        });
    }

    fn account(&self, admin_id: i64) -> Option<Identity> {
        self.accounts.iter().find(|a| a.user_id == admin_id).cloned()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn find_identity(&self, token_hash: &str) -> Result<Option<Identity>, AppError> {
        let admin_id = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.token_hash == token_hash && !s.is_revoked())
            .map(|s| s.admin_id);
        Ok(admin_id.and_then(|id| self.account(id)))
    }

    async fn touch(&self, token_hash: &str) -> Result<(), AppError> {
        if let Some(s) = self
            .sessions
            .lock()
            .unwrap()
            .iter_mut()
            .find(|s| s.token_hash == token_hash)
        {
            s.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn find_account(&self, admin_name: &str) -> Result<Option<Identity>, AppError> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.username == admin_name)
            .cloned())
    }

    async fn create_session(
        &self,
        admin_id: i64,
        label: &str,
        token_hash: &str,
    ) -> Result<Session, AppError> {
        let account = self
            .account(admin_id)
            .ok_or_else(|| AppError::not_found("Account not found", json!({})))?;
        let mut sessions = self.sessions.lock().unwrap();
        let session = Session {
            id: sessions.len() as i64 + 1,
            admin_id,
            admin_name: account.username,
            label: label.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        sessions.push(session.clone());
        Ok(session)
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, AppError> {
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Session>, AppError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_by_label(&self, label: &str) -> Result<Option<Session>, AppError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.label == label)
            .cloned())
    }

    async fn revoke_session(&self, id: i64) -> Result<(), AppError> {
        if let Some(s) = self
            .sessions
            .lock()
            .unwrap()
            .iter_mut()
            .find(|s| s.id == id)
        {
            s.revoked_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn revoke_by_hash(&self, token_hash: &str) -> Result<bool, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let Some(s) = sessions
            .iter_mut()
            .find(|s| s.token_hash == token_hash && !s.is_revoked())
        else {
            return Ok(false);
        };
        s.revoked_at = Some(Utc::now());
        Ok(true)
    }
}

/// Records every script event in order.
#[derive(Default)]
pub struct EventLog(Mutex<Vec<ScriptEvent>>);

impl EventLog {
    pub fn events(&self) -> Vec<ScriptEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl ScriptListener for EventLog {
    fn on_event(&self, event: &ScriptEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

// ─── State builders ──────────────────────────────────────────────────────────

/// Handles to the fakes behind a test state.
pub struct TestBackend {
    pub domains: Arc<InMemoryDomains>,
    pub templates: Arc<InMemoryTemplates>,
    pub sessions: Arc<InMemorySessions>,
}

impl Default for TestBackend {
    fn default() -> Self {
        Self {
            domains: Arc::new(InMemoryDomains::default()),
            templates: Arc::new(InMemoryTemplates::with_owner(
                RESELLER_ID,
                "reseller1@example.com",
                "Jane Doe",
            )),
            sessions: Arc::new(InMemorySessions::with_accounts(vec![
                admin(),
                reseller(),
                client(),
            ])),
        }
    }
}

impl TestBackend {
    pub fn with_domains(domains: Vec<DomainSummary>) -> Self {
        Self {
            domains: Arc::new(InMemoryDomains::with(domains)),
            ..Self::default()
        }
    }

    pub fn state(&self) -> AppState {
        self.state_with_hooks(ScriptHooks::with_tracing())
    }

    pub fn state_with_hooks(&self, hooks: ScriptHooks) -> AppState {
        let auth_service = Arc::new(AuthService::new(
            self.sessions.clone(),
            SIGNING_SECRET.to_string(),
        ));
        let domain_status_service = Arc::new(DomainStatusService::new(
            self.domains.clone(),
            self.domains.clone(),
        ));
        let email_template_service = Arc::new(EmailTemplateService::new(self.templates.clone()));

        AppState::new(
            auth_service,
            domain_status_service,
            email_template_service,
            Arc::new(hooks),
            false,
        )
    }
}

// ─── Database fixtures ───────────────────────────────────────────────────────

pub async fn create_test_account(
    pool: &PgPool,
    name: &str,
    admin_type: &str,
    created_by: Option<i64>,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO admin (admin_name, admin_type, created_by, fname, lname, email)
        VALUES ($1, $2, $3, 'Jane', 'Doe', $1 || '@example.com')
        RETURNING admin_id
        "#,
    )
    .bind(name)
    .bind(admin_type)
    .bind(created_by)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_domain(pool: &PgPool, name: &str, admin_id: i64, status: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO domain (domain_name, domain_admin_id, domain_status)
        VALUES ($1, $2, $3)
        RETURNING domain_id
        "#,
    )
    .bind(name)
    .bind(admin_id)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_subdomain(pool: &PgPool, domain_id: i64, name: &str, status: &str) {
    sqlx::query(
        "INSERT INTO subdomain (domain_id, subdomain_name, subdomain_status) VALUES ($1, $2, $3)",
    )
    .bind(domain_id)
    .bind(name)
    .bind(status)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_test_alias(pool: &PgPool, domain_id: i64, name: &str, status: &str) {
    sqlx::query(
        "INSERT INTO domain_aliases (domain_id, alias_name, alias_status) VALUES ($1, $2, $3)",
    )
    .bind(domain_id)
    .bind(name)
    .bind(status)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn domain_status(pool: &PgPool, domain_id: i64) -> String {
    sqlx::query_scalar("SELECT domain_status FROM domain WHERE domain_id = $1")
        .bind(domain_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn subdomain_status(pool: &PgPool, name: &str) -> String {
    sqlx::query_scalar("SELECT subdomain_status FROM subdomain WHERE subdomain_name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn alias_status(pool: &PgPool, name: &str) -> String {
    sqlx::query_scalar("SELECT alias_status FROM domain_aliases WHERE alias_name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}
