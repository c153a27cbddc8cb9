//! Mailbox Client Implementation

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use mailboxctl_core::application::{RpcClient, SessionService, SessionState};
use mailboxctl_core::domain::Credentials;
use mailboxctl_core::error::Result;
use mailboxctl_core::port::{SessionStore, Transport};
use mailboxctl_infra_file::{default_auth_path, FileSessionStore};
use mailboxctl_infra_http::{HttpTransport, DEFAULT_API_URL};

use crate::types::{
    DomainAddRequest, MailAddRequest, MailBackupImportRequest, MailRegisterRequest,
    SpamProtectSettings,
};

/// Connection settings for the production client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub auth_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_file: default_auth_path(),
        }
    }
}

/// High-level client: session lifecycle plus one method per admin operation.
///
/// Every operation is a uniform call-site over [`RpcClient::call`]; payloads
/// come back as dynamic [`Value`]s and callers own their shape assumptions.
pub struct MailboxClient {
    session: SessionService,
    rpc: RpcClient,
}

impl MailboxClient {
    /// Wire the client against the real auth file and HTTPS transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(config.auth_file));
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(config.api_url)?);
        Ok(Self::from_parts(store, transport))
    }

    /// Wire the client from explicit port implementations (tests, embedding)
    pub fn from_parts(store: Arc<dyn SessionStore>, transport: Arc<dyn Transport>) -> Self {
        let session = SessionService::new(store, transport.clone());
        let rpc = RpcClient::new(session.clone(), transport);
        Self { session, rpc }
    }

    // --- session lifecycle --------------------------------------------------

    /// Log in and persist the session record
    pub async fn authenticate(&self, user: &str, pass: &str) -> Result<Credentials> {
        self.session.authenticate(user, pass).await
    }

    /// Log out remotely (best effort) and delete the local session record.
    /// Returns the remote call's reported outcome.
    pub async fn deauthenticate(&self) -> Result<bool> {
        self.session.deauthenticate().await
    }

    pub fn session_state(&self) -> Result<SessionState> {
        self.session.state()
    }

    /// Login identity used by operations acting as the authenticated account
    pub fn current_account(&self) -> Result<String> {
        self.session.current_account()
    }

    pub fn current_level(&self) -> Result<String> {
        self.session.current_level()
    }

    // --- account ------------------------------------------------------------

    pub async fn account_add(
        &self,
        account: &str,
        password: &str,
        plan: &str,
        memo: &str,
    ) -> Result<Value> {
        self.rpc
            .call(
                "account.add",
                json!({ "account": account, "password": password, "plan": plan, "memo": memo }),
            )
            .await
    }

    /// Delete the authenticated account
    pub async fn account_del(&self) -> Result<Value> {
        let account = self.session.current_account()?;
        self.rpc.call("account.del", json!({ "account": account })).await
    }

    pub async fn account_get(&self) -> Result<Value> {
        let account = self.session.current_account()?;
        self.rpc.call("account.get", json!({ "account": account })).await
    }

    pub async fn account_list(&self) -> Result<Value> {
        self.rpc.call("account.list", json!({})).await
    }

    /// Set a single account preference by name
    pub async fn account_set(&self, preference: &str, value: &str) -> Result<Value> {
        let mut params = Map::new();
        params.insert("account".to_string(), self.session.current_account()?.into());
        params.insert(preference.to_string(), value.into());
        self.rpc.call("account.set", Value::Object(params)).await
    }

    // --- context ------------------------------------------------------------

    pub async fn context_list(&self) -> Result<Value> {
        let account = self.session.current_account()?;
        self.rpc.call("context.list", json!({ "account": account })).await
    }

    // --- domain -------------------------------------------------------------

    /// Add a domain; `context_id` and `memo` are sent only when non-empty
    pub async fn domain_add(&self, request: DomainAddRequest) -> Result<Value> {
        let mut params = Map::new();
        params.insert("account".to_string(), self.session.current_account()?.into());
        params.insert("domain".to_string(), request.domain.into());
        params.insert("password".to_string(), request.password.into());
        if let Some(context_id) = request.context_id.filter(|c| !c.is_empty()) {
            params.insert("context_id".to_string(), context_id.into());
        }
        if request.create_new_context_id {
            params.insert("create_new_context_id".to_string(), true.into());
        }
        if let Some(memo) = request.memo.filter(|m| !m.is_empty()) {
            params.insert("memo".to_string(), memo.into());
        }
        self.rpc.call("domain.add", Value::Object(params)).await
    }

    pub async fn domain_capabilities_set(
        &self,
        domain: &str,
        capabilities: &[String],
    ) -> Result<Value> {
        self.rpc
            .call(
                "domain.capabilities.set",
                json!({ "domain": domain, "capabilities": capabilities }),
            )
            .await
    }

    pub async fn domain_del(&self, domain: &str) -> Result<Value> {
        let account = self.session.current_account()?;
        self.rpc
            .call("domain.del", json!({ "account": account, "domain": domain }))
            .await
    }

    pub async fn domain_get(&self, domain: &str) -> Result<Value> {
        self.rpc.call("domain.get", json!({ "domain": domain })).await
    }

    /// List domains of the authenticated account, optionally filtered
    pub async fn domain_list(&self, filter: Option<&str>) -> Result<Value> {
        let mut params = Map::new();
        params.insert("account".to_string(), self.session.current_account()?.into());
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            params.insert("filter".to_string(), filter.into());
        }
        self.rpc.call("domain.list", Value::Object(params)).await
    }

    pub async fn domain_set(&self, domain: &str, preference: &str, value: &str) -> Result<Value> {
        let mut params = Map::new();
        params.insert("domain".to_string(), domain.into());
        params.insert(preference.to_string(), value.into());
        self.rpc.call("domain.set", Value::Object(params)).await
    }

    // --- hello --------------------------------------------------------------

    pub async fn hello_world(&self) -> Result<Value> {
        self.rpc.call("hello.world", json!({})).await
    }

    pub async fn hello_innerworld(&self) -> Result<Value> {
        self.rpc.call("hello.innerworld", json!({})).await
    }

    // --- mail ---------------------------------------------------------------

    pub async fn mail_add(&self, request: MailAddRequest) -> Result<Value> {
        self.rpc
            .call(
                "mail.add",
                json!({
                    "mail": request.mail,
                    "password": request.password,
                    "plan": request.plan,
                    "first_name": request.first_name,
                    "last_name": request.last_name,
                    "inboxsave": request.inboxsave,
                    "forwards": request.forwards,
                }),
            )
            .await
    }

    pub async fn mail_backup_import(&self, request: MailBackupImportRequest) -> Result<Value> {
        self.rpc
            .call(
                "mail.backup.import",
                json!({
                    "mail": request.mail,
                    "id": request.id,
                    "time": request.time,
                    "filter": request.filter,
                }),
            )
            .await
    }

    pub async fn mail_backup_list(&self, mail: &str) -> Result<Value> {
        self.rpc.call("mail.backup.list", json!({ "mail": mail })).await
    }

    pub async fn mail_blacklist_add(&self, mail: &str, address: &str) -> Result<Value> {
        self.rpc
            .call(
                "mail.blacklist.add",
                json!({ "mail": mail, "add_address": address }),
            )
            .await
    }

    pub async fn mail_blacklist_del(&self, mail: &str, address: &str) -> Result<Value> {
        self.rpc
            .call(
                "mail.blacklist.del",
                json!({ "mail": mail, "delete_address": address }),
            )
            .await
    }

    pub async fn mail_blacklist_list(&self, mail: &str) -> Result<Value> {
        self.rpc.call("mail.blacklist.list", json!({ "mail": mail })).await
    }

    pub async fn mail_del(&self, mail: &str) -> Result<Value> {
        self.rpc.call("mail.del", json!({ "mail": mail })).await
    }

    pub async fn mail_get(&self, mail: &str) -> Result<Value> {
        self.rpc.call("mail.get", json!({ "mail": mail })).await
    }

    pub async fn mail_list(&self, domain: &str) -> Result<Value> {
        self.rpc.call("mail.list", json!({ "domain": domain })).await
    }

    /// Register a mailbox with an invitation token; `alternate_mail` is sent
    /// only when non-empty
    pub async fn mail_register(&self, request: MailRegisterRequest) -> Result<Value> {
        let mut params = Map::new();
        params.insert("token".to_string(), request.token.into());
        params.insert("mail".to_string(), request.mail.into());
        params.insert("password".to_string(), request.password.into());
        params.insert("first_name".to_string(), request.first_name.into());
        params.insert("last_name".to_string(), request.last_name.into());
        params.insert("lang".to_string(), request.lang.into());
        if let Some(alternate) = request.alternate_mail.filter(|a| !a.is_empty()) {
            params.insert("alternate_mail".to_string(), alternate.into());
        }
        self.rpc.call("mail.register", Value::Object(params)).await
    }

    pub async fn mail_set(&self, mail: &str, preference: &str, value: &str) -> Result<Value> {
        let mut params = Map::new();
        params.insert("mail".to_string(), mail.into());
        params.insert(preference.to_string(), value.into());
        self.rpc.call("mail.set", Value::Object(params)).await
    }

    pub async fn mail_spamprotect_get(&self, mail: &str) -> Result<Value> {
        self.rpc.call("mail.spamprotect.get", json!({ "mail": mail })).await
    }

    pub async fn mail_spamprotect_set(
        &self,
        mail: &str,
        settings: SpamProtectSettings,
    ) -> Result<Value> {
        self.rpc
            .call(
                "mail.spamprotect.set",
                json!({
                    "mail": mail,
                    "greylist": settings.greylist,
                    "smtp_plausibility": settings.smtp_plausibility,
                    "rbl": settings.rbl,
                    "bypass_banned_checks": settings.bypass_banned_checks,
                    "tag2level": settings.tag2level,
                    "killevel": settings.killevel,
                    "route_to": settings.route_to,
                }),
            )
            .await
    }

    // --- search / test / utils ----------------------------------------------

    /// Search across accounts, domains and mail addresses
    pub async fn search(&self, query: &str) -> Result<Value> {
        self.rpc.call("search", json!({ "query": query })).await
    }

    pub async fn test_accountallowed(&self) -> Result<Value> {
        let account = self.session.current_account()?;
        self.rpc
            .call("test.accountallowed", json!({ "account": account }))
            .await
    }

    pub async fn test_domainallowed(&self, domain: &str) -> Result<Value> {
        self.rpc
            .call("test.domainallowed", json!({ "domain": domain }))
            .await
    }

    /// Validate a value against a server-side type (e.g. mail address)
    pub async fn utils_validator(&self, value: &str, kind: &str) -> Result<Value> {
        self.rpc
            .call("utils.validator", json!({ "value": value, "type": kind }))
            .await
    }
}
