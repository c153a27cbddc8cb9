// Session Lifecycle Service

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::domain::{envelope, Credentials, RpcRequest};
use crate::error::{ClientError, Result};
use crate::port::{SessionStore, Transport};

/// Observable session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No record, or a record without a session token
    NoSession,
    /// An auth round trip is in flight
    Authenticating,
    /// A record with a non-empty session token exists
    Active,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::NoSession => write!(f, "no-session"),
            SessionState::Authenticating => write!(f, "authenticating"),
            SessionState::Active => write!(f, "active"),
        }
    }
}

/// Decides whether a valid session exists, authenticates against the remote
/// API when absent, and exposes the current token and account identity.
///
/// Session validity is optimistic and lazy: the only round-trip cost is the
/// first call after credentials are known, or any call made before a session
/// token exists locally.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    transport: Arc<dyn Transport>,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, transport: Arc<dyn Transport>) -> Self {
        Self { store, transport }
    }

    /// Lifecycle state derived from the store. `Authenticating` is only
    /// observable while an auth round trip is in flight.
    pub fn state(&self) -> Result<SessionState> {
        Ok(match self.store.load()? {
            Some(record) if record.has_session() => SessionState::Active,
            _ => SessionState::NoSession,
        })
    }

    /// Call the remote `auth` method (no session header) and persist the
    /// full record on success. Protocol errors, malformed bodies and
    /// transport failures all surface as `ClientError::Auth`; the store is
    /// never written on a failure path.
    pub async fn authenticate(&self, user: &str, pass: &str) -> Result<Credentials> {
        debug!(user, "session transition: {} -> {}", SessionState::NoSession, SessionState::Authenticating);

        let request = RpcRequest::new("auth", json!({ "user": user, "pass": pass }));
        let response = self
            .transport
            .post(request.to_body()?, None)
            .await
            .map_err(|e| ClientError::Auth(e.to_string()))?;
        let body = envelope::decode(&response.body)
            .map_err(|_| ClientError::Auth("unexpected response from the API".to_string()))?;
        let result = envelope::interpret(body).map_err(|e| ClientError::Auth(e.to_string()))?;

        let session = string_field(&result, "session");
        if session.is_empty() {
            return Err(ClientError::Auth(
                "auth response carried no session token".to_string(),
            ));
        }

        let credentials = Credentials {
            user: user.to_string(),
            pass: pass.to_string(),
            auth_id: session,
            auth_level: string_field(&result, "level"),
        };
        self.store.save(&credentials)?;

        info!(
            user,
            level = %credentials.auth_level,
            "session transition: {} -> {}", SessionState::Authenticating, SessionState::Active
        );
        Ok(credentials)
    }

    /// Return the active session record. A record without a token triggers
    /// exactly one re-authentication from the stored credentials; a record
    /// with a token is trusted as-is and costs no round trip. Expiry of a
    /// trusted token surfaces later as a normal API error, never an
    /// automatic re-login.
    pub async fn ensure_session(&self) -> Result<Credentials> {
        let record = self.store.load()?.ok_or(ClientError::NoCredentials)?;
        if record.has_session() {
            return Ok(record);
        }

        debug!(user = %record.user, "stored session token empty, re-authenticating");
        self.authenticate(&record.user, &record.pass).await
    }

    /// Log out remotely (best effort), then drop local state unconditionally.
    /// The remote call's reported outcome is returned for display; a remote
    /// failure reads as `false` but never blocks the local cleanup.
    pub async fn deauthenticate(&self) -> Result<bool> {
        let record = self.store.load()?.ok_or(ClientError::NoCredentials)?;

        let outcome = self.remote_deauth(&record).await;
        self.store.clear()?;
        info!("session transition: {} -> {}", SessionState::Active, SessionState::NoSession);

        match outcome {
            Ok(logged_out) => Ok(logged_out),
            Err(e) => {
                debug!(error = %e, "remote deauth failed; local state cleared anyway");
                Ok(false)
            }
        }
    }

    async fn remote_deauth(&self, record: &Credentials) -> Result<bool> {
        let request = RpcRequest::new("deauth", json!({}));
        let response = self
            .transport
            .post(request.to_body()?, Some(&record.auth_id))
            .await?;
        let payload = envelope::interpret(envelope::decode(&response.body)?)?;
        Ok(payload == Value::Bool(true) || payload == Value::String("true".to_string()))
    }

    /// Login identity of the stored record
    pub fn current_account(&self) -> Result<String> {
        Ok(self.required_record()?.user)
    }

    /// Session token of the stored record (may be empty)
    pub fn current_token(&self) -> Result<String> {
        Ok(self.required_record()?.auth_id)
    }

    /// Access tier reported at auth time
    pub fn current_level(&self) -> Result<String> {
        Ok(self.required_record()?.auth_level)
    }

    fn required_record(&self) -> Result<Credentials> {
        self.store.load()?.ok_or(ClientError::NoCredentials)
    }
}

/// Read a string-ish field out of a dynamic payload; numbers and booleans
/// are rendered, everything else collapses to an empty string.
fn string_field(payload: &Value, key: &str) -> String {
    match payload.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testutil::{MemoryStore, ScriptedTransport};
    use serde_json::json;

    fn service(
        store: Arc<MemoryStore>,
        transport: Arc<ScriptedTransport>,
    ) -> SessionService {
        SessionService::new(store, transport)
    }

    #[tokio::test]
    async fn test_ensure_session_without_record_fails_without_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let transport = Arc::new(ScriptedTransport::new());
        let session = service(store, transport.clone());

        let outcome = session.ensure_session().await;
        assert!(matches!(outcome, Err(ClientError::NoCredentials)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_ensure_session_with_empty_token_authenticates_once() {
        let store = Arc::new(MemoryStore::with_record(Credentials::new("a", "b")));
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(json!({"result": {"session": "tok123", "level": "admin"}}));
        let session = service(store.clone(), transport.clone());

        let record = session.ensure_session().await.unwrap();
        assert_eq!(record.auth_id, "tok123");
        assert_eq!(transport.request_count(), 1);

        let sent = &transport.requests()[0];
        assert_eq!(sent.method(), "auth");
        assert_eq!(sent.session_token, None);
        assert_eq!(sent.body["params"], json!({"user": "a", "pass": "b"}));

        let stored = store.record().unwrap();
        assert_eq!(stored.auth_id, "tok123");
        assert_eq!(stored.auth_level, "admin");
    }

    #[tokio::test]
    async fn test_ensure_session_with_token_costs_no_round_trip() {
        let record = Credentials {
            user: "a".to_string(),
            pass: "b".to_string(),
            auth_id: "tok123".to_string(),
            auth_level: "admin".to_string(),
        };
        let store = Arc::new(MemoryStore::with_record(record.clone()));
        let transport = Arc::new(ScriptedTransport::new());
        let session = service(store, transport.clone());

        let ensured = session.ensure_session().await.unwrap();
        assert_eq!(ensured, record);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_authenticate_persists_the_full_record() {
        let store = Arc::new(MemoryStore::new());
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(json!({"result": {"session": "tok456", "level": "standard"}}));
        let session = service(store.clone(), transport);

        session.authenticate("admin@example.org", "secret").await.unwrap();

        let stored = store.record().unwrap();
        assert_eq!(stored.user, "admin@example.org");
        assert_eq!(stored.pass, "secret");
        assert_eq!(stored.auth_id, "tok456");
        assert_eq!(stored.auth_level, "standard");
        assert_eq!(session.state().unwrap(), SessionState::Active);
    }

    #[tokio::test]
    async fn test_authenticate_rejection_leaves_store_unchanged() {
        let store = Arc::new(MemoryStore::new());
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(json!({"error": {"code": 10, "message": "bad login"}}));
        let session = service(store.clone(), transport);

        let outcome = session.authenticate("a", "wrong").await;
        assert!(matches!(outcome, Err(ClientError::Auth(_))));
        assert_eq!(store.record(), None);
    }

    #[tokio::test]
    async fn test_authenticate_malformed_body_leaves_store_unchanged() {
        let prior = Credentials::new("a", "b");
        let store = Arc::new(MemoryStore::with_record(prior.clone()));
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok(200, "<html>maintenance</html>");
        let session = service(store.clone(), transport);

        let outcome = session.authenticate("a", "b").await;
        assert!(matches!(outcome, Err(ClientError::Auth(_))));
        assert_eq!(store.record(), Some(prior));
    }

    #[tokio::test]
    async fn test_authenticate_without_session_token_fails() {
        let store = Arc::new(MemoryStore::new());
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(json!({"result": {"level": "admin"}}));
        let session = service(store.clone(), transport);

        let outcome = session.authenticate("a", "b").await;
        assert!(matches!(outcome, Err(ClientError::Auth(_))));
        assert_eq!(store.record(), None);
    }

    #[tokio::test]
    async fn test_deauthenticate_reports_remote_outcome_and_clears() {
        let record = Credentials {
            user: "a".to_string(),
            pass: "b".to_string(),
            auth_id: "tok123".to_string(),
            auth_level: "admin".to_string(),
        };
        let store = Arc::new(MemoryStore::with_record(record));
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok(200, "true");
        let session = service(store.clone(), transport.clone());

        assert!(session.deauthenticate().await.unwrap());
        assert!(!store.has_active_session().unwrap());

        let sent = &transport.requests()[0];
        assert_eq!(sent.method(), "deauth");
        assert_eq!(sent.session_token.as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn test_deauthenticate_clears_even_when_remote_fails() {
        let mut record = Credentials::new("a", "b");
        record.auth_id = "tok123".to_string();
        let store = Arc::new(MemoryStore::with_record(record));
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_err(ClientError::Transport("connection refused".to_string()));
        let session = service(store.clone(), transport);

        assert!(!session.deauthenticate().await.unwrap());
        assert_eq!(store.record(), None);
    }

    #[tokio::test]
    async fn test_accessors_require_a_record() {
        let store = Arc::new(MemoryStore::new());
        let transport = Arc::new(ScriptedTransport::new());
        let session = service(store, transport);

        assert!(matches!(session.current_account(), Err(ClientError::NoCredentials)));
        assert!(matches!(session.current_token(), Err(ClientError::NoCredentials)));
        assert!(matches!(session.current_level(), Err(ClientError::NoCredentials)));
        assert_eq!(session.state().unwrap(), SessionState::NoSession);
    }
}
