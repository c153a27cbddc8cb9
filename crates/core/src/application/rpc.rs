// RPC Client - one authenticated call end-to-end

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::application::session::SessionService;
use crate::domain::{envelope, RpcRequest};
use crate::error::{ClientError, Result};
use crate::port::Transport;

/// Orchestrates one call: ensure session, attach the auth header, send the
/// envelope, decode the response, surface the payload or the typed error.
/// Every domain operation goes through [`RpcClient::call`].
pub struct RpcClient {
    session: SessionService,
    transport: Arc<dyn Transport>,
}

impl RpcClient {
    pub fn new(session: SessionService, transport: Arc<dyn Transport>) -> Self {
        Self { session, transport }
    }

    /// Call `method` with the default correlation id (1).
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        self.call_with_id(method, params, 1).await
    }

    /// Call `method` end-to-end. A session token the API rejects surfaces
    /// as the API's own error; there is no automatic re-login retry.
    pub async fn call_with_id(&self, method: &str, params: Value, id: u64) -> Result<Value> {
        let session = self.session.ensure_session().await?;

        let request = RpcRequest::with_id(method, params, id);
        debug!(method, id, "dispatching API call");
        let response = self
            .transport
            .post(request.to_body()?, Some(&session.auth_id))
            .await?;

        let body = match envelope::decode(&response.body) {
            Ok(body) => body,
            Err(_) if !response.is_success() => {
                return Err(ClientError::Transport(format!(
                    "API answered HTTP {} with an unreadable body",
                    response.status
                )));
            }
            Err(e) => return Err(e),
        };

        envelope::interpret(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testutil::{MemoryStore, ScriptedTransport};
    use crate::domain::Credentials;
    use serde_json::json;

    fn active_record() -> Credentials {
        Credentials {
            user: "admin@example.org".to_string(),
            pass: "secret".to_string(),
            auth_id: "tok123".to_string(),
            auth_level: "admin".to_string(),
        }
    }

    fn client(store: Arc<MemoryStore>, transport: Arc<ScriptedTransport>) -> RpcClient {
        let session = SessionService::new(store, transport.clone());
        RpcClient::new(session, transport)
    }

    #[tokio::test]
    async fn test_call_without_credentials_issues_no_request() {
        let transport = Arc::new(ScriptedTransport::new());
        let rpc = client(Arc::new(MemoryStore::new()), transport.clone());

        let outcome = rpc.call("domain.list", json!({})).await;
        assert!(matches!(outcome, Err(ClientError::NoCredentials)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_call_reauthenticates_then_sends_with_token() {
        let store = Arc::new(MemoryStore::with_record(Credentials::new("a", "b")));
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(json!({"result": {"session": "tok123", "level": "admin"}}));
        transport.push_json(json!({"result": [{"domain": "example.com", "count_mails": 3}]}));
        let rpc = client(store, transport.clone());

        let payload = rpc.call("domain.list", json!({"account": "a"})).await.unwrap();
        assert_eq!(payload, json!([{"domain": "example.com", "count_mails": 3}]));

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method(), "auth");
        assert_eq!(requests[0].session_token, None);
        assert_eq!(requests[1].method(), "domain.list");
        assert_eq!(requests[1].session_token.as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn test_call_with_active_session_sends_exactly_one_request() {
        let store = Arc::new(MemoryStore::with_record(active_record()));
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(json!({"result": {"status": "ok"}}));
        let rpc = client(store, transport.clone());

        rpc.call("account.get", json!({"account": "admin@example.org"}))
            .await
            .unwrap();
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_call_surfaces_api_error_untouched() {
        let store = Arc::new(MemoryStore::with_record(active_record()));
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(json!({
            "error": {"code": 32, "message": "Invalid domain", "data": "example.com"},
        }));
        let rpc = client(store, transport.clone());

        match rpc.call("domain.del", json!({"domain": "example.com"})).await {
            Err(ClientError::Rpc {
                code,
                message,
                data,
            }) => {
                assert_eq!(code, 32);
                assert_eq!(message, "Invalid domain");
                assert_eq!(data, json!("example.com"));
            }
            other => panic!("expected Rpc error, got {other:?}"),
        }

        // Rejected calls are not retried with a fresh login
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_call_accepts_bare_boolean_payload() {
        let store = Arc::new(MemoryStore::with_record(active_record()));
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok(200, "true");
        let rpc = client(store, transport);

        let payload = rpc.call("test.domainallowed", json!({"domain": "example.com"})).await.unwrap();
        assert_eq!(payload, json!(true));
    }

    #[tokio::test]
    async fn test_unreadable_error_page_maps_to_transport() {
        let store = Arc::new(MemoryStore::with_record(active_record()));
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok(502, "<html>Bad Gateway</html>");
        let rpc = client(store, transport);

        let outcome = rpc.call("hello.world", json!({})).await;
        assert!(matches!(outcome, Err(ClientError::Transport(_))));
    }

    #[tokio::test]
    async fn test_unreadable_ok_body_maps_to_malformed_response() {
        let store = Arc::new(MemoryStore::with_record(active_record()));
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok(200, "not json at all");
        let rpc = client(store, transport);

        let outcome = rpc.call("hello.world", json!({})).await;
        assert!(matches!(outcome, Err(ClientError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_call_with_id_carries_the_correlation_id() {
        let store = Arc::new(MemoryStore::with_record(active_record()));
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(json!({"result": "pong"}));
        let rpc = client(store, transport.clone());

        rpc.call_with_id("hello.world", json!({}), 42).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.body["id"], 42);
        assert_eq!(sent.body["jsonrpc"], "2.0");
        assert_eq!(sent.body["params"], json!({}));
    }
}
