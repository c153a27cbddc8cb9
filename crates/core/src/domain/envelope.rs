// JSON-RPC 2.0 Envelope - request building and response interpretation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};

pub const PROTOCOL_VERSION: &str = "2.0";

/// Outgoing JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
    pub id: u64,
}

impl RpcRequest {
    /// Build a request with the default correlation id (1).
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self::with_id(method, params, 1)
    }

    /// Build a request with an explicit correlation id. Null params become
    /// an empty object so no-argument calls still send `"params": {}`.
    pub fn with_id(method: impl Into<String>, params: Value, id: u64) -> Self {
        let params = if params.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            params
        };

        Self {
            jsonrpc: PROTOCOL_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }

    /// Serialize to the wire body.
    pub fn to_body(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Error object of a JSON-RPC response, with the optional sub-fields
/// defaulted when the remote omits them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

/// Parse a raw HTTP body as JSON.
pub fn decode(raw: &str) -> Result<Value> {
    serde_json::from_str(raw)
        .map_err(|e| ClientError::MalformedResponse(format!("invalid JSON body: {e}")))
}

/// Split a parsed response body into a success payload or a typed API error.
///
/// Exactly one of three disjoint shapes applies:
/// - `error` present and non-null: the API reported a failure
/// - `result` present and non-null: the `result` value is the payload
/// - neither: the whole body is the payload (APIs that answer with a bare
///   boolean or string instead of a `result` wrapper)
pub fn interpret(body: Value) -> Result<Value> {
    if let Some(error) = body.get("error").filter(|v| !v.is_null()) {
        let error: RpcErrorBody = serde_json::from_value(error.clone()).map_err(|e| {
            ClientError::MalformedResponse(format!("unreadable error object: {e}"))
        })?;
        return Err(ClientError::Rpc {
            code: error.code,
            message: error.message,
            data: error.data,
        });
    }

    match body.get("result") {
        Some(result) if !result.is_null() => Ok(result.clone()),
        _ => Ok(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_round_trip_preserves_all_fields() {
        let request = RpcRequest::with_id(
            "domain.add",
            json!({
                "account": "admin@example.org",
                "domain": "example.com",
                "options": { "create_new_context_id": true, "weight": 3 },
            }),
            7,
        );

        let parsed: Value = serde_json::from_str(&request.to_body().unwrap()).unwrap();
        let object = parsed.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(parsed["jsonrpc"], "2.0");
        assert_eq!(parsed["method"], "domain.add");
        assert_eq!(parsed["id"], 7);
        assert_eq!(parsed["params"]["options"]["create_new_context_id"], true);
        assert_eq!(parsed["params"]["options"]["weight"], 3);
    }

    #[test]
    fn test_request_defaults_id_to_one_and_params_to_empty_object() {
        let request = RpcRequest::new("hello.world", Value::Null);
        let parsed: Value = serde_json::from_str(&request.to_body().unwrap()).unwrap();
        assert_eq!(parsed["id"], 1);
        assert_eq!(parsed["params"], json!({}));
    }

    #[test]
    fn test_interpret_yields_result_value() {
        let payload = interpret(json!({"result": {"session": "tok123"}, "id": 1})).unwrap();
        assert_eq!(payload, json!({"session": "tok123"}));
    }

    #[test]
    fn test_interpret_yields_whole_body_when_bare() {
        let payload = interpret(json!(true)).unwrap();
        assert_eq!(payload, json!(true));

        let payload = interpret(json!({"error": null, "result": null, "id": 1})).unwrap();
        assert_eq!(payload, json!({"error": null, "result": null, "id": 1}));
    }

    #[test]
    fn test_interpret_extracts_full_error() {
        let outcome = interpret(json!({
            "error": {"code": 32, "message": "Invalid domain", "data": "example.com"},
            "id": 1,
        }));

        match outcome {
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
    }

    #[test]
    fn test_interpret_defaults_missing_error_fields() {
        let outcome = interpret(json!({"error": {}, "id": 1}));

        match outcome {
            Err(ClientError::Rpc {
                code,
                message,
                data,
            }) => {
                assert_eq!(code, 0);
                assert_eq!(message, "");
                assert_eq!(data, Value::Null);
            }
            other => panic!("expected Rpc error, got {other:?}"),
        }
    }

    #[test]
    fn test_interpret_prefers_error_over_result() {
        let outcome = interpret(json!({
            "result": {"session": "tok123"},
            "error": {"code": 1, "message": "denied"},
        }));
        assert!(matches!(outcome, Err(ClientError::Rpc { code: 1, .. })));
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let outcome = decode("<html>502 Bad Gateway</html>");
        assert!(matches!(outcome, Err(ClientError::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_accepts_bare_scalars() {
        assert_eq!(decode("true").unwrap(), json!(true));
        assert_eq!(decode("\"ok\"").unwrap(), json!("ok"));
    }
}
