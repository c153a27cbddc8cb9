// Test Doubles for the Port Layer

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use crate::domain::Credentials;
use crate::error::{ClientError, Result};
use crate::port::{RawResponse, SessionStore, Transport};
use async_trait::async_trait;

/// In-memory session store
#[derive(Default)]
pub struct MemoryStore {
    record: Mutex<Option<Credentials>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(credentials: Credentials) -> Self {
        Self {
            record: Mutex::new(Some(credentials)),
        }
    }

    pub fn record(&self) -> Option<Credentials> {
        self.record.lock().unwrap().clone()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<Credentials>> {
        Ok(self.record.lock().unwrap().clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        *self.record.lock().unwrap() = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.record.lock().unwrap() = None;
        Ok(())
    }
}

/// One request as the scripted transport saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub body: Value,
    pub session_token: Option<String>,
}

impl RecordedRequest {
    pub fn method(&self) -> &str {
        self.body["method"].as_str().unwrap_or_default()
    }
}

/// Transport fake that replays scripted responses in order and records
/// every request it was asked to send
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn push_json(&self, body: Value) {
        self.push_ok(200, &body.to_string());
    }

    pub fn push_err(&self, error: ClientError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, body: String, session_token: Option<&str>) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            body: serde_json::from_str(&body).expect("request body must be JSON"),
            session_token: session_token.map(str::to_string),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ClientError::Transport(
                    "no scripted response left".to_string(),
                ))
            })
    }
}
