// Transport Port (Interface)

use crate::error::Result;
use async_trait::async_trait;

/// Raw HTTP outcome as seen by the protocol layer
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One-shot HTTP POST interface to the admin API
///
/// The adapter owns the base URL and the fixed headers; the protocol layer
/// only supplies the encoded body and, for authenticated calls, the session
/// token to attach.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to the API root. Connection-level failures map to
    /// `ClientError::Transport`.
    async fn post(&self, body: String, session_token: Option<&str>) -> Result<RawResponse>;
}
