// Reqwest Transport Implementation

use std::time::Duration;

use async_trait::async_trait;
use mailboxctl_core::error::{ClientError, Result};
use mailboxctl_core::port::{RawResponse, Transport};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.mailbox.org/v1/";

// The admin API uses text/json (not application/json) and authenticates
// calls via the HPLS-AUTH header
const JSON_CONTENT_TYPE: &str = "text/json";
const SESSION_HEADER: &str = "HPLS-AUTH";
const USER_AGENT: &str = concat!("mailbox-cli+rust/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// POSTs encoded envelopes to the API root over HTTPS
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
}

impl HttpTransport {
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, body: String, session_token: Option<&str>) -> Result<RawResponse> {
        let mut request = self
            .client
            .post(&self.api_url)
            .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(reqwest::header::ACCEPT, JSON_CONTENT_TYPE)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .body(body);
        if let Some(token) = session_token {
            request = request.header(SESSION_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("request to {} failed: {e}", self.api_url)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("failed reading response body: {e}")))?;

        debug!(status, bytes = body.len(), "API responded");
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_builds_with_default_url() {
        let transport = HttpTransport::new(DEFAULT_API_URL).unwrap();
        assert_eq!(transport.api_url(), "https://api.mailbox.org/v1/");
    }

    #[tokio::test]
    async fn test_invalid_url_maps_to_transport_error() {
        let transport = HttpTransport::new("not a url").unwrap();
        let outcome = transport.post("{}".to_string(), None).await;
        assert!(matches!(outcome, Err(ClientError::Transport(_))));
    }
}
