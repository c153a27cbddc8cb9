// Central Error Type for the Client

use thiserror::Error;

/// Client-level error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("no credentials present; run the auth command first")]
    NoCredentials,

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Application-level error reported by the remote API. All three fields
    /// are preserved for display.
    #[error("API error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: serde_json::Value,
    },

    #[error("session store error: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;
