//! Mailboxctl SDK - Rust Client Library
//!
//! Session-aware client for the mailbox.org admin JSON-RPC API. A session is
//! established once, cached in a local auth file, transparently re-established
//! when the cached token is empty, and attached to every call.
//!
//! # Example
//!
//! ```no_run
//! use mailboxctl_sdk::{ClientConfig, MailboxClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MailboxClient::new(ClientConfig::default())?;
//!
//!     client.authenticate("admin@example.org", "secret").await?;
//!
//!     let domains = client.domain_list(None).await?;
//!     println!("{domains}");
//!
//!     Ok(())
//! }
//! ```

mod client;
mod types;

pub use client::{ClientConfig, MailboxClient};
pub use mailboxctl_core::application::SessionState;
pub use mailboxctl_infra_http::DEFAULT_API_URL;
pub use mailboxctl_core::domain::Credentials;
pub use mailboxctl_core::error::{ClientError, Result};
pub use types::{
    DomainAddRequest, MailAddRequest, MailBackupImportRequest, MailRegisterRequest,
    SpamProtectSettings,
};
