// Credential Record Domain Model

use serde::{Deserialize, Serialize};

/// Persisted credential record backing the session lifecycle.
///
/// Field names match the on-disk auth file keys exactly (`user`, `pass`,
/// `auth_id`, `auth_level`) so the record round-trips without renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: String,
    pub pass: String,

    /// Session token issued by the API; empty means no active session.
    #[serde(default)]
    pub auth_id: String,

    /// Access tier reported at auth time; informational.
    #[serde(default)]
    pub auth_level: String,
}

impl Credentials {
    /// A fresh record with known login but no session yet.
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
            auth_id: String::new(),
            auth_level: String::new(),
        }
    }

    /// An active session is exactly a non-empty `auth_id`.
    pub fn has_session(&self) -> bool {
        !self.auth_id.is_empty()
    }
}
