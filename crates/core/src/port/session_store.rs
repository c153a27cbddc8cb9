// Session Store Port (Interface)

use crate::domain::Credentials;
use crate::error::Result;

/// Persistence interface for the credential record (allows an in-memory
/// fake in tests)
pub trait SessionStore: Send + Sync {
    /// Read the persisted record, `None` if none was ever saved
    fn load(&self) -> Result<Option<Credentials>>;

    /// Atomically replace the persisted record; every field round-trips
    fn save(&self, credentials: &Credentials) -> Result<()>;

    /// Remove the persisted record (logout)
    fn clear(&self) -> Result<()>;

    /// True iff a record exists and carries a session token
    fn has_active_session(&self) -> Result<bool> {
        Ok(self.load()?.is_some_and(|c| c.has_session()))
    }
}
