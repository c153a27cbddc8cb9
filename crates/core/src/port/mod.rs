// Port Layer - Interfaces for external dependencies

pub mod session_store;
pub mod transport;

// Re-exports
pub use session_store::SessionStore;
pub use transport::{RawResponse, Transport};
