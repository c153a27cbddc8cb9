// Domain Layer - Credentials and the JSON-RPC envelope

pub mod credentials;
pub mod envelope;

// Re-exports
pub use credentials::Credentials;
pub use envelope::{RpcErrorBody, RpcRequest, PROTOCOL_VERSION};
