// File-backed SessionStore adapter

mod session_store;

pub use session_store::{default_auth_path, FileSessionStore, DEFAULT_AUTH_FILE};
