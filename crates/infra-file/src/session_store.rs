// Auth File SessionStore Implementation

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use mailboxctl_core::domain::Credentials;
use mailboxctl_core::error::{ClientError, Result};
use mailboxctl_core::port::SessionStore;
use tracing::debug;

pub const DEFAULT_AUTH_FILE: &str = "~/.mailboxctl/auth.yml";

/// Resolve the auth file path from the env override or the default location
pub fn default_auth_path() -> PathBuf {
    let raw = std::env::var("MAILBOXCTL_AUTH_FILE")
        .unwrap_or_else(|_| DEFAULT_AUTH_FILE.to_string());
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

/// Stores the credential record as a small YAML file with the keys
/// `user`, `pass`, `auth_id`, `auth_level`
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Credentials>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let credentials = serde_yaml::from_str(&raw).map_err(|e| {
            ClientError::Store(format!(
                "unreadable auth file {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(credentials))
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let raw = serde_yaml::to_string(credentials)
            .map_err(|e| ClientError::Store(format!("serialize auth file: {e}")))?;

        // Replace via temp file + rename; a partial write never hits the
        // real path
        let tmp = self.path.with_extension("yml.tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(raw.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "auth file written");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "auth file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
