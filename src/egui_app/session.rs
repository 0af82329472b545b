//! Session storage.
//!
//! Persists the authentication credential and current-user identity in
//! `<config_dir>/blogdesk/session.json` with restricted permissions (0600).
//! Both live in one document, so a reader never observes a credential
//! without its user or vice versa. The in-memory copy held here is what
//! gates mutating UI actions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::egui_app::types::User;

/// Session file name inside the app config directory.
const SESSION_FILE: &str = "session.json";

/// App directory under the platform config dir.
const APP_DIR: &str = "blogdesk";

/// The authenticated credential + user identity pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Errors from persisting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not write session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Owns the persisted and in-memory session.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    current: Option<Session>,
}

impl SessionStore {
    /// Store backed by the platform config directory.
    pub fn open_default() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::at_path(base.join(APP_DIR).join(SESSION_FILE))
    }

    /// Store backed by an explicit file path. Tests point this at a
    /// temporary directory.
    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path,
            current: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted session into memory. Absence or corruption of
    /// the file yields `None`; this never fails.
    pub fn load(&mut self) -> Option<&Session> {
        self.current = None;
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %self.path.display(), "no persisted session: {e}");
                return None;
            }
        };
        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => {
                debug!(user = %session.user.username, "restored session");
                self.current = Some(session);
            }
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring corrupt session file: {e}");
            }
        }
        self.current.as_ref()
    }

    /// Persist credential and user as one document and keep them in memory.
    /// The in-memory session is set even when the write fails, so a login
    /// survives a read-only disk; the caller decides how loudly to report.
    pub fn save(&mut self, session: Session) -> Result<(), SessionError> {
        let contents = serde_json::to_string_pretty(&session)?;
        self.current = Some(session);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)?;
            file.write_all(contents.as_bytes())?;
        }

        #[cfg(not(unix))]
        fs::write(&self.path, contents)?;

        Ok(())
    }

    /// Drop the in-memory session and remove the file. Idempotent.
    pub fn clear(&mut self) {
        self.current = None;
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed session file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), "could not remove session file: {e}"),
        }
    }

    /// The in-memory session, synchronously.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }
}
