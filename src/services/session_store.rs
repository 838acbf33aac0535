use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::Session;

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt session file: {0}")]
    Corrupt(String),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SessionStore trait: where the client keeps its session between runs
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Pluggable storage back-end. The CLI writes to disk; tests use memory.
pub trait SessionStore: Send + Sync {
    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;
    fn delete(&self) -> Result<(), SessionStoreError>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FileSessionStore: XDG config dir, owner-only permissions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Stores the session in `<config_dir>/feedback-desk/session.json`.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// `$XDG_CONFIG_HOME`, else `~/.config`, else the working directory.
    pub fn default_path() -> PathBuf {
        let base = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .unwrap_or_else(|_| PathBuf::from("."));

        base.join("feedback-desk").join("session.json")
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| SessionStoreError::Corrupt(format!("Failed to serialize session: {e}")))?;

        std::fs::write(&self.path, json)?;

        // owner read/write only, the file holds bearer tokens
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }

    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&content)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;

        Ok(Some(session))
    }

    fn delete(&self) -> Result<(), SessionStoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Keeps the session for the lifetime of the process only.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Ok(mut slot) = self.session.lock() {
            *slot = Some(session.clone());
        }
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.session.lock().ok().and_then(|slot| slot.clone()))
    }

    fn delete(&self) -> Result<(), SessionStoreError> {
        if let Ok(mut slot) = self.session.lock() {
            *slot = None;
        }
        Ok(())
    }
}
