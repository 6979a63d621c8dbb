//! Session state and persistence.
//!
//! Stores the authenticated session in `<home>/session.json` with restricted
//! permissions (0600). Tokens are never logged or displayed in full.
//!
//! State machine:
//!
//! ```text
//! Unknown ──initialize──▶ Authenticated | Anonymous
//! Anonymous ──login──▶ Authenticated
//! Authenticated ──logout / auth error──▶ Anonymous
//! ```
//!
//! No transition leaves `Authenticated` except through `Anonymous`; sessions
//! are never silently refreshed.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// The authenticated user, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Resolution state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Not yet resolved from persisted storage.
    #[default]
    Unknown,
    /// Token and user are both present.
    Authenticated,
    /// No session.
    Anonymous,
}

/// Persisted session file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    user: UserRecord,
}

#[derive(Debug, Default)]
struct SessionState {
    status: SessionStatus,
    token: Option<String>,
    user: Option<UserRecord>,
}

/// Process-wide session handle.
///
/// Cheaply cloneable; all clones share the same state. Only `login` and
/// `logout` mutate it, and mutations are atomic with respect to readers.
/// Invariant: status is `Authenticated` iff both token and user are set.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    inner: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    /// Creates a store backed by the default session file. Status starts `Unknown`.
    pub fn new() -> Self {
        Self::with_path(paths::session_path())
    }

    /// Creates a store backed by a specific session file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            inner: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Resolves the session from persisted storage.
    ///
    /// Sets `Authenticated` if the file holds a well-formed token and user,
    /// else `Anonymous`. A missing, unreadable, or corrupt file is not an
    /// error; it resolves to `Anonymous`. Must run before any access-guard
    /// decision is trusted.
    pub fn initialize(&self) -> SessionStatus {
        let restored = fs::read_to_string(&self.path)
            .ok()
            .and_then(|contents| serde_json::from_str::<PersistedSession>(&contents).ok())
            .filter(|persisted| !persisted.token.trim().is_empty());

        let mut state = self.inner.write().expect("session lock poisoned");
        match restored {
            Some(persisted) => {
                state.status = SessionStatus::Authenticated;
                state.token = Some(persisted.token);
                state.user = Some(persisted.user);
            }
            None => {
                state.status = SessionStatus::Anonymous;
                state.token = None;
                state.user = None;
            }
        }
        state.status
    }

    /// Persists the session and sets `Authenticated`.
    ///
    /// Subsequent client calls carry the new token immediately.
    ///
    /// # Errors
    /// Returns an error if the session file cannot be written; the in-memory
    /// state is not changed in that case.
    pub fn login(&self, user: UserRecord, token: String) -> Result<()> {
        let persisted = PersistedSession {
            token: token.clone(),
            user: user.clone(),
        };
        self.save(&persisted)?;

        let mut state = self.inner.write().expect("session lock poisoned");
        state.status = SessionStatus::Authenticated;
        state.token = Some(token);
        state.user = Some(user);
        Ok(())
    }

    /// Clears the persisted session and sets `Anonymous`. Idempotent.
    ///
    /// # Errors
    /// Returns an error if the session file exists but cannot be removed;
    /// the in-memory state is cleared regardless.
    pub fn logout(&self) -> Result<()> {
        {
            let mut state = self.inner.write().expect("session lock poisoned");
            state.status = SessionStatus::Anonymous;
            state.token = None;
            state.user = None;
        }

        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }

    /// Returns the current resolution state.
    pub fn status(&self) -> SessionStatus {
        self.inner.read().expect("session lock poisoned").status
    }

    /// Returns the current token, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .token
            .clone()
    }

    /// Returns the current user, if authenticated.
    pub fn user(&self) -> Option<UserRecord> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .user
            .clone()
    }

    /// Writes the session file with restricted permissions.
    fn save(&self, persisted: &PersistedSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(persisted).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns a masked version of a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.chars().count() <= 12 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(8).collect();
    format!("{prefix}...")
}
