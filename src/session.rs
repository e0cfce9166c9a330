//! Signed-in user session with an explicit storage lifecycle
//!
//! Screens never reach for ambient globals: they receive a
//! [`SessionContext`] built on top of a [`SessionStore`]. The store only knows
//! how to load, store and clear one serialized user; the context keeps the
//! restored user in memory.

use crate::core::error::SessionError;
use crate::records::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// The user currently signed in to the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, rename = "avatarUrl", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role_id: Option<u32>,
    pub signed_in_at: DateTime<Utc>,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar_url: None,
            role_id: None,
            signed_in_at: Utc::now(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role_id = role.id();
        self
    }

    pub fn role(&self) -> Role {
        Role::from_id(self.role_id)
    }
}

/// Persistence for the signed-in user
pub trait SessionStore: Send + Sync {
    /// Load the stored user. An unreadable entry is cleared and reported as
    /// no session.
    fn load(&self) -> Result<Option<SessionUser>, SessionError>;

    fn store(&self, user: &SessionUser) -> Result<(), SessionError>;

    fn clear(&self) -> Result<(), SessionError>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Session store kept in process memory, for tests and headless use
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    user: Arc<RwLock<Option<SessionUser>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> SessionError {
    SessionError::Io(io::Error::other(format!("session lock poisoned: {}", e)))
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        let user = self.user.read().map_err(poisoned)?;
        Ok(user.clone())
    }

    fn store(&self, user: &SessionUser) -> Result<(), SessionError> {
        let mut slot = self.user.write().map_err(poisoned)?;
        *slot = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self.user.write().map_err(poisoned)?;
        *slot = None;
        Ok(())
    }
}

// =============================================================================
// File store
// =============================================================================

/// Session store persisting the user as a JSON file
#[derive(Debug, Clone)]
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
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "discarding unreadable session"
                );
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn store(&self, user: &SessionUser) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(user)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Context
// =============================================================================

/// Session state handed to every screen
///
/// Starts signed out; call [`SessionContext::restore`] once at startup.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: Option<SessionUser>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Load a previously stored session
    pub fn restore(&mut self) -> Result<Option<&SessionUser>, SessionError> {
        self.current = self.store.load()?;
        if let Some(user) = &self.current {
            tracing::debug!(user_id = %user.id, "session restored");
        }
        Ok(self.current.as_ref())
    }

    pub fn sign_in(&mut self, user: SessionUser) -> Result<(), SessionError> {
        self.store.store(&user)?;
        tracing::info!(user_id = %user.id, "signed in");
        self.current = Some(user);
        Ok(())
    }

    pub fn sign_out(&mut self) -> Result<(), SessionError> {
        self.store.clear()?;
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, "signed out");
        }
        Ok(())
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|u| u.role() == Role::Admin)
    }
}
