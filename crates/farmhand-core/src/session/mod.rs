//! Explicit session context.
//!
//! A `Session` owns the bearer token obtained at login and the `TokenStore`
//! that persists it on the device. Every authenticated call reads the token
//! from the session it is handed; there is no ambient token lookup.

use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed storage key the token is persisted under.
pub const TOKEN_STORAGE_KEY: &str = "session_token";

/// Opaque bearer credential issued by the backend at login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("token", "Session token must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Raw token value for the `Authorization` header and persistence.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("SessionToken")
            .field(&"[REDACTED]")
            .finish()
    }
}

/// Device-local persistence for the session token.
pub trait TokenStore: Send + Sync + 'static {
    fn load_token(&self) -> Result<Option<SessionToken>>;
    fn save_token(&self, token: &SessionToken) -> Result<()>;
    fn clear_token(&self) -> Result<()>;
}

/// Process-local token store, used by tests and short-lived sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<SessionToken>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: SessionToken) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load_token(&self) -> Result<Option<SessionToken>> {
        let guard = self
            .slot
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        Ok(guard.clone())
    }

    fn save_token(&self, token: &SessionToken) -> Result<()> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Shared handle to the current session. Cloning shares the same state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Arc<dyn TokenStore>,
    token: RwLock<Option<SessionToken>>,
}

impl Session {
    /// Opens a session over `store`, picking up any persisted token.
    pub fn restore(store: impl TokenStore) -> Result<Self> {
        let token = store.load_token()?;
        if token.is_some() {
            tracing::debug!("Restored persisted session token");
        }
        Ok(Self {
            inner: Arc::new(SessionInner {
                store: Arc::new(store),
                token: RwLock::new(token),
            }),
        })
    }

    /// Session backed by a fresh in-memory store, signed out.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store: Arc::new(MemoryTokenStore::new()),
                token: RwLock::new(None),
            }),
        }
    }

    /// Current token, or `NotAuthenticated` when signed out.
    pub fn token(&self) -> Result<SessionToken> {
        let guard = self
            .inner
            .token
            .read()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard.clone().ok_or(Error::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Starts the session: persists `token` and makes it current.
    pub fn begin(&self, token: SessionToken) -> Result<()> {
        self.inner.store.save_token(&token)?;
        let mut guard = self
            .inner
            .token
            .write()
            .map_err(|error| Error::Storage(error.to_string()))?;
        *guard = Some(token);
        Ok(())
    }

    /// Tears the session down: removes the persisted token and forgets it.
    pub fn end(&self) -> Result<()> {
        self.inner.store.clear_token()?;
        let mut guard = self
            .inner
            .token
            .write()
            .map_err(|error| Error::Storage(error.to_string()))?;
        *guard = None;
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
