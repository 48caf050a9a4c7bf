//! [`SessionStore`]: bearer tokens issued at login.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Errors produced by the session layer.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Every session slot is taken.
    #[error("session table full ({max} active sessions)")]
    Full { max: usize },
}

/// Thread-safe map from bearer token to username.
///
/// Many handlers resolve tokens concurrently; login and logout take the write
/// lock briefly to insert or remove one entry.
#[derive(Clone, Debug)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
    max_sessions: usize,
}

impl SessionStore {
    /// Create an empty store holding at most `max_sessions` sessions.
    pub fn new(max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
        }
    }

    /// Start a session for `username` and return its token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Full`] when the store is at capacity.
    pub async fn issue(&self, username: &str) -> Result<String, SessionError> {
        let mut sessions = self.inner.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(SessionError::Full {
                max: self.max_sessions,
            });
        }
        let token = Uuid::new_v4().to_string();
        sessions.insert(token.clone(), username.to_owned());
        Ok(token)
    }

    /// The username owning `token`, if the session exists.
    pub async fn resolve(&self, token: &str) -> Option<String> {
        self.inner.read().await.get(token).cloned()
    }

    /// End the session for `token`. Returns `false` if there was none.
    pub async fn revoke(&self, token: &str) -> bool {
        self.inner.write().await.remove(token).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
