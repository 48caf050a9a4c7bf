//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use http_errors::Logger;

use crate::accounts::{Accounts, SessionStore};

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable (`Arc`-wrapped or already `Arc`-backed) so
/// that Axum can clone the state for each request without copying expensive data.
#[derive(Clone)]
pub struct AppState {
    /// Configured credentials.
    pub accounts: Arc<Accounts>,
    /// Active login sessions.
    pub sessions: SessionStore,
    /// Where failed requests are reported.
    pub logger: Arc<dyn Logger + Send + Sync>,
}

impl AppState {
    /// Create a new [`AppState`].
    pub fn new(
        accounts: Accounts,
        sessions: SessionStore,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            accounts: Arc::new(accounts),
            sessions,
            logger,
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// One account (`alice` / `wonderland`), two session slots, `tracing` logger.
    fn default() -> Self {
        let accounts = Accounts::parse("alice:wonderland").expect("valid test accounts");
        Self::new(accounts, SessionStore::new(2), Arc::new(http_errors::TracingLogger))
    }
}
