//! Account credentials and login sessions.
//!
//! Credentials are configured once at startup (`ACCOUNTS`) and never change.
//! Sessions live in memory only and are lost on restart.

pub mod sessions;

use std::collections::HashMap;

use thiserror::Error;

pub use sessions::{SessionError, SessionStore};

/// Errors from parsing the `ACCOUNTS` list.
///
/// Messages never include passwords.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountsError {
    #[error("ACCOUNTS must list at least one username:password pair")]
    Empty,

    /// Entry `position` (1-based) lacks a username, a password, or the `:`.
    #[error("ACCOUNTS entry {position} is malformed: expected username:password")]
    Malformed { position: usize },

    #[error("ACCOUNTS lists username {0:?} more than once")]
    Duplicate(String),
}

/// Known usernames and their passwords.
#[derive(Clone)]
pub struct Accounts {
    passwords: HashMap<String, String>,
}

impl std::fmt::Debug for Accounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Usernames only.
        f.debug_set().entries(self.passwords.keys()).finish()
    }
}

impl Accounts {
    /// Parse a comma-separated list of `username:password` pairs.
    ///
    /// Whitespace around entries and usernames is ignored. Passwords are taken
    /// verbatim after the first `:` and may themselves contain `:`.
    ///
    /// # Errors
    ///
    /// See [`AccountsError`].
    pub fn parse(list: &str) -> Result<Self, AccountsError> {
        let mut passwords = HashMap::new();
        let entries = list.split(',').map(str::trim).filter(|e| !e.is_empty());

        for (idx, entry) in entries.enumerate() {
            let malformed = AccountsError::Malformed { position: idx + 1 };
            let (username, password) = entry.split_once(':').ok_or(malformed.clone())?;
            let username = username.trim();
            if username.is_empty() || password.is_empty() {
                return Err(malformed);
            }
            if passwords
                .insert(username.to_owned(), password.to_owned())
                .is_some()
            {
                return Err(AccountsError::Duplicate(username.to_owned()));
            }
        }

        if passwords.is_empty() {
            return Err(AccountsError::Empty);
        }
        Ok(Self { passwords })
    }

    /// Returns `true` if `username` exists and `password` matches.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.passwords
            .get(username)
            .is_some_and(|expected| expected == password)
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }
}
