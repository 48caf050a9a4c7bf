//! Request and response bodies of the accounts API.
//!
//! Error bodies are [`http_errors::ErrorResponse`].

use serde::{Deserialize, Serialize};

/// Request body for `POST /login`.
///
/// Both fields are optional at the JSON level so a missing field is reported
/// as a validation error with its own code rather than a generic parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful response body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
}

/// Response body for `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub username: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Number of configured accounts.
    pub accounts: usize,
    /// Number of active sessions.
    pub sessions: usize,
}
