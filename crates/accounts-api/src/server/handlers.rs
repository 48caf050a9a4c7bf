//! Axum request handlers for all service endpoints.
//!
//! Every failure path goes through [`reject`], which logs it once and picks
//! the response.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri},
    Json,
};
use http_errors::{request_validation_error, DomainError, Failure, Severity};
use tracing::info;

use super::reject::{reject, ApiError};
use super::state::AppState;
use crate::protocol::{HealthResponse, LoginRequest, LoginResponse, MeResponse};

/// `POST /login` — exchange a username and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        reject(
            &state,
            request_validation_error!("BadRequestBody", "{}", rejection.body_text()),
        )
    })?;

    let username = non_blank(req.username.as_deref()).ok_or_else(|| {
        reject(
            &state,
            request_validation_error!("BadUsername", "Invalid or missing username"),
        )
    })?;
    let password = req
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            reject(
                &state,
                request_validation_error!("BadPassword", "Invalid or missing password"),
            )
        })?;

    if !state.accounts.verify(username, password) {
        return Err(reject(&state, DomainError::invalid_credentials()));
    }

    let token = state
        .sessions
        .issue(username)
        .await
        .map_err(|e| reject(&state, Failure::unclassified(e)))?;

    info!("session issued");
    Ok(Json(LoginResponse { token }))
}

/// `GET /me` — the username behind the bearer token.
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, ApiError> {
    let username = authenticate(&state, &headers)
        .await
        .map_err(|e| reject(&state, e))?;
    Ok(Json(MeResponse { username }))
}

/// `POST /logout` — end the session behind the bearer token.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| reject(&state, DomainError::invalid_auth_token()))?;
    if !state.sessions.revoke(token).await {
        return Err(reject(&state, DomainError::invalid_auth_token()));
    }
    info!("session revoked");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health` — liveness check with account and session counts.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        accounts: state.accounts.len(),
        sessions: state.sessions.len().await,
    })
}

/// Catch-all 404 handler.
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> ApiError {
    reject(
        &state,
        DomainError::custom(
            "RouteNotFoundError",
            Some(404),
            Severity::Info,
            format!("no route for {}", uri.path()),
        ),
    )
}

// ---------------------------------------------------------------------------
// Authentication helpers
// ---------------------------------------------------------------------------

/// The token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    non_blank(value.strip_prefix("Bearer "))
}

/// Resolve the caller's username from the bearer token.
///
/// The error is built here, an await away from the handler that reports it.
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<String, DomainError> {
    let token = bearer_token(headers).ok_or_else(DomainError::invalid_auth_token)?;
    state
        .sessions
        .resolve(token)
        .await
        .ok_or_else(DomainError::invalid_auth_token)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
