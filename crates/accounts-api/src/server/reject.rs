//! Turning failed requests into HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use http_errors::{send_http_error, ErrorPayload, ErrorResponse, Failure};

use super::state::AppState;

/// A reported failure, ready to be rendered as a response.
///
/// Only [`reject`] builds one, so every error response has been logged.
#[derive(Debug)]
pub struct ApiError(ErrorPayload);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ErrorPayload::Transport(err) => {
                let status = StatusCode::from_u16(err.status_code)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(err.body())).into_response()
            }
            // No wire shape: never leak the underlying error to the caller.
            ErrorPayload::Unclassified(_) => {
                let body = ErrorResponse::new("InternalError", "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Report `failure` through the state's logger and return the response to send.
///
/// # Panics
///
/// Panics if `failure` is a domain error without a status code. That is a bug
/// in the handler, and `CatchPanicLayer` answers the request with a 500.
pub fn reject(state: &AppState, failure: impl Into<Failure>) -> ApiError {
    match send_http_error(state.logger.as_ref(), ApiError, failure) {
        Ok(err) => err,
        Err(fault) => panic!("{fault}"),
    }
}
