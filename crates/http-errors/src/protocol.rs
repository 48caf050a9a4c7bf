//! Wire-level error shapes.
//!
//! [`TransportError`] is the only externally observable form of a domain
//! error. [`ErrorPayload`] is what the dispatcher logs and hands to the next
//! stage, and [`ErrorResponse`] is the JSON body an HTTP layer sends.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Boxed error accepted for anything outside the domain taxonomy.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// Transport error
// ---------------------------------------------------------------------------

/// A domain error converted for the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportError {
    /// Stable machine-readable code; the originating error's name.
    pub code: String,
    /// HTTP status to respond with.
    pub status_code: u16,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl TransportError {
    /// The response body for this error.
    pub fn body(&self) -> ErrorResponse {
        ErrorResponse::new(self.code.clone(), self.message.clone())
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.code, self.status_code, self.message)
    }
}

// ---------------------------------------------------------------------------
// Dispatcher payload
// ---------------------------------------------------------------------------

/// The value the dispatcher logs and forwards to its continuation.
#[derive(Debug)]
pub enum ErrorPayload {
    /// A domain error, converted.
    Transport(TransportError),
    /// Anything else, passed through exactly as received.
    Unclassified(BoxError),
}

impl ErrorPayload {
    /// The HTTP status, if the payload defines one.
    ///
    /// Unclassified errors have no wire shape; the HTTP layer picks a catch-all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ErrorPayload::Transport(err) => Some(err.status_code),
            ErrorPayload::Unclassified(_) => None,
        }
    }

    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            ErrorPayload::Transport(err) => Some(err),
            ErrorPayload::Unclassified(_) => None,
        }
    }

    pub fn into_transport(self) -> Result<TransportError, BoxError> {
        match self {
            ErrorPayload::Transport(err) => Ok(err),
            ErrorPayload::Unclassified(err) => Err(err),
        }
    }

    /// The payload as a JSON string, for log fields.
    pub fn to_json(&self) -> String {
        // Serialising plain strings and integers cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| self.to_string())
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Transport(err) => err.fmt(f),
            ErrorPayload::Unclassified(err) => err.fmt(f),
        }
    }
}

impl Serialize for ErrorPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ErrorPayload::Transport(err) => err.serialize(serializer),
            ErrorPayload::Unclassified(err) => {
                let mut state = serializer.serialize_struct("UnclassifiedError", 2)?;
                state.serialize_field("message", &err.to_string())?;
                state.serialize_field("debug", &format!("{err:?}"))?;
                state.end()
            }
        }
    }
}

impl From<TransportError> for ErrorPayload {
    fn from(err: TransportError) -> Self {
        ErrorPayload::Transport(err)
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"BadUserId"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn credentials() -> TransportError {
        TransportError {
            code: "InvalidCredentialsError".into(),
            status_code: 401,
            message: "Invalid credentials".into(),
        }
    }

    #[test]
    fn transport_error_uses_camel_case_keys() {
        let value = serde_json::to_value(credentials()).unwrap();
        assert_eq!(
            value,
            json!({
                "code": "InvalidCredentialsError",
                "statusCode": 401,
                "message": "Invalid credentials"
            })
        );
    }

    #[test]
    fn body_drops_status_code() {
        let body = credentials().body();
        assert_eq!(body, ErrorResponse::new("InvalidCredentialsError", "Invalid credentials"));
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("statusCode").is_none());
    }

    #[test]
    fn payload_status_code() {
        let converted = ErrorPayload::from(credentials());
        assert_eq!(converted.status_code(), Some(401));

        let raw = ErrorPayload::Unclassified("connection reset".into());
        assert_eq!(raw.status_code(), None);
        assert!(raw.as_transport().is_none());
    }

    #[test]
    fn unclassified_payload_json_keeps_message() {
        let raw = ErrorPayload::Unclassified("FakeDatabaseError".into());
        let value: serde_json::Value = serde_json::from_str(&raw.to_json()).unwrap();
        assert_eq!(value["message"], "FakeDatabaseError");
    }

    #[test]
    fn transport_payload_json_matches_wire_shape() {
        let payload = ErrorPayload::from(credentials());
        let value: serde_json::Value = serde_json::from_str(&payload.to_json()).unwrap();
        assert_eq!(value["statusCode"], 401);
        assert_eq!(value["code"], "InvalidCredentialsError");
    }
}
