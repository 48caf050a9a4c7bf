//! Domain error taxonomy.
//!
//! Every domain error shares one shape: a wire `name`, a `message`, a
//! [`Severity`] and an optional HTTP status code. The variant is an explicit
//! [`ErrorKind`] discriminant fixed by the factory that built the error.
//!
//! ```
//! use http_errors::{request_validation_error, DomainError, Severity};
//!
//! let err = request_validation_error!("BadUserId", "Invalid or missing User ID");
//! assert_eq!(err.name(), "BadUserId");
//! assert_eq!(err.status_code(), Some(400));
//! assert_eq!(err.severity(), Severity::Info);
//!
//! let err = DomainError::invalid_credentials();
//! assert_eq!(err.status_code(), Some(401));
//! ```

use std::fmt;

use crate::severity::Severity;
use crate::stack::CallSite;

/// Constructor frames trimmed from an error's own stack.
const CONSTRUCTOR_BOUNDARY: &str = concat!(module_path!(), "::DomainError::");

/// Which member of the taxonomy an error is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The base type. Carries no status code, so it cannot be converted.
    Base,
    /// Malformed or missing request input. 400.
    RequestValidation,
    /// Missing, expired, or unknown auth token. 401.
    InvalidAuthToken,
    /// Wrong username or password. 401.
    InvalidCredentials,
    /// An application-defined variant, identified by its type name.
    Custom(&'static str),
}

impl ErrorKind {
    /// The variant's type name; also the default wire name.
    pub fn type_name(self) -> &'static str {
        match self {
            ErrorKind::Base => "DomainError",
            ErrorKind::RequestValidation => "RequestValidationError",
            ErrorKind::InvalidAuthToken => "InvalidAuthTokenError",
            ErrorKind::InvalidCredentials => "InvalidCredentialsError",
            ErrorKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// An expected request failure raised by handler code.
///
/// Severity, status code and kind are fixed when the error is built. Only
/// [`name`](Self::name) may change afterwards, so validation call sites can pick
/// their own wire code.
#[derive(Debug)]
pub struct DomainError {
    kind: ErrorKind,
    name: String,
    message: String,
    severity: Severity,
    status_code: Option<u16>,
    stack: CallSite,
}

impl DomainError {
    #[inline(never)]
    fn build(
        kind: ErrorKind,
        severity: Severity,
        status_code: Option<u16>,
        message: String,
    ) -> Self {
        Self {
            kind,
            name: kind.type_name().to_owned(),
            message,
            severity,
            status_code,
            stack: CallSite::capture_below(CONSTRUCTOR_BOUNDARY),
        }
    }

    /// The base error: severity `error` and no status code.
    ///
    /// Raising it is fine; reporting it through
    /// [`send_http_error`](crate::send_http_error) is a
    /// [`ConversionFault`](crate::ConversionFault).
    #[inline(never)]
    pub fn new(message: impl Into<String>) -> Self {
        Self::build(ErrorKind::Base, Severity::Error, None, message.into())
    }

    /// Invalid request input, reported under the caller's wire `name`.
    ///
    /// `name` should be non-empty; an empty name is kept as given.
    #[inline(never)]
    pub fn request_validation(name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::build(
            ErrorKind::RequestValidation,
            Severity::Info,
            Some(400),
            message.into(),
        );
        err.name = name.into();
        err
    }

    #[inline(never)]
    pub fn invalid_auth_token() -> Self {
        Self::build(
            ErrorKind::InvalidAuthToken,
            Severity::Info,
            Some(401),
            "Invalid auth token".to_owned(),
        )
    }

    #[inline(never)]
    pub fn invalid_credentials() -> Self {
        Self::build(
            ErrorKind::InvalidCredentials,
            Severity::Info,
            Some(401),
            "Invalid credentials".to_owned(),
        )
    }

    /// Define an application variant outside the built-in set.
    ///
    /// A `None` status code makes the variant unconvertible until fixed.
    #[inline(never)]
    pub fn custom(
        type_name: &'static str,
        status_code: Option<u16>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self::build(
            ErrorKind::Custom(type_name),
            severity,
            status_code,
            message.into(),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Wire code of this error.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the wire code.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Stack captured where this error was built.
    pub fn stack(&self) -> &CallSite {
        &self.stack
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl std::error::Error for DomainError {}

/// Build a [`DomainError::request_validation`] with a formatted message.
///
/// With only a name the message is empty.
#[macro_export]
macro_rules! request_validation_error {
    ($name:expr $(,)?) => {
        $crate::DomainError::request_validation($name, ::std::string::String::new())
    };
    ($name:expr, $($arg:tt)+) => {
        $crate::DomainError::request_validation($name, ::std::format!($($arg)+))
    };
}

/// Build a base [`DomainError::new`] with a formatted message.
#[macro_export]
macro_rules! domain_error {
    () => {
        $crate::DomainError::new(::std::string::String::new())
    };
    ($($arg:tt)+) => {
        $crate::DomainError::new(::std::format!($($arg)+))
    };
}
