//! [`send_http_error`]: classify, convert, log, and forward a failed request.

use crate::convert::{to_transport_error, ConversionFault};
use crate::error::DomainError;
use crate::logger::{self, Logger};
use crate::protocol::{BoxError, ErrorPayload};
use crate::severity::Severity;
use crate::stack::capture_call_site;

/// An error handed to the dispatcher, tagged by whether it belongs to the
/// domain taxonomy.
#[derive(Debug)]
pub enum Failure {
    Domain(DomainError),
    Unclassified(BoxError),
}

impl Failure {
    /// Classify an arbitrary error.
    ///
    /// A boxed [`DomainError`] is still a domain error; anything else is
    /// unclassified.
    pub fn unclassified(err: impl Into<BoxError>) -> Self {
        Self::from(err.into())
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, Failure::Domain(_))
    }
}

impl From<DomainError> for Failure {
    fn from(err: DomainError) -> Self {
        Failure::Domain(err)
    }
}

impl From<BoxError> for Failure {
    fn from(err: BoxError) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => Failure::Domain(*domain),
            Err(other) => Failure::Unclassified(other),
        }
    }
}

/// Report a failed request and hand the result to `next`.
///
/// Domain errors are converted to a [`TransportError`](crate::TransportError)
/// and logged at their own severity. Anything else is forwarded untouched and
/// logged at [`Severity::Error`]. Exactly one logger method is called, then
/// `next` is called once with the same payload and its result returned.
///
/// The stack recorded with the report is captured here, on entry, so it shows
/// who called `send_http_error` even when the error was built elsewhere.
///
/// # Errors
///
/// Returns [`ConversionFault`] when a domain error has no status code. Nothing
/// is logged and `next` is not called in that case.
#[inline(never)]
pub fn send_http_error<L, F, R>(
    logger: &L,
    next: F,
    error: impl Into<Failure>,
) -> Result<R, ConversionFault>
where
    L: Logger + ?Sized,
    F: FnOnce(ErrorPayload) -> R,
{
    let stack = capture_call_site();

    let (payload, severity) = match error.into() {
        Failure::Domain(err) => {
            let converted = to_transport_error(&err)?;
            (ErrorPayload::Transport(converted), err.severity())
        }
        Failure::Unclassified(err) => (ErrorPayload::Unclassified(err), Severity::Error),
    };

    logger::emit(logger, severity, &payload, &stack);
    Ok(next(payload))
}
