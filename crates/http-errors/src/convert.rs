//! Domain error → transport error conversion.

use thiserror::Error;

use crate::error::DomainError;
use crate::protocol::TransportError;

/// The taxonomy was misused: a domain error reached conversion without a
/// status code.
///
/// This is a defect in the code that defined or built the error, not a failed
/// request, and it has no transport form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionFault {
    #[error("Please define \"status_code\" for {type_name}")]
    MissingStatusCode { type_name: &'static str },
}

/// Convert a domain error into its wire representation.
///
/// # Errors
///
/// Returns [`ConversionFault::MissingStatusCode`] if `error` has no status code.
pub fn to_transport_error(error: &DomainError) -> Result<TransportError, ConversionFault> {
    let status_code = error
        .status_code()
        .ok_or(ConversionFault::MissingStatusCode {
            type_name: error.kind().type_name(),
        })?;

    Ok(TransportError {
        code: error.name().to_owned(),
        status_code,
        message: error.message().to_owned(),
    })
}
