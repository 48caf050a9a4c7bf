//! Domain errors, their wire form, and severity-routed reporting for HTTP handlers.
//!
//! Handlers raise a [`DomainError`] (or receive any other error) and hand it to
//! [`send_http_error`], which converts it, logs it once through a [`Logger`]
//! together with the reporting call site, and forwards the payload to the next
//! stage.

pub mod convert;
pub mod dispatch;
pub mod error;
pub mod logger;
pub mod protocol;
pub mod severity;
pub mod stack;

pub use convert::{to_transport_error, ConversionFault};
pub use dispatch::{send_http_error, Failure};
pub use error::{DomainError, ErrorKind};
pub use logger::{Logger, TracingLogger};
pub use protocol::{BoxError, ErrorPayload, ErrorResponse, TransportError};
pub use severity::Severity;
pub use stack::{capture_call_site, CallSite, Frame};
