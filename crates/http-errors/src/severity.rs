//! Logging severity carried by every domain error.
//!
//! The vocabulary mirrors the level names of the structured logger that
//! receives error reports, ordered from least to most severe.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How loudly an error is reported by [`send_http_error`](crate::send_http_error).
///
/// | Level   | Meaning |
/// |---------|---------|
/// | `fatal` | The service is going to stop or become unusable. |
/// | `error` | Fatal for a particular request; the service keeps serving others. |
/// | `warn`  | Something an operator should eventually look at. |
/// | `info`  | Detail on regular operation, including expected request failures. |
/// | `debug` | Too verbose for `info`. |
/// | `trace` | Very detailed logging, e.g. from external libraries. |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Returned when parsing an unknown severity name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown severity: {0}")]
pub struct UnknownSeverity(pub String);

impl Severity {
    /// Every severity, least severe first.
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Level name, identical to the name of the [`Logger`](crate::Logger) method it routes to.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// The [`tracing::Level`] an event of this severity is emitted at.
    ///
    /// `tracing` has no level above `ERROR`, so `Fatal` shares it.
    pub fn tracing_level(self) -> tracing::Level {
        match self {
            Severity::Trace => tracing::Level::TRACE,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error | Severity::Fatal => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSeverity(s.to_owned()))
    }
}
