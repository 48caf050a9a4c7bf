//! The logger contract used by the dispatcher, and its `tracing` implementation.

use crate::protocol::ErrorPayload;
use crate::severity::Severity;
use crate::stack::CallSite;

/// Structured logger with one method per [`Severity`].
///
/// Each report is exactly two values: the error payload and the call site that
/// reported it.
#[cfg_attr(test, mockall::automock)]
pub trait Logger {
    fn trace(&self, error: &ErrorPayload, stack: &CallSite);
    fn debug(&self, error: &ErrorPayload, stack: &CallSite);
    fn info(&self, error: &ErrorPayload, stack: &CallSite);
    fn warn(&self, error: &ErrorPayload, stack: &CallSite);
    fn error(&self, error: &ErrorPayload, stack: &CallSite);
    fn fatal(&self, error: &ErrorPayload, stack: &CallSite);
}

/// Call the `logger` method named after `severity`.
pub fn emit<L>(logger: &L, severity: Severity, error: &ErrorPayload, stack: &CallSite)
where
    L: Logger + ?Sized,
{
    match severity {
        Severity::Trace => logger.trace(error, stack),
        Severity::Debug => logger.debug(error, stack),
        Severity::Info => logger.info(error, stack),
        Severity::Warn => logger.warn(error, stack),
        Severity::Error => logger.error(error, stack),
        Severity::Fatal => logger.fatal(error, stack),
    }
}

// ---------------------------------------------------------------------------
// tracing
// ---------------------------------------------------------------------------

/// [`Logger`] that emits one `tracing` event per report.
///
/// Fields: `severity`, `error` (the payload as JSON) and
/// `send_http_error_stack`. `fatal` reports go out at `ERROR` with
/// `severity = "fatal"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

macro_rules! report {
    ($level:ident, $severity:expr, $error:ident, $stack:ident) => {{
        let payload = $error.to_json();
        tracing::$level!(
            severity = $severity.as_str(),
            error = %payload,
            send_http_error_stack = %$stack,
            "request failed"
        );
    }};
}

impl Logger for TracingLogger {
    fn trace(&self, error: &ErrorPayload, stack: &CallSite) {
        report!(trace, Severity::Trace, error, stack)
    }

    fn debug(&self, error: &ErrorPayload, stack: &CallSite) {
        report!(debug, Severity::Debug, error, stack)
    }

    fn info(&self, error: &ErrorPayload, stack: &CallSite) {
        report!(info, Severity::Info, error, stack)
    }

    fn warn(&self, error: &ErrorPayload, stack: &CallSite) {
        report!(warn, Severity::Warn, error, stack)
    }

    fn error(&self, error: &ErrorPayload, stack: &CallSite) {
        report!(error, Severity::Error, error, stack)
    }

    fn fatal(&self, error: &ErrorPayload, stack: &CallSite) {
        report!(error, Severity::Fatal, error, stack)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::protocol::TransportError;
    use crate::stack::capture_call_site;

    fn payload() -> ErrorPayload {
        ErrorPayload::Transport(TransportError {
            code: "BadUserId".into(),
            status_code: 400,
            message: "Invalid or missing User ID".into(),
        })
    }

    #[test]
    fn every_severity_routes_to_same_named_method() {
        for severity in Severity::ALL {
            let mut logger = MockLogger::new();
            match severity {
                Severity::Trace => {
                    logger.expect_trace().times(1).return_const(());
                }
                Severity::Debug => {
                    logger.expect_debug().times(1).return_const(());
                }
                Severity::Info => {
                    logger.expect_info().times(1).return_const(());
                }
                Severity::Warn => {
                    logger.expect_warn().times(1).return_const(());
                }
                Severity::Error => {
                    logger.expect_error().times(1).return_const(());
                }
                Severity::Fatal => {
                    logger.expect_fatal().times(1).return_const(());
                }
            }
            emit(&logger, severity, &payload(), &capture_call_site());
            logger.checkpoint();
        }
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_events(f: impl FnOnce()) -> Vec<serde_json::Value> {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn tracing_logger_emits_structured_fields() {
        let events = capture_events(|| {
            emit(&TracingLogger, Severity::Info, &payload(), &capture_call_site());
        });
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event["level"], "INFO");
        assert_eq!(event["fields"]["severity"], "info");

        let error: serde_json::Value =
            serde_json::from_str(event["fields"]["error"].as_str().unwrap()).unwrap();
        assert_eq!(error["code"], "BadUserId");
        assert_eq!(error["statusCode"], 400);

        let stack = event["fields"]["send_http_error_stack"].as_str().unwrap();
        assert!(stack.contains("tracing_logger_emits_structured_fields"));
    }

    #[test]
    fn fatal_is_emitted_at_error_level() {
        let events = capture_events(|| {
            emit(&TracingLogger, Severity::Fatal, &payload(), &capture_call_site());
        });
        assert_eq!(events[0]["level"], "ERROR");
        assert_eq!(events[0]["fields"]["severity"], "fatal");
    }
}
