//! Test doubles for the server layer.

use std::sync::Mutex;

use http_errors::{CallSite, ErrorPayload, Logger, Severity};

/// Logger that remembers each report's severity and JSON payload.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    reports: Mutex<Vec<(Severity, String)>>,
}

impl RecordingLogger {
    pub fn severities(&self) -> Vec<Severity> {
        self.reports.lock().unwrap().iter().map(|(s, _)| *s).collect()
    }

    pub fn payloads(&self) -> Vec<serde_json::Value> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .map(|(_, json)| serde_json::from_str(json).unwrap())
            .collect()
    }

    fn record(&self, severity: Severity, error: &ErrorPayload) {
        self.reports.lock().unwrap().push((severity, error.to_json()));
    }
}

impl Logger for RecordingLogger {
    fn trace(&self, error: &ErrorPayload, _stack: &CallSite) {
        self.record(Severity::Trace, error);
    }

    fn debug(&self, error: &ErrorPayload, _stack: &CallSite) {
        self.record(Severity::Debug, error);
    }

    fn info(&self, error: &ErrorPayload, _stack: &CallSite) {
        self.record(Severity::Info, error);
    }

    fn warn(&self, error: &ErrorPayload, _stack: &CallSite) {
        self.record(Severity::Warn, error);
    }

    fn error(&self, error: &ErrorPayload, _stack: &CallSite) {
        self.record(Severity::Error, error);
    }

    fn fatal(&self, error: &ErrorPayload, _stack: &CallSite) {
        self.record(Severity::Fatal, error);
    }
}
