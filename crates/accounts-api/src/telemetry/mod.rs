//! Structured logging and optional OTLP span export.
//!
//! # Telemetry invariants
//!
//! - **No passwords or bearer tokens** may appear in any span attribute or log
//!   field.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`), overridden by
//!   `RUST_LOG` when set.

pub mod init;

pub use init::{init_telemetry, shutdown_telemetry};
