//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber for the server binary.

mod logging;

pub use logging::{LogFormat, LoggingConfig, TelemetryError, build_filter, init_logging};
