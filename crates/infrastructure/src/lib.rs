//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer, loads configuration
//! and installs logging.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, IdList, PollingConfig, ServerConfig, StopConfig};
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
