//! Application layer - Use cases and orchestration
//!
//! Contains the departure aggregation use case, the board façade that hosts
//! poll and read, and the port definitions adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
