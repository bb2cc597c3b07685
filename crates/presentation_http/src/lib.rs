//! Berlin transport HTTP presentation layer
//!
//! This crate provides the JSON API over the departure boards and the
//! background tasks that keep them fresh.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use tasks::spawn_board_refresh_task;
