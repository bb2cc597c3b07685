//! Background tasks for the HTTP presentation layer

mod board_refresh;

pub use board_refresh::spawn_board_refresh_task;
