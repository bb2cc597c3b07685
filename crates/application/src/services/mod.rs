//! Application services - Use case implementations

mod departure_board;
mod departure_service;

pub use departure_board::{BoardAttributes, BoardSnapshot, DepartureBoard, NO_DEPARTURES_STATE};
pub use departure_service::{BoardSettings, DepartureService, dedup_departures, split_list};
