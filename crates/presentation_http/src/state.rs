//! Application state shared across handlers

use std::sync::Arc;

use application::{DepartureBoard, DeparturePort, DepartureService, StopSearchPort};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// One board per configured stop, in configuration order
    pub boards: Arc<Vec<Arc<DepartureBoard>>>,
    /// Departure service backing the boards
    pub departure_service: Arc<DepartureService>,
    /// Stop lookup
    pub stop_search: Arc<dyn StopSearchPort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("boards", &self.boards.len())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build the state and one board per `[[stops]]` entry
    pub fn new(
        config: AppConfig,
        departures: Arc<dyn DeparturePort>,
        stop_search: Arc<dyn StopSearchPort>,
    ) -> Self {
        let departure_service = Arc::new(DepartureService::new(departures));
        let boards = config
            .stops
            .iter()
            .map(|stop| {
                Arc::new(DepartureBoard::new(
                    stop.to_board_settings(),
                    Arc::clone(&departure_service),
                ))
            })
            .collect();

        Self {
            boards: Arc::new(boards),
            departure_service,
            stop_search,
            config: Arc::new(config),
        }
    }

    /// Look up a board by its unique id
    pub fn board(&self, unique_id: &str) -> Option<Arc<DepartureBoard>> {
        self.boards
            .iter()
            .find(|board| board.unique_id() == unique_id)
            .cloned()
    }
}
