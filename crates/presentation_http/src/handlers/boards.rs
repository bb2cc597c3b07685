//! Departure board handlers

use application::BoardSnapshot;
use axum::{
    Json,
    extract::{Path, State},
};
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

/// List every board's current snapshot
pub async fn list_boards(State(state): State<AppState>) -> Json<Vec<BoardSnapshot>> {
    Json(state.boards.iter().map(|board| board.snapshot()).collect())
}

/// Current snapshot of one board
pub async fn get_board(
    State(state): State<AppState>,
    Path(unique_id): Path<String>,
) -> Result<Json<BoardSnapshot>, ApiError> {
    let board = state
        .board(&unique_id)
        .ok_or_else(|| ApiError::NotFound(format!("board {unique_id}")))?;
    Ok(Json(board.snapshot()))
}

/// Refresh one board now and return the new snapshot
#[instrument(skip(state))]
pub async fn refresh_board(
    State(state): State<AppState>,
    Path(unique_id): Path<String>,
) -> Result<Json<BoardSnapshot>, ApiError> {
    let board = state
        .board(&unique_id)
        .ok_or_else(|| ApiError::NotFound(format!("board {unique_id}")))?;

    info!("Manual board refresh requested");
    Ok(Json(board.refresh().await))
}
