//! Stop lookup handler

use axum::{
    Json,
    extract::{Query, State},
};
use domain::Stop;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

/// Query parameters of `GET /v1/stops`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopSearchParams {
    /// Free-text stop name
    #[serde(default)]
    pub query: String,
    /// Maximum number of results (defaults to `transit.max_results`)
    pub results: Option<u8>,
}

/// One matching stop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopResponse {
    /// Stop id
    pub id: String,
    /// Stop name
    pub name: String,
    /// `"{name} [{id}]"`
    pub label: String,
}

impl From<Stop> for StopResponse {
    fn from(stop: Stop) -> Self {
        Self {
            label: stop.label(),
            id: stop.id,
            name: stop.name,
        }
    }
}

/// Look up stops by name
pub async fn search_stops(
    State(state): State<AppState>,
    Query(params): Query<StopSearchParams>,
) -> Result<Json<Vec<StopResponse>>, ApiError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let max_results = params
        .results
        .filter(|n| *n > 0)
        .unwrap_or(state.config.transit.max_results);

    let stops = state.stop_search.search_stops(query, max_results).await?;
    Ok(Json(stops.into_iter().map(StopResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_response_has_selection_label() {
        let resp = StopResponse::from(Stop::new("900100003", "S+U Alexanderplatz"));
        assert_eq!(resp.label, "S+U Alexanderplatz [900100003]");
        assert_eq!(resp.id, "900100003");
    }
}
