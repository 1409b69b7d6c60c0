use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::inspections::reload::{reload_from_source, ReloadSummary};
use crate::state::AppState;
use crate::weather::{alert, WeatherGroup, WeatherReading};

#[derive(Serialize)]
pub struct WeatherResponse {
    pub group: WeatherGroup,
    pub reading: Option<WeatherReading>,
    pub alert: Option<&'static str>,
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct SetGroupRequest {
    pub group: WeatherGroup,
}

/// GET /api/v1/weather
pub async fn handle_get_weather(State(state): State<AppState>) -> Json<WeatherResponse> {
    let weather = state.weather.read().await;
    Json(WeatherResponse {
        group: weather.group,
        alert: weather.reading.as_ref().map(alert),
        reading: weather.reading.clone(),
        error: weather.last_error.clone(),
    })
}

/// PUT /api/v1/weather/group
/// Manual override; holds until the next successful weather refresh.
pub async fn handle_set_group(
    State(state): State<AppState>,
    Json(req): Json<SetGroupRequest>,
) -> Json<ReloadSummary> {
    state.weather.write().await.group = req.group;
    Json(reload_from_source(&state).await)
}
