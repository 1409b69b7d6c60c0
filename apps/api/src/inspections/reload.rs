use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::risk::pipeline::load_inspections;
use crate::risk::source::fallback_batch;
use crate::state::AppState;
use crate::weather::WeatherGroup;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReloadSummary {
    pub count: usize,
    /// True when the risk source failed and the synthetic record was used.
    pub fallback: bool,
    pub weather_group: WeatherGroup,
}

/// Rebuilds the inspection list for the current weather group.
///
/// A failing risk source never leaves the dashboard empty: the fallback batch
/// is installed instead. Overlapping reloads resolve last-writer-wins.
pub async fn reload_from_source(state: &AppState) -> ReloadSummary {
    let weather_group = state.weather.read().await.group;

    let loaded = load_inspections(state.risk_source.as_ref(), weather_group).await;

    let mut manager = state.inspections.write().await;
    let fallback = match loaded {
        Ok(inspections) => {
            manager.install(inspections);
            false
        }
        Err(e) => {
            warn!(error = %e, "Risk source unavailable; using fallback record");
            manager.reload(&fallback_batch());
            true
        }
    };

    let count = manager.inspections().len();
    info!(count, fallback, group = %weather_group, "Dashboard data refreshed");
    ReloadSummary {
        count,
        fallback,
        weather_group,
    }
}
