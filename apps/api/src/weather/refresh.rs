use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::inspections::reload::reload_from_source;
use crate::state::AppState;

/// Pulls the current weather into shared state.
/// Returns true when the weather group changed.
pub async fn refresh_weather(state: &AppState) -> bool {
    match state.weather_source.current().await {
        Ok(reading) => {
            let mut weather = state.weather.write().await;
            let changed = weather.group != reading.group;
            if changed {
                info!(from = %weather.group, to = %reading.group, "Weather group changed");
            }
            weather.group = reading.group;
            weather.reading = Some(reading);
            weather.last_error = None;
            changed
        }
        Err(e) => {
            warn!(error = %e, "Weather refresh failed; keeping current group");
            state.weather.write().await.last_error = Some(e.to_string());
            false
        }
    }
}

/// Re-reads the weather every `period` and reloads inspections whenever the
/// group moves. The immediate first tick is skipped: startup has just done
/// both.
pub fn spawn_refresh_loop(state: AppState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if refresh_weather(&state).await {
                reload_from_source(&state).await;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::test_support::{record, test_state, StaticWeatherSource};
    use crate::weather::{WeatherGroup, WeatherReading};

    fn rainy() -> WeatherReading {
        WeatherReading {
            group: WeatherGroup::Rain,
            description: "비".to_string(),
            temperature: 14,
            feels_like: 13,
            humidity: 90.0,
            wind_speed: 4,
            wind_direction: "남".to_string(),
            icon: "🌧️".to_string(),
            pressure: 1005.0,
            visibility_km: Some(6),
            fetched_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_refresh_updates_group() {
        let mut state = test_state(vec![]);
        state.weather_source = Arc::new(StaticWeatherSource(Some(rainy())));

        assert!(refresh_weather(&state).await);
        assert!(!refresh_weather(&state).await);

        let weather = state.weather.read().await;
        assert_eq!(weather.group, WeatherGroup::Rain);
        assert!(weather.reading.is_some());
        assert!(weather.last_error.is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_group() {
        let state = test_state(vec![]);

        assert!(!refresh_weather(&state).await);

        let weather = state.weather.read().await;
        assert_eq!(weather.group, WeatherGroup::Cloudy);
        assert!(weather.last_error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_reloads_on_group_change() {
        let mut state = test_state(vec![
            record("대구광역시 중구 동인동", 7.2, "흐림"),
            record("대구광역시 서구 평리동", 5.5, "비"),
        ]);
        state.weather_source = Arc::new(StaticWeatherSource(Some(rainy())));
        reload_from_source(&state).await;
        assert_eq!(
            state.inspections.read().await.inspections()[0].location,
            "동인동"
        );

        let handle = spawn_refresh_loop(state.clone(), Duration::from_secs(600));
        tokio::time::sleep(Duration::from_secs(601)).await;

        assert_eq!(state.weather.read().await.group, WeatherGroup::Rain);
        assert_eq!(
            state.inspections.read().await.inspections()[0].location,
            "평리동"
        );
        handle.abort();
    }
}
