mod config;
mod errors;
mod inspections;
mod models;
mod risk;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;
mod weather;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, IN_MEMORY_STORE};
use crate::inspections::reload::reload_from_source;
use crate::risk::source::HttpRiskSource;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileStore, KeyValueStore, MemoryStore};
use crate::weather::client::OpenWeatherClient;
use crate::weather::refresh::{refresh_weather, spawn_refresh_loop};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting inspector API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn KeyValueStore> = match &config.store_path {
        Some(path) => Arc::new(FileStore::open(path)?),
        None => {
            info!("STORE_PATH is {IN_MEMORY_STORE}; nothing will be persisted");
            Arc::new(MemoryStore::new())
        }
    };

    let risk_source = Arc::new(HttpRiskSource::new(config.risk_data_url.clone())?);
    info!("Risk source: {}", config.risk_data_url);

    if config.openweather_api_key.is_none() {
        info!("OPENWEATHER_API_KEY not set; weather group stays at its default");
    }
    let weather_source = Arc::new(OpenWeatherClient::new(
        config.openweather_api_key.clone(),
        config.weather_lat,
        config.weather_lon,
    )?);

    let state = AppState::new(store, risk_source, weather_source);

    // Weather first: it picks which slice of the risk batch is current.
    refresh_weather(&state).await;
    reload_from_source(&state).await;
    spawn_refresh_loop(
        state.clone(),
        Duration::from_secs(config.weather_refresh_secs.max(1)),
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
