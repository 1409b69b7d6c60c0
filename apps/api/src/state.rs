use std::sync::Arc;

use tokio::sync::RwLock;

use crate::inspections::manager::InspectionManager;
use crate::inspections::memos::MemoBook;
use crate::risk::source::RiskSource;
use crate::store::KeyValueStore;
use crate::weather::client::WeatherSource;
use crate::weather::{WeatherGroup, WeatherReading};

/// Latest weather as seen by the refresh loop.
#[derive(Debug, Clone, Default)]
pub struct WeatherState {
    pub group: WeatherGroup,
    pub reading: Option<WeatherReading>,
    /// Message from the most recent failed refresh, cleared on success.
    pub last_error: Option<String>,
}

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Each lock is held for one synchronous operation at a time, which keeps a
/// single logical writer and applies mutations in call order.
#[derive(Clone)]
pub struct AppState {
    pub inspections: Arc<RwLock<InspectionManager>>,
    pub memos: Arc<RwLock<MemoBook>>,
    pub weather: Arc<RwLock<WeatherState>>,
    pub risk_source: Arc<dyn RiskSource>,
    pub weather_source: Arc<dyn WeatherSource>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        risk_source: Arc<dyn RiskSource>,
        weather_source: Arc<dyn WeatherSource>,
    ) -> Self {
        Self {
            inspections: Arc::new(RwLock::new(InspectionManager::new(store.clone()))),
            memos: Arc::new(RwLock::new(MemoBook::new(store))),
            weather: Arc::new(RwLock::new(WeatherState::default())),
            risk_source,
            weather_source,
        }
    }
}
