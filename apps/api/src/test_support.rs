//! Fakes shared by unit tests across modules.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::models::inspection::RawRiskRecord;
use crate::state::AppState;
use crate::store::{KeyValueStore, MemoryStore, StoreError};
use crate::weather::client::WeatherSource;
use crate::weather::WeatherReading;

pub fn record(address: &str, risk: f64, weather_tag: &str) -> RawRiskRecord {
    RawRiskRecord {
        address: address.to_string(),
        expected_risk: risk,
        x: 128.6,
        y: 35.87,
        weather_tag: weather_tag.to_string(),
    }
}

pub struct StaticRiskSource(pub Vec<RawRiskRecord>);

#[async_trait]
impl crate::risk::source::RiskSource for StaticRiskSource {
    async fn fetch(&self) -> Result<Vec<RawRiskRecord>, SourceError> {
        Ok(self.0.clone())
    }
}

pub struct UnavailableRiskSource;

#[async_trait]
impl crate::risk::source::RiskSource for UnavailableRiskSource {
    async fn fetch(&self) -> Result<Vec<RawRiskRecord>, SourceError> {
        Err(SourceError::Status { status: 503 })
    }
}

/// Weather source that returns a fixed reading, or fails when empty.
pub struct StaticWeatherSource(pub Option<WeatherReading>);

#[async_trait]
impl WeatherSource for StaticWeatherSource {
    async fn current(&self) -> Result<WeatherReading, SourceError> {
        self.0.clone().ok_or(SourceError::MissingApiKey)
    }
}

/// Reads as empty, rejects every write.
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only store").into())
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only store").into())
    }
}

/// State over an in-memory store, a static risk batch and no weather.
pub fn test_state(records: Vec<RawRiskRecord>) -> AppState {
    AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(StaticRiskSource(records)),
        Arc::new(StaticWeatherSource(None)),
    )
}
