//! OpenWeather current-conditions client.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::SourceError;
use crate::weather::{classify, describe, icon, wind_direction, WeatherReading};

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const REQUEST_TIMEOUT_SECS: u64 = 8;

/// Anything that can report the current weather.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self) -> Result<WeatherReading, SourceError>;
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwResponse {
    weather: Vec<OwCondition>,
    main: OwMain,
    #[serde(default)]
    wind: OwWind,
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    id: i32,
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    #[serde(default)]
    humidity: f64,
    #[serde(default)]
    pressure: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
}

impl OwResponse {
    pub(crate) fn into_reading(self) -> Result<WeatherReading, SourceError> {
        let condition = self.weather.first().ok_or(SourceError::EmptyPayload)?;

        Ok(WeatherReading {
            group: classify(condition.id, &condition.main),
            description: describe(&condition.description),
            temperature: self.main.temp.round() as i32,
            feels_like: self.main.feels_like.round() as i32,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed.round() as i32,
            wind_direction: wind_direction(self.wind.deg).to_string(),
            icon: icon(&condition.icon).to_string(),
            pressure: self.main.pressure,
            visibility_km: self.visibility.map(|metres| (metres / 1000.0).round() as i32),
            fetched_at: Utc::now(),
        })
    }
}

#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: Option<String>,
    lat: f64,
    lon: f64,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>, lat: f64, lon: f64) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key,
            lat,
            lon,
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self) -> Result<WeatherReading, SourceError> {
        let api_key = self.api_key.as_deref().ok_or(SourceError::MissingApiKey)?;

        let response = self
            .client
            .get(OPENWEATHER_URL)
            .query(&[
                ("lat", self.lat.to_string()),
                ("lon", self.lon.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
                ("lang", "kr".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let payload: OwResponse = response.json().await?;
        let reading = payload.into_reading()?;
        debug!(group = %reading.group, temperature = reading.temperature, "Weather reading received");
        Ok(reading)
    }
}
