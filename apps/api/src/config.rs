use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// `STORE_PATH` value selecting the process-local store.
pub const IN_MEMORY_STORE: &str = ":memory:";

/// Daegu city hall, the reference point the dashboard reads weather for.
const DEFAULT_WEATHER_LAT: f64 = 35.8714;
const DEFAULT_WEATHER_LON: f64 = 128.6014;

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Endpoint serving the raw risk batch (JSON array of risk records).
    pub risk_data_url: String,
    /// OpenWeather key. Without it the weather group stays at its default.
    pub openweather_api_key: Option<String>,
    pub weather_lat: f64,
    pub weather_lon: f64,
    pub weather_refresh_secs: u64,
    /// JSON file backing the key-value store; `None` keeps state in memory.
    pub store_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            risk_data_url: env_or("RISK_DATA_URL", "http://localhost:8000/api/info"),
            openweather_api_key: std::env::var("OPENWEATHER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            weather_lat: parse_env("WEATHER_LAT", DEFAULT_WEATHER_LAT)?,
            weather_lon: parse_env("WEATHER_LON", DEFAULT_WEATHER_LON)?,
            weather_refresh_secs: parse_env("WEATHER_REFRESH_SECS", 600)?,
            store_path: match env_or("STORE_PATH", "data/store.json") {
                path if path == IN_MEMORY_STORE => None,
                path => Some(PathBuf::from(path)),
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("INSPECTOR_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("INSPECTOR_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("INSPECTOR_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_env_trims_whitespace() {
        std::env::set_var("INSPECTOR_TEST_LAT", " 35.5 ");
        let value: f64 = parse_env("INSPECTOR_TEST_LAT", 0.0).unwrap();
        assert!((value - 35.5).abs() < f64::EPSILON);
    }
}
