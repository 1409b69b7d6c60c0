//! Weather grouping.
//!
//! OpenWeather condition codes are collapsed into the four groups the risk
//! model was trained on. The current group decides which slice of the risk
//! batch the dashboard shows.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod client;
pub mod handlers;
pub mod refresh;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum WeatherGroup {
    #[serde(rename = "맑음", alias = "clear")]
    Clear,
    #[default]
    #[serde(rename = "흐림", alias = "cloudy")]
    Cloudy,
    #[serde(rename = "비", alias = "rain")]
    Rain,
    #[serde(rename = "안개", alias = "fog")]
    Fog,
}

impl WeatherGroup {
    /// Label used both for display and as the risk record's weather tag.
    pub fn label(&self) -> &'static str {
        match self {
            WeatherGroup::Clear => "맑음",
            WeatherGroup::Cloudy => "흐림",
            WeatherGroup::Rain => "비",
            WeatherGroup::Fog => "안개",
        }
    }
}

impl fmt::Display for WeatherGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps an OpenWeather condition code and main category to a group.
/// Rules are checked in order; anything unmatched (snow, 6xx) lands on Clear.
pub fn classify(code: i32, main: &str) -> WeatherGroup {
    if code == 800 || main == "Clear" {
        return WeatherGroup::Clear;
    }
    if (801..=804).contains(&code) || main == "Clouds" {
        return WeatherGroup::Cloudy;
    }
    if (200..600).contains(&code) || matches!(main, "Thunderstorm" | "Drizzle" | "Rain") {
        return WeatherGroup::Rain;
    }
    if (700..800).contains(&code) || matches!(main, "Mist" | "Fog" | "Haze" | "Smoke") {
        return WeatherGroup::Fog;
    }
    WeatherGroup::Clear
}

/// Korean label for an OpenWeather description; unknown ones pass through.
pub fn describe(description: &str) -> String {
    let label = match description {
        "clear sky" => "맑음",
        "few clouds" => "약간 흐림",
        "scattered clouds" => "구름 많음",
        "broken clouds" => "흐림",
        "shower rain" => "소나기",
        "rain" => "비",
        "thunderstorm" => "뇌우",
        "snow" => "눈",
        "mist" => "안개",
        "light rain" => "약한 비",
        "moderate rain" => "보통 비",
        "heavy intensity rain" => "강한 비",
        "light snow" => "약한 눈",
        "heavy snow" => "강한 눈",
        other => return other.to_string(),
    };
    label.to_string()
}

pub fn icon(icon_code: &str) -> &'static str {
    match icon_code {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" => "🌦️",
        "09n" | "10d" | "10n" => "🌧️",
        "11d" | "11n" => "⛈️",
        "13d" => "🌨️",
        "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => "🌤️",
    }
}

/// Eight-point compass bearing in Korean.
pub fn wind_direction(degrees: f64) -> &'static str {
    const DIRECTIONS: [&str; 8] = ["북", "북동", "동", "남동", "남", "남서", "서", "북서"];
    let sector = (degrees.rem_euclid(360.0) / 45.0).round() as usize % DIRECTIONS.len();
    DIRECTIONS[sector]
}

/// Current conditions as shown in the navigation bar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    pub group: WeatherGroup,
    pub description: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity: f64,
    pub wind_speed: i32,
    pub wind_direction: String,
    pub icon: String,
    pub pressure: f64,
    pub visibility_km: Option<i32>,
    pub fetched_at: DateTime<Utc>,
}

/// Field advisory for the current reading. First match wins.
pub fn alert(reading: &WeatherReading) -> &'static str {
    if reading.temperature <= 0 {
        "❄️ 빙판길 주의보"
    } else if reading.temperature >= 35 {
        "🌡️ 폭염 주의보"
    } else if reading.description.contains('비') {
        "🌧️ 강우 주의보"
    } else if reading.description.contains('눈') {
        "🌨️ 대설 주의보"
    } else if reading.wind_speed >= 10 {
        "💨 강풍 주의보"
    } else {
        "✅ 양호한 기상 상태"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: i32, description: &str, wind_speed: i32) -> WeatherReading {
        WeatherReading {
            group: WeatherGroup::Clear,
            description: description.to_string(),
            temperature,
            feels_like: temperature,
            humidity: 50.0,
            wind_speed,
            wind_direction: "북".to_string(),
            icon: "☀️".to_string(),
            pressure: 1013.0,
            visibility_km: Some(10),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_classify_documented_cases() {
        assert_eq!(classify(800, "Clear"), WeatherGroup::Clear);
        assert_eq!(classify(501, "Rain"), WeatherGroup::Rain);
        assert_eq!(classify(701, "Mist"), WeatherGroup::Fog);
        assert_eq!(classify(803, "Clouds"), WeatherGroup::Cloudy);
    }

    #[test]
    fn test_snow_falls_back_to_clear() {
        assert_eq!(classify(600, "Snow"), WeatherGroup::Clear);
        assert_eq!(classify(622, "Snow"), WeatherGroup::Clear);
    }

    #[test]
    fn test_classify_range_edges() {
        assert_eq!(classify(200, ""), WeatherGroup::Rain);
        assert_eq!(classify(599, ""), WeatherGroup::Rain);
        assert_eq!(classify(700, ""), WeatherGroup::Fog);
        assert_eq!(classify(799, ""), WeatherGroup::Fog);
        assert_eq!(classify(804, ""), WeatherGroup::Cloudy);
        assert_eq!(classify(805, ""), WeatherGroup::Clear);
    }

    #[test]
    fn test_main_category_wins_over_unknown_code() {
        assert_eq!(classify(0, "Drizzle"), WeatherGroup::Rain);
        assert_eq!(classify(0, "Haze"), WeatherGroup::Fog);
        // Clear code short-circuits before the category is consulted.
        assert_eq!(classify(800, "Rain"), WeatherGroup::Clear);
    }

    #[test]
    fn test_group_serde_uses_korean_labels() {
        assert_eq!(serde_json::to_string(&WeatherGroup::Rain).unwrap(), "\"비\"");
        let parsed: WeatherGroup = serde_json::from_str("\"안개\"").unwrap();
        assert_eq!(parsed, WeatherGroup::Fog);
        let alias: WeatherGroup = serde_json::from_str("\"cloudy\"").unwrap();
        assert_eq!(alias, WeatherGroup::Cloudy);
    }

    #[test]
    fn test_describe_and_icon() {
        assert_eq!(describe("broken clouds"), "흐림");
        assert_eq!(describe("volcanic ash"), "volcanic ash");
        assert_eq!(icon("10n"), "🌧️");
        assert_eq!(icon("99x"), "🌤️");
    }

    #[test]
    fn test_wind_direction_sectors() {
        assert_eq!(wind_direction(0.0), "북");
        assert_eq!(wind_direction(90.0), "동");
        assert_eq!(wind_direction(200.0), "남");
        assert_eq!(wind_direction(225.0), "남서");
        assert_eq!(wind_direction(350.0), "북");
    }

    #[test]
    fn test_alert_precedence() {
        assert_eq!(alert(&reading(-2, "비", 12)), "❄️ 빙판길 주의보");
        assert_eq!(alert(&reading(36, "맑음", 0)), "🌡️ 폭염 주의보");
        assert_eq!(alert(&reading(15, "약한 비", 12)), "🌧️ 강우 주의보");
        assert_eq!(alert(&reading(2, "약한 눈", 0)), "🌨️ 대설 주의보");
        assert_eq!(alert(&reading(20, "맑음", 11)), "💨 강풍 주의보");
        assert_eq!(alert(&reading(20, "맑음", 3)), "✅ 양호한 기상 상태");
    }
}
