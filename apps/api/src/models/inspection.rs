use serde::{Deserialize, Serialize};

/// One location as served by the upstream risk model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRiskRecord {
    pub address: String,
    /// Predicted risk factor, observed range roughly 0.0 – 10.0.
    #[serde(rename = "expect_risk")]
    pub expected_risk: f64,
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
    /// Weather group label the prediction was made under ("맑음", "비", ...).
    #[serde(rename = "openweather")]
    pub weather_tag: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Step function over the 0–100 risk score. Lower bounds are inclusive.
    pub fn from_score(risk_score: u32) -> Self {
        match risk_score {
            s if s >= 70 => Priority::Urgent,
            s if s >= 50 => Priority::High,
            s if s >= 30 => Priority::Medium,
            _ => Priority::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Urgent => "긴급",
            Priority::High => "높음",
            Priority::Medium => "보통",
            Priority::Low => "낮음",
        }
    }

    /// Badge/marker colour used by the list and map views.
    pub fn color(&self) -> &'static str {
        match self {
            Priority::Urgent => "#dc3545",
            Priority::High => "#fd7e14",
            Priority::Medium => "#ffc107",
            Priority::Low => "#28a745",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InspectionStatus {
    Pending,
    Completed,
    /// Only ever carried by schedules.
    Scheduled,
}

/// A normalized, rankable location requiring inspector action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inspection {
    /// 1-based position in the batch it was normalized from.
    pub id: u32,
    pub location: String,
    pub district: String,
    pub address: String,
    pub priority: Priority,
    pub risk_score: u32,
    pub status: InspectionStatus,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub original_risk: f64,
}
