use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::inspection::{Inspection, InspectionStatus, Priority};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// A booked inspection visit.
///
/// Location, district, priority and score are copied from the inspection when
/// the schedule is created and are never refreshed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    pub id: Uuid,
    pub inspection_id: u32,
    pub location: String,
    pub district: String,
    pub priority: Priority,
    pub risk_score: u32,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub notes: String,
    pub status: InspectionStatus,
    pub created_at: DateTime<Utc>,
}

impl Schedule {
    pub fn for_inspection(inspection: &Inspection, request: ScheduleRequest) -> Self {
        Schedule {
            id: Uuid::now_v7(),
            inspection_id: inspection.id,
            location: inspection.location.clone(),
            district: inspection.district.clone(),
            priority: inspection.priority,
            risk_score: inspection.risk_score,
            date: request.date,
            time: request.time,
            notes: request.notes.trim().to_string(),
            status: InspectionStatus::Scheduled,
            created_at: Utc::now(),
        }
    }
}

/// User-supplied booking details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub notes: String,
}

impl ScheduleRequest {
    /// Checks the request against today's local date. See [`Self::validate_on`].
    pub fn validate(self) -> Result<Self, AppError> {
        self.validate_on(Local::now().date_naive())
    }

    /// Date and time are both required, as `YYYY-MM-DD` and `HH:MM`, and the
    /// date may not be before `today`. Returns the request with date and time
    /// rewritten in canonical form so stored values sort chronologically.
    pub fn validate_on(self, today: NaiveDate) -> Result<Self, AppError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| AppError::Validation(format!("Invalid date '{}'", self.date)))?;
        let time = NaiveTime::parse_from_str(self.time.trim(), TIME_FORMAT)
            .map_err(|_| AppError::Validation(format!("Invalid time '{}'", self.time)))?;
        if date < today {
            return Err(AppError::Validation(format!("Date {date} is in the past")));
        }

        Ok(ScheduleRequest {
            date: date.format(DATE_FORMAT).to_string(),
            time: time.format(TIME_FORMAT).to_string(),
            notes: self.notes,
        })
    }
}
