//! Batch normalization and the list/map query contract.

use serde::{Deserialize, Serialize};

use crate::errors::SourceError;
use crate::models::inspection::{Inspection, InspectionStatus, Priority, RawRiskRecord};
use crate::risk::normalizer::normalize;
use crate::risk::source::RiskSource;
use crate::weather::WeatherGroup;

/// Normalizes a batch in input order. Ids follow position, so the same
/// batch always yields the same ids.
pub fn process(batch: &[RawRiskRecord]) -> Vec<Inspection> {
    batch
        .iter()
        .enumerate()
        .map(|(ordinal, record)| normalize(record, ordinal))
        .collect()
}

/// Records tagged with the current weather group, or the whole universe when
/// none match, so the dashboard is never empty just because of the weather.
pub fn select_batch(universe: Vec<RawRiskRecord>, group: WeatherGroup) -> Vec<RawRiskRecord> {
    let matching: Vec<RawRiskRecord> = universe
        .iter()
        .filter(|record| record.weather_tag == group.label())
        .cloned()
        .collect();

    if matching.is_empty() {
        universe
    } else {
        matching
    }
}

/// Fetch, select by weather group, normalize.
pub async fn load_inspections(
    source: &dyn RiskSource,
    group: WeatherGroup,
) -> Result<Vec<Inspection>, SourceError> {
    let universe = source.fetch().await?;
    Ok(process(&select_batch(universe, group)))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InspectionFilter {
    #[default]
    All,
    Pending,
    Urgent,
    High,
    Medium,
}

impl InspectionFilter {
    pub fn matches(&self, inspection: &Inspection) -> bool {
        match self {
            InspectionFilter::All => true,
            InspectionFilter::Pending => inspection.status == InspectionStatus::Pending,
            InspectionFilter::Urgent => inspection.priority == Priority::Urgent,
            InspectionFilter::High => inspection.priority == Priority::High,
            InspectionFilter::Medium => inspection.priority == Priority::Medium,
        }
    }
}

/// Open work first, highest score first. Stable, so equal scores keep
/// their input order.
pub fn sort_for_display(inspections: &mut [Inspection]) {
    inspections.sort_by(|a, b| {
        let a_done = a.status == InspectionStatus::Completed;
        let b_done = b.status == InspectionStatus::Completed;
        a_done
            .cmp(&b_done)
            .then_with(|| b.risk_score.cmp(&a.risk_score))
    });
}

/// Filtered, display-ordered copy of the current inspections.
pub fn query(inspections: &[Inspection], filter: InspectionFilter) -> Vec<Inspection> {
    let mut selected: Vec<Inspection> = inspections
        .iter()
        .filter(|inspection| filter.matches(inspection))
        .cloned()
        .collect();
    sort_for_display(&mut selected);
    selected
}

/// What the map collaborator needs to draw one pin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapMarker {
    pub id: u32,
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub priority: Priority,
    /// Korean tier name for the marker badge.
    pub label: String,
    pub color: String,
    pub status: InspectionStatus,
    pub risk_score: u32,
}

pub fn markers(inspections: &[Inspection]) -> Vec<MapMarker> {
    inspections
        .iter()
        .map(|inspection| MapMarker {
            id: inspection.id,
            lat: inspection.lat,
            lng: inspection.lng,
            title: format!("{} ({})", inspection.location, inspection.district),
            priority: inspection.priority,
            label: inspection.priority.label().to_string(),
            color: inspection.priority.color().to_string(),
            status: inspection.status,
            risk_score: inspection.risk_score,
        })
        .collect()
}
