use serde::{Deserialize, Serialize};

use crate::models::inspection::{Inspection, InspectionStatus, Priority};

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub pending: usize,
    pub completed: usize,
    /// Urgent inspections regardless of status.
    pub urgent: usize,
    pub scheduled: usize,
}

impl DashboardStats {
    pub fn compute(inspections: &[Inspection], scheduled: usize) -> Self {
        let count_status = |status| inspections.iter().filter(|i| i.status == status).count();

        DashboardStats {
            pending: count_status(InspectionStatus::Pending),
            completed: count_status(InspectionStatus::Completed),
            urgent: inspections
                .iter()
                .filter(|i| i.priority == Priority::Urgent)
                .count(),
            scheduled,
        }
    }
}
