//! Inspection State Manager.
//!
//! Owns the current inspections (rebuilt wholesale on every reload) and the
//! schedule list (loaded once, then edited in place). Every mutation is
//! mirrored to the injected store on a best-effort basis: a failed write is
//! logged and the in-memory change stands.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::inspections::stats::DashboardStats;
use crate::models::inspection::{Inspection, InspectionStatus, RawRiskRecord};
use crate::models::schedule::{Schedule, ScheduleRequest};
use crate::risk::pipeline::process;
use crate::store::{self, KeyValueStore, COMPLETED_KEY, SCHEDULES_KEY};

pub struct InspectionManager {
    store: Arc<dyn KeyValueStore>,
    inspections: Vec<Inspection>,
    schedules: Vec<Schedule>,
}

impl InspectionManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let schedules: Vec<Schedule> = store::load_or_default(store.as_ref(), SCHEDULES_KEY);
        info!(count = schedules.len(), "Loaded persisted schedules");
        Self {
            store,
            inspections: Vec::new(),
            schedules,
        }
    }

    pub fn inspections(&self) -> &[Inspection] {
        &self.inspections
    }

    /// Newest first.
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    /// Schedules in visit order, earliest date and time first.
    pub fn upcoming_schedules(&self) -> Vec<Schedule> {
        let mut upcoming = self.schedules().to_vec();
        upcoming.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
        upcoming
    }

    /// Normalizes `batch` and installs the result.
    pub fn reload(&mut self, batch: &[RawRiskRecord]) {
        self.install(process(batch));
    }

    /// Replaces the current inspections, restoring completed status for any
    /// id in the persisted completed set.
    pub fn install(&mut self, mut inspections: Vec<Inspection>) {
        let completed: HashSet<u32> = store::load_or_default(self.store.as_ref(), COMPLETED_KEY);

        for inspection in inspections.iter_mut() {
            if completed.contains(&inspection.id) {
                inspection.status = InspectionStatus::Completed;
            }
        }

        info!(
            count = inspections.len(),
            restored_completed = completed.len(),
            "Inspections reloaded"
        );
        self.inspections = inspections;
    }

    /// Marks an inspection completed and drops its schedules.
    /// Returns false, changing nothing, when the id is unknown.
    pub fn complete(&mut self, inspection_id: u32) -> bool {
        let Some(inspection) = self
            .inspections
            .iter_mut()
            .find(|inspection| inspection.id == inspection_id)
        else {
            debug!(inspection_id, "Ignoring completion of unknown inspection");
            return false;
        };
        inspection.status = InspectionStatus::Completed;

        let completed_ids: Vec<u32> = self
            .inspections
            .iter()
            .filter(|inspection| inspection.status == InspectionStatus::Completed)
            .map(|inspection| inspection.id)
            .collect();
        store::persist(self.store.as_ref(), COMPLETED_KEY, &completed_ids);

        let before = self.schedules.len();
        self.schedules
            .retain(|schedule| schedule.inspection_id != inspection_id);
        store::persist(self.store.as_ref(), SCHEDULES_KEY, &self.schedules);

        info!(
            inspection_id,
            pruned_schedules = before - self.schedules.len(),
            "Inspection completed"
        );
        true
    }

    /// Books a visit for a known inspection. Unknown ids are a no-op.
    /// `request` is expected to have passed [`ScheduleRequest::validate`].
    pub fn add_schedule(
        &mut self,
        inspection_id: u32,
        request: ScheduleRequest,
    ) -> Option<Schedule> {
        let Some(inspection) = self
            .inspections
            .iter()
            .find(|inspection| inspection.id == inspection_id)
        else {
            debug!(inspection_id, "Ignoring schedule for unknown inspection");
            return None;
        };

        let schedule = Schedule::for_inspection(inspection, request);
        self.schedules.insert(0, schedule.clone());
        store::persist(self.store.as_ref(), SCHEDULES_KEY, &self.schedules);

        info!(
            schedule_id = %schedule.id,
            inspection_id,
            date = %schedule.date,
            time = %schedule.time,
            "Schedule added"
        );
        Some(schedule)
    }

    pub fn remove_schedule(&mut self, schedule_id: Uuid) -> bool {
        let before = self.schedules.len();
        self.schedules.retain(|schedule| schedule.id != schedule_id);
        if self.schedules.len() == before {
            debug!(%schedule_id, "Ignoring removal of unknown schedule");
            return false;
        }

        store::persist(self.store.as_ref(), SCHEDULES_KEY, &self.schedules);
        info!(%schedule_id, "Schedule removed");
        true
    }

    /// Counters for the dashboard header. The scheduled count is read from
    /// the store so out-of-band edits show up; an unreadable value falls back
    /// to the in-memory list.
    pub fn stats(&self) -> DashboardStats {
        let scheduled = match store::read_json::<Vec<Value>>(self.store.as_ref(), SCHEDULES_KEY) {
            Ok(Some(schedules)) => schedules.len(),
            Ok(None) => 0,
            Err(e) => {
                warn!(error = %e, "Could not read persisted schedules; using in-memory count");
                self.schedules.len()
            }
        };
        DashboardStats::compute(&self.inspections, scheduled)
    }
}
