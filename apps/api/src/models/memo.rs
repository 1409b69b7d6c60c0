use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-text inspector note, independent of inspections and schedules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Memo {
    pub id: Uuid,
    pub content: String,
    /// Creation time, pre-formatted for display.
    pub timestamp: String,
}
