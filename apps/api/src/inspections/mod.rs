//! Inspection lifecycle: state, schedules, memos and dashboard counters.

pub mod handlers;
pub mod manager;
pub mod memos;
pub mod reload;
pub mod stats;
