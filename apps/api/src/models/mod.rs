pub mod inspection;
pub mod memo;
pub mod schedule;
