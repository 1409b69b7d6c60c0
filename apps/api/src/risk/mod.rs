//! Risk data ingestion and prioritization.

pub mod normalizer;
pub mod pipeline;
pub mod source;
