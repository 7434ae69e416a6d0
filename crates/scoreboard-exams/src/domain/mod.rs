//! Domain model for exam aggregates and reports.

pub mod aggregates;
pub mod report;
