//! Domain model for student aggregates.

pub mod aggregates;
