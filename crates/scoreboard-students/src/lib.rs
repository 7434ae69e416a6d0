//! Scoreboard: Student aggregates.
//!
//! Keeps a running sum and count per student, so a student's average is
//! an O(1) lookup no matter how many scores have streamed in.

pub mod application;
pub mod domain;
