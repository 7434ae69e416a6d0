//! Scoreboard: Exam aggregates.
//!
//! Retains every student's score for each exam and memoizes the computed
//! exam report until the next score for that exam arrives.

pub mod application;
pub mod domain;
