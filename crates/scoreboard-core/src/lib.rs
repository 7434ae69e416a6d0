//! Scoreboard Core: shared domain abstractions.
//!
//! This crate defines the score event, the error taxonomy, pagination
//! primitives, and the projection seam that every aggregate store
//! implements. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod event;
pub mod pagination;
pub mod projection;
