//! Application layer: the shared store and its query handlers.

pub mod query_handlers;
pub mod store;
