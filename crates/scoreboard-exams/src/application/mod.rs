//! Application layer: the shared store, its report cache and query handlers.

pub mod query_handlers;
pub mod report_cache;
pub mod store;
