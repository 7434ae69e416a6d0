//! Route modules.

pub mod exams;
pub mod health;
pub mod students;

use scoreboard_core::pagination::DEFAULT_PAGE_LIMIT;
use serde::Deserialize;

/// Query string accepted by the listing endpoints.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Keys to skip.
    #[serde(default)]
    pub skip: i64,
    /// Keys to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// `ASC` or `DESC`; anything else lists ascending.
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

fn default_sort_order() -> String {
    "ASC".to_owned()
}
