//! Hashtags and pagination.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hashtag {
    pub id: String,
    pub name: String,
    pub posts_count: u64,
}

/// Cursor-based page info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPagination {
    pub limit: u32,
    #[serde(default)]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Page-number-based page info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub has_more: bool,
}
