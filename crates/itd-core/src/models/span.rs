use serde::{Deserialize, Serialize};

use super::SpanType;

/// A formatting span over post text, in character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    #[serde(rename = "type")]
    pub kind: SpanType,
    pub length: usize,
    pub offset: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}
