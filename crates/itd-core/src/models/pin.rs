//! Profile pins (badges).

use serde::{Deserialize, Serialize};

use super::timestamp::{self, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortPin {
    pub slug: String,
    pub name: String,
    pub description: String,
}

/// An owned pin with the time it was granted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    #[serde(flatten)]
    pub pin: ShortPin,
    #[serde(with = "timestamp")]
    pub granted_at: Timestamp,
}
