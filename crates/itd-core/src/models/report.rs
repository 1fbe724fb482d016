//! Reports.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp::{self, Timestamp};

/// Acknowledgement of a filed report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub id: Uuid,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}
