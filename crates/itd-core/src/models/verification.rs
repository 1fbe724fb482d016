//! Account verification requests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp::{self, Timestamp};

/// A submitted verification request.
///
/// `status` stays a string: the full set of review states is not published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub video_url: String,
    pub status: String,
    #[serde(default)]
    pub reject_reason: Option<String>,
    #[serde(default)]
    pub reviewer: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub reviewed_at: Option<Timestamp>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "timestamp")]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStatus {
    pub status: String,
    pub request_id: Uuid,
    #[serde(with = "timestamp")]
    pub submitted_at: Timestamp,
}
