//! Notifications.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NotificationType;
use super::timestamp::{self, Timestamp};

/// The user who caused a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationActor {
    pub id: Uuid,
    pub display_name: String,
    #[serde(default)]
    pub username: Option<String>,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub read_at: Option<Timestamp>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    pub actor: NotificationActor,
    pub read: bool,
}
