//! Users, clans and privacy settings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pin::ShortPin;
use super::timestamp::{self, Timestamp};
use super::AccessType;

/// A user as embedded in posts, comments and lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub display_name: String,
    pub avatar: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub followers_count: Option<u64>,
}

/// A full profile, as returned by `users/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFull {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub pin: Option<ShortPin>,
    #[serde(default)]
    pub pinned_post_id: Option<Uuid>,
    #[serde(default)]
    pub is_private: Option<bool>,
    #[serde(default)]
    pub wall_closed: Option<bool>,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub posts_count: u64,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub is_following: Option<bool>,
    #[serde(default)]
    pub is_followed_by: Option<bool>,
    #[serde(default)]
    pub online: bool,
    #[serde(default, with = "timestamp::option")]
    pub last_seen: Option<Timestamp>,
}

impl std::ops::Deref for UserFull {
    type Target = User;

    fn deref(&self) -> &User {
        &self.user
    }
}

/// A clan entry from the top-clans leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clan {
    pub avatar: String,
    pub member_count: u64,
}

/// A partial privacy update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_access: Option<AccessType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes_visibility: Option<AccessType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_last_seen: Option<bool>,
}

/// Profile fields to change. Empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_profile_decodes_with_flattened_user() {
        let user: UserFull = serde_json::from_value(json!({
            "id": "u1",
            "username": "alice",
            "displayName": "Alice",
            "avatar": "🦊",
            "verified": true,
            "followersCount": 12,
            "bio": "hi",
            "pin": {"slug": "early", "name": "Early", "description": "Joined early"},
            "followingCount": 3,
            "postsCount": 7,
            "createdAt": "2025-11-01 10:00:00+03",
            "online": false,
            "lastSeen": null
        }))
        .unwrap();

        assert_eq!(user.username.as_deref(), Some("alice"));
        assert_eq!(user.followers_count, Some(12));
        assert_eq!(user.pin.as_ref().map(|p| p.slug.as_str()), Some("early"));
        assert!(user.last_seen.is_none());
    }

    #[test]
    fn privacy_omits_unset_fields() {
        let privacy = PrivacySettings {
            is_private: Some(true),
            wall_access: Some(AccessType::Followers),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&privacy).unwrap(),
            json!({"isPrivate": true, "wallAccess": "followers"})
        );
    }

    #[test]
    fn profile_changes_use_wire_names() {
        let changes = ProfileChanges {
            display_name: Some("Bob".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!({"displayName": "Bob"})
        );
    }
}
