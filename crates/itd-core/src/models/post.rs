//! Posts and comments.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::media::{Attachment, Poll};
use super::timestamp::{self, Timestamp};
use super::user::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub author: User,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub replies_count: u64,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    pub author: User,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub reposts_count: u64,
    #[serde(default)]
    pub views_count: u64,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub is_reposted: bool,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub is_viewed: bool,
    #[serde(default)]
    pub wall_recipient_id: Option<String>,
    #[serde(default)]
    pub wall_recipient: Option<User>,
    /// The reposted post, for reposts.
    #[serde(default)]
    pub original_post: Option<Box<Post>>,
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
    #[serde(default)]
    pub poll: Option<Poll>,
}

impl Post {
    pub fn is_repost(&self) -> bool {
        self.original_post.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repost_nests_original() {
        let post: Post = serde_json::from_value(json!({
            "id": "6a1c9b4e-3f0e-4c52-9d35-1b1b0e4f6a10",
            "content": "look",
            "author": {"displayName": "Bob", "avatar": "🐻"},
            "createdAt": "2026-02-01T09:00:00.000+03",
            "originalPost": {
                "id": "0f5e9d5c-8a4a-4c7e-9a53-6c2b1f0e7d21",
                "content": "original",
                "author": {"displayName": "Alice", "avatar": "🦊"},
                "createdAt": "2026-01-31T20:00:00Z",
                "likesCount": 4
            }
        }))
        .unwrap();

        assert!(post.is_repost());
        let original = post.original_post.as_deref().unwrap();
        assert_eq!(original.likes_count, 4);
        assert!(post.attachments.is_empty());
        assert_eq!(post.created_at.offset().local_minus_utc(), 3 * 3600);
    }
}
