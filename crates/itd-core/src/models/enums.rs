//! Wire enums. Unrecognized values decode to `Unknown` so new server-side
//! variants do not break decoding.

use serde::{Deserialize, Serialize};

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    WallPost,
    Reply,
    Repost,
    Comment,
    Follow,
    Like,
    #[serde(other)]
    Unknown,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::WallPost => "wall_post",
            NotificationType::Reply => "reply",
            NotificationType::Repost => "repost",
            NotificationType::Comment => "comment",
            NotificationType::Follow => "follow",
            NotificationType::Like => "like",
            NotificationType::Unknown => "unknown",
        }
    }
}

/// What a report is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTargetType {
    Post,
    User,
    Comment,
    #[serde(other)]
    Unknown,
}

impl ReportTargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportTargetType::Post => "post",
            ReportTargetType::User => "user",
            ReportTargetType::Comment => "comment",
            ReportTargetType::Unknown => "unknown",
        }
    }
}

/// Why something is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportReason {
    Spam,
    Violence,
    Hate,
    Adult,
    Fraud,
    #[default]
    Other,
    #[serde(other)]
    Unknown,
}

/// Attachment media kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachType {
    Audio,
    Image,
    Video,
    File,
    #[serde(other)]
    Unknown,
}

/// Feed tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostsTab {
    Following,
    #[default]
    Popular,
}

impl PostsTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostsTab::Following => "following",
            PostsTab::Popular => "popular",
        }
    }
}

impl std::str::FromStr for PostsTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "following" => Ok(PostsTab::Following),
            "popular" => Ok(PostsTab::Popular),
            other => Err(format!("unknown tab '{other}'")),
        }
    }
}

/// Formatting span kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanType {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Monospace,
    Hashtag,
    #[serde(other)]
    Unknown,
}

/// Audience for a privacy setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    Everyone,
    Followers,
    Nobody,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_type_wire_names() {
        let t: NotificationType = serde_json::from_str(r#""wall_post""#).unwrap();
        assert_eq!(t, NotificationType::WallPost);
        assert_eq!(serde_json::to_string(&t).unwrap(), r#""wall_post""#);
    }

    #[test]
    fn unknown_variants_do_not_fail() {
        let t: NotificationType = serde_json::from_str(r#""mention""#).unwrap();
        assert_eq!(t, NotificationType::Unknown);
        let t: AttachType = serde_json::from_str(r#""gif""#).unwrap();
        assert_eq!(t, AttachType::Unknown);
    }

    #[test]
    fn posts_tab_parses() {
        assert_eq!("following".parse::<PostsTab>().unwrap(), PostsTab::Following);
        assert!("latest".parse::<PostsTab>().is_err());
    }
}
