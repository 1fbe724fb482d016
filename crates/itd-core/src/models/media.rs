//! Attachments and polls.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: Uuid,
    /// Kept as a string: the API also sends values outside [`super::AttachType`].
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOption {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub votes_count: u64,
}

/// A poll attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: Uuid,
    pub question: String,
    #[serde(default)]
    pub options: Vec<PollOption>,
    #[serde(default)]
    pub multiple_choice: bool,
    #[serde(default)]
    pub total_votes: u64,
    #[serde(default)]
    pub has_voted: bool,
    #[serde(default)]
    pub voted_option_ids: Vec<Uuid>,
}

/// A poll to create alongside a new post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPoll {
    pub question: String,
    pub options: Vec<NewPollOption>,
    #[serde(default)]
    pub multiple_choice: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPollOption {
    pub text: String,
}

impl NewPoll {
    pub fn new<I, S>(question: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question: question.into(),
            options: options
                .into_iter()
                .map(|text| NewPollOption { text: text.into() })
                .collect(),
            multiple_choice: false,
        }
    }

    pub fn multiple_choice(mut self, yes: bool) -> Self {
        self.multiple_choice = yes;
        self
    }
}
