//! Typed data model of the itd API.
//!
//! Field names are camelCase on the wire. Timestamps go through
//! [`timestamp`] to accept the server's abbreviated offsets.

mod common;
mod enums;
mod media;
mod notification;
mod pin;
mod post;
mod report;
mod responses;
mod span;
pub mod timestamp;
mod user;
mod verification;

pub use common::{CursorPagination, Hashtag, PagePagination};
pub use enums::{
    AccessType, AttachType, NotificationType, PostsTab, ReportReason, ReportTargetType, SpanType,
};
pub use media::{Attachment, NewPoll, NewPollOption, Poll, PollOption};
pub use notification::{Notification, NotificationActor};
pub use pin::{Pin, ShortPin};
pub use post::{Comment, Post};
pub use report::NewReport;
pub use responses::{
    ClanList, CommentList, Follow, HashtagFeed, Like, Message, NotificationCount,
    NotificationList, PinList, PinResult, PlatformStatus, PostFeed, PostUpdate, PrivacyUpdate,
    ProfileUpdate, RefreshedToken, Replies, SearchResults, SetPin, Success, UserList, WhoToFollow,
};
pub use span::Span;
pub use timestamp::Timestamp;
pub use user::{Clan, PrivacySettings, ProfileChanges, User, UserFull};
pub use verification::{Verification, VerificationStatus};
