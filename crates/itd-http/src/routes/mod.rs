//! Per-endpoint wrappers.
//!
//! Each wrapper builds a [`RequestSpec`](crate::RequestSpec), runs it through
//! the pipeline and classifies API errors with the endpoint's own
//! [`ErrorTable`](itd_core::error::ErrorTable).

use serde::Serialize;
use serde_json::Value;

use itd_core::Result;
use itd_core::error::InvalidInputError;

pub mod auth;
pub mod comments;
pub mod files;
pub mod hashtags;
pub mod notifications;
pub mod pins;
pub mod platform;
pub mod polls;
pub mod posts;
pub mod reports;
pub mod search;
pub mod users;
pub mod verification;

pub use comments::CommentsQuery;
pub use posts::{FeedQuery, NewPost};

/// Serialize a request body.
pub(crate) fn body<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| {
        InvalidInputError::Other {
            message: format!("unserializable request body: {e}"),
        }
        .into()
    })
}
