//! Per-attempt request dumps.

use std::borrow::Cow;

use tracing::debug;

use crate::request::RequestSpec;
use crate::transport::Reply;

/// Bodies longer than this many characters are cut.
pub const MAX_BODY_CHARS: usize = 1000;

/// Truncate to [`MAX_BODY_CHARS`] characters, marking the cut with `...`.
pub fn truncate(body: &str) -> Cow<'_, str> {
    match body.char_indices().nth(MAX_BODY_CHARS) {
        Some((idx, _)) => Cow::Owned(format!("{}...", &body[..idx])),
        None => Cow::Borrowed(body),
    }
}

pub(crate) fn dump(spec: &RequestSpec, url: &str, reply: Option<&Reply>, error: Option<&str>) {
    let request_body = spec.describe_body();
    debug!(
        target: "itd_http::dump",
        method = %spec.method,
        url,
        request = %truncate(&request_body),
        status = reply.map(|r| r.status),
        response = %reply.map(|r| truncate(&r.body)).unwrap_or_default(),
        error = error.unwrap_or_default(),
        "request dump"
    );
}
