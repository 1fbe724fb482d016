//! itd-http - Authenticated HTTP client for the itd social network API.
//!
//! All calls flow through a [`Client`]. The client owns one [`Session`]
//! holding an access token plus session cookies. When a call fails with an
//! authentication error, the session refreshes the token once (shared by all
//! concurrent callers) and the call is retried once.
//!
//! # Example
//!
//! ```no_run
//! use itd_core::Credentials;
//! use itd_http::{Client, FeedQuery};
//!
//! # async fn example() -> itd_core::Result<()> {
//! let client = Client::builder()
//!     .credentials(Credentials::new("access-token", "refresh_token=..."))
//!     .build()
//!     .await?;
//!
//! let feed = client.posts(&FeedQuery::default()).await?;
//! for post in feed.posts {
//!     println!("{}: {}", post.author.display_name, post.content);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod diagnostics;
mod pipeline;
mod request;
mod session;
mod transport;

pub mod routes;

pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, DEFAULT_TIMEOUT, DEFAULT_UPLOAD_TIMEOUT, USER_AGENT};
pub use diagnostics::{MAX_BODY_CHARS, truncate};
pub use pipeline::Pipeline;
pub use request::{AuthMode, Params, RequestSpec};
pub use routes::{CommentsQuery, FeedQuery, NewPost};
pub use session::{Session, SessionState, Snapshot};
pub use transport::{Reply, Transport};
