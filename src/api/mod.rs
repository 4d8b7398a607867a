// src/api/mod.rs
//! X API interaction — the ability to read and act on the platform.
//!
//! Transport (`client`), endpoint knowledge (`endpoints`) and response
//! interpretation (`parser`) are kept apart. The watch loop depends only on
//! the [`TimelineSource`] capability, never on HTTP details.

pub mod client;
pub mod context;
pub mod endpoints;
pub mod parser;

use crate::error::AppError;
use crate::types::{TweetId, UserId, Username};

pub use client::XHttpClient;
pub use context::AuthenticatedContext;
pub use endpoints::{clamp_results, TweetDraft};
pub use parser::TimelinePage;

/// The ability to find accounts and read their recent tweets.
///
/// # Laws
///
/// - `fetch_timeline` returns tweets newest first.
/// - With `since_id = Some(id)`, every returned tweet is newer than `id`.
/// - A rate limit is reported as `AppError::RateLimited`, never as a
///   generic failure.
#[async_trait::async_trait]
pub trait TimelineSource: Send + Sync {
    async fn resolve_user(&self, username: &Username) -> Result<UserId, AppError>;

    async fn fetch_timeline(
        &self,
        user_id: &UserId,
        max_results: u32,
        since_id: Option<&TweetId>,
    ) -> Result<TimelinePage, AppError>;
}

#[async_trait::async_trait]
impl TimelineSource for XHttpClient {
    async fn resolve_user(&self, username: &Username) -> Result<UserId, AppError> {
        let response = self.get_user(username).await?;
        parser::data_id(&response)
    }

    async fn fetch_timeline(
        &self,
        user_id: &UserId,
        max_results: u32,
        since_id: Option<&TweetId>,
    ) -> Result<TimelinePage, AppError> {
        let response = self.get_timeline(user_id, max_results, since_id).await?;
        Ok(TimelinePage::from_response(response))
    }
}
