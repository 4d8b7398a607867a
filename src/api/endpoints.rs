// src/api/endpoints.rs
//! The X API v2 operations the CLI exposes.
//!
//! Reads that the app token can serve go out with the bearer token;
//! writes and anything scoped to the authenticated account are signed.

use super::client::XHttpClient;
use super::parser;
use crate::constants::*;
use crate::error::AppError;
use crate::types::{TweetId, UserId, Username};
use reqwest::Method;
use serde_json::{json, Value};
use std::ops::RangeInclusive;

/// A tweet to be posted.
#[derive(Debug, Clone, PartialEq)]
pub struct TweetDraft {
    pub text: String,
    pub reply_to: Option<TweetId>,
    pub quote_tweet_id: Option<TweetId>,
    pub poll_options: Vec<String>,
    pub poll_duration_minutes: u32,
}

impl TweetDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reply_to: None,
            quote_tweet_id: None,
            poll_options: Vec::new(),
            poll_duration_minutes: DEFAULT_POLL_DURATION_MINUTES,
        }
    }

    pub fn replying_to(mut self, id: TweetId) -> Self {
        self.reply_to = Some(id);
        self
    }

    pub fn quoting(mut self, id: TweetId) -> Self {
        self.quote_tweet_id = Some(id);
        self
    }

    pub fn with_poll(mut self, options: Vec<String>, duration_minutes: u32) -> Self {
        self.poll_options = options;
        self.poll_duration_minutes = duration_minutes;
        self
    }

    /// The JSON body for `POST /tweets`.
    pub fn to_body(&self) -> Value {
        let mut body = json!({ "text": self.text });
        if let Some(reply_to) = &self.reply_to {
            body["reply"] = json!({ "in_reply_to_tweet_id": reply_to.as_str() });
        }
        if let Some(quoted) = &self.quote_tweet_id {
            body["quote_tweet_id"] = json!(quoted.as_str());
        }
        if !self.poll_options.is_empty() {
            body["poll"] = json!({
                "options": self.poll_options,
                "duration_minutes": self.poll_duration_minutes,
            });
        }
        body
    }
}

/// Clamps a requested page size into what the endpoint accepts.
pub fn clamp_results(requested: u32, range: &RangeInclusive<u32>) -> u32 {
    requested.clamp(*range.start(), *range.end())
}

fn tweet_action_body(tweet_id: &TweetId) -> Value {
    json!({ "tweet_id": tweet_id.as_str() })
}

impl XHttpClient {
    // ---- identity ----

    /// Looks up the authenticated account's ID via `/users/me`.
    pub async fn authenticated_user_id(&self) -> Result<UserId, AppError> {
        let url = self.endpoint_url("users/me", &[])?;
        let response = self.oauth_request(Method::GET, url, None).await?;
        parser::data_id(&response)
    }

    /// Returns a client whose context carries the self ID, fetching it once
    /// if it is not already known.
    pub async fn resolve_identity(self) -> Result<Self, AppError> {
        if self.context().cached_self_id.is_some() {
            return Ok(self);
        }
        let id = self.authenticated_user_id().await?;
        log::debug!("Authenticated as user {}", id);
        let context = self.context().clone().with_self_id(id);
        Ok(self.with_context(context))
    }

    // ---- tweets ----

    pub async fn post_tweet(&self, draft: &TweetDraft) -> Result<Value, AppError> {
        let url = self.endpoint_url("tweets", &[])?;
        self.oauth_request(Method::POST, url, Some(&draft.to_body()))
            .await
    }

    pub async fn delete_tweet(&self, tweet_id: &TweetId) -> Result<Value, AppError> {
        let url = self.endpoint_url(&format!("tweets/{}", tweet_id), &[])?;
        self.oauth_request(Method::DELETE, url, None).await
    }

    pub async fn get_tweet(&self, tweet_id: &TweetId) -> Result<Value, AppError> {
        let url = self.endpoint_url(
            &format!("tweets/{}", tweet_id),
            &[
                ("tweet.fields", TWEET_DETAIL_FIELDS.to_string()),
                ("expansions", TWEET_DETAIL_EXPANSIONS.to_string()),
                ("user.fields", TWEET_DETAIL_USER_FIELDS.to_string()),
                ("media.fields", TWEET_DETAIL_MEDIA_FIELDS.to_string()),
            ],
        )?;
        self.bearer_get(url).await
    }

    pub async fn search_tweets(&self, query: &str, max_results: u32) -> Result<Value, AppError> {
        let url = self.endpoint_url(
            "tweets/search/recent",
            &[
                ("query", query.to_string()),
                (
                    "max_results",
                    clamp_results(max_results, &SEARCH_RESULTS_RANGE).to_string(),
                ),
                ("tweet.fields", TWEET_LIST_FIELDS.to_string()),
                ("expansions", "author_id,attachments.media_keys".to_string()),
                ("user.fields", LIST_USER_FIELDS.to_string()),
                ("media.fields", LIST_MEDIA_FIELDS.to_string()),
            ],
        )?;
        self.bearer_get(url).await
    }

    /// Non-public and organic metrics need user context, hence OAuth.
    pub async fn get_tweet_metrics(&self, tweet_id: &TweetId) -> Result<Value, AppError> {
        let url = self.endpoint_url(
            &format!("tweets/{}", tweet_id),
            &[("tweet.fields", TWEET_METRICS_FIELDS.to_string())],
        )?;
        self.oauth_request(Method::GET, url, None).await
    }

    // ---- users ----

    pub async fn get_user(&self, username: &Username) -> Result<Value, AppError> {
        let url = self.endpoint_url(
            &format!("users/by/username/{}", username),
            &[("user.fields", USER_PROFILE_FIELDS.to_string())],
        )?;
        self.bearer_get(url).await
    }

    pub async fn get_timeline(
        &self,
        user_id: &UserId,
        max_results: u32,
        since_id: Option<&TweetId>,
    ) -> Result<Value, AppError> {
        let mut params = vec![
            (
                "max_results",
                clamp_results(max_results, &TIMELINE_RESULTS_RANGE).to_string(),
            ),
            ("tweet.fields", TWEET_LIST_FIELDS.to_string()),
            (
                "expansions",
                "author_id,attachments.media_keys,referenced_tweets.id".to_string(),
            ),
            ("user.fields", COMPACT_USER_FIELDS.to_string()),
            ("media.fields", LIST_MEDIA_FIELDS.to_string()),
        ];
        if let Some(since_id) = since_id {
            params.push(("since_id", since_id.to_string()));
        }
        let url = self.endpoint_url(&format!("users/{}/tweets", user_id), &params)?;
        self.bearer_get(url).await
    }

    pub async fn get_followers(&self, user_id: &UserId, max_results: u32) -> Result<Value, AppError> {
        self.get_follow_list(user_id, "followers", max_results).await
    }

    pub async fn get_following(&self, user_id: &UserId, max_results: u32) -> Result<Value, AppError> {
        self.get_follow_list(user_id, "following", max_results).await
    }

    async fn get_follow_list(
        &self,
        user_id: &UserId,
        relation: &str,
        max_results: u32,
    ) -> Result<Value, AppError> {
        let url = self.endpoint_url(
            &format!("users/{}/{}", user_id, relation),
            &[
                (
                    "max_results",
                    clamp_results(max_results, &FOLLOWS_RESULTS_RANGE).to_string(),
                ),
                ("user.fields", USER_LIST_FIELDS.to_string()),
            ],
        )?;
        self.bearer_get(url).await
    }

    // ---- authenticated account ----

    pub async fn get_mentions(&self, max_results: u32) -> Result<Value, AppError> {
        let me = self.context().self_id()?;
        let url = self.endpoint_url(
            &format!("users/{}/mentions", me),
            &[
                (
                    "max_results",
                    clamp_results(max_results, &MENTIONS_RESULTS_RANGE).to_string(),
                ),
                ("tweet.fields", MENTION_FIELDS.to_string()),
                ("expansions", "author_id".to_string()),
                ("user.fields", COMPACT_USER_FIELDS.to_string()),
            ],
        )?;
        self.oauth_request(Method::GET, url, None).await
    }

    pub async fn get_bookmarks(&self, max_results: u32) -> Result<Value, AppError> {
        let me = self.context().self_id()?;
        let url = self.endpoint_url(
            &format!("users/{}/bookmarks", me),
            &[
                (
                    "max_results",
                    clamp_results(max_results, &BOOKMARKS_RESULTS_RANGE).to_string(),
                ),
                ("tweet.fields", TWEET_LIST_FIELDS.to_string()),
                ("expansions", "author_id,attachments.media_keys".to_string()),
                ("user.fields", LIST_USER_FIELDS.to_string()),
                ("media.fields", LIST_MEDIA_FIELDS.to_string()),
            ],
        )?;
        self.oauth_request(Method::GET, url, None).await
    }

    // ---- engagement ----

    pub async fn like_tweet(&self, tweet_id: &TweetId) -> Result<Value, AppError> {
        self.add_relation("likes", tweet_id).await
    }

    pub async fn unlike_tweet(&self, tweet_id: &TweetId) -> Result<Value, AppError> {
        self.remove_relation("likes", tweet_id).await
    }

    pub async fn retweet(&self, tweet_id: &TweetId) -> Result<Value, AppError> {
        self.add_relation("retweets", tweet_id).await
    }

    pub async fn unretweet(&self, tweet_id: &TweetId) -> Result<Value, AppError> {
        self.remove_relation("retweets", tweet_id).await
    }

    pub async fn bookmark_tweet(&self, tweet_id: &TweetId) -> Result<Value, AppError> {
        self.add_relation("bookmarks", tweet_id).await
    }

    pub async fn unbookmark_tweet(&self, tweet_id: &TweetId) -> Result<Value, AppError> {
        self.remove_relation("bookmarks", tweet_id).await
    }

    /// `POST /users/{me}/<relation>` with `{"tweet_id": ...}`.
    async fn add_relation(&self, relation: &str, tweet_id: &TweetId) -> Result<Value, AppError> {
        let me = self.context().self_id()?;
        let url = self.endpoint_url(&format!("users/{}/{}", me, relation), &[])?;
        self.oauth_request(Method::POST, url, Some(&tweet_action_body(tweet_id)))
            .await
    }

    /// `DELETE /users/{me}/<relation>/{tweet_id}`.
    async fn remove_relation(&self, relation: &str, tweet_id: &TweetId) -> Result<Value, AppError> {
        let me = self.context().self_id()?;
        let url = self.endpoint_url(&format!("users/{}/{}/{}", me, relation, tweet_id), &[])?;
        self.oauth_request(Method::DELETE, url, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_draft_body() {
        assert_eq!(TweetDraft::new("hello").to_body(), json!({"text": "hello"}));
    }

    #[test]
    fn test_reply_quote_and_poll_body() {
        let draft = TweetDraft::new("which?")
            .replying_to(TweetId::parse("10").unwrap())
            .quoting(TweetId::parse("20").unwrap())
            .with_poll(vec!["a".to_string(), "b".to_string()], 60);

        assert_eq!(
            draft.to_body(),
            json!({
                "text": "which?",
                "reply": {"in_reply_to_tweet_id": "10"},
                "quote_tweet_id": "20",
                "poll": {"options": ["a", "b"], "duration_minutes": 60}
            })
        );
    }

    #[test]
    fn test_clamp_results() {
        assert_eq!(clamp_results(1, &SEARCH_RESULTS_RANGE), 10);
        assert_eq!(clamp_results(500, &SEARCH_RESULTS_RANGE), 100);
        assert_eq!(clamp_results(0, &TIMELINE_RESULTS_RANGE), 5);
        assert_eq!(clamp_results(5000, &FOLLOWS_RESULTS_RANGE), 1000);
        assert_eq!(clamp_results(42, &BOOKMARKS_RESULTS_RANGE), 42);
    }
}
