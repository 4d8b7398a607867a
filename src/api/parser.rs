// src/api/parser.rs
//! Pure functions that turn raw API bodies into results.
//!
//! Nothing here performs I/O, so every rule about what counts as an error
//! response can be tested with plain strings.

use crate::constants::ERROR_BODY_PREVIEW_CHARS;
use crate::error::AppError;
use crate::types::{TweetId, UserId};
use serde_json::{json, Value};

/// One page of a user's timeline, newest tweet first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelinePage {
    pub tweets: Vec<Value>,
    pub includes: Value,
}

impl TimelinePage {
    pub fn from_response(mut response: Value) -> Self {
        let tweets = match response.get_mut("data").map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        let includes = match response.get_mut("includes").map(Value::take) {
            Some(includes @ Value::Object(_)) => includes,
            _ => json!({}),
        };
        Self { tweets, includes }
    }

    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }

    /// ID of the newest tweet on the page.
    pub fn newest_id(&self) -> Option<TweetId> {
        self.tweets.first().and_then(tweet_id)
    }
}

/// Interprets a response body given its HTTP status.
pub fn interpret_body(status: u16, body: &str) -> Result<Value, AppError> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if !(200..300).contains(&status) {
        return Err(AppError::RequestFailed {
            status,
            message: error_message(parsed.as_ref(), body),
        });
    }

    let data = match parsed {
        Some(data) => data,
        None if body.trim().is_empty() => json!({}),
        None => {
            return Err(AppError::MalformedResponse(format!(
                "expected JSON, got: {}",
                preview(body)
            )))
        }
    };

    // The API sometimes answers 200 with errors and no data.
    if data.get("errors").is_some() && data.get("data").is_none() {
        return Err(AppError::RequestFailed {
            status,
            message: error_message(Some(&data), body),
        });
    }

    Ok(data)
}

/// Joins the `detail` (or `message`) of each entry in `errors`, falling
/// back to the start of the raw body.
pub fn error_message(parsed: Option<&Value>, body: &str) -> String {
    let joined = parsed
        .and_then(|v| v.get("errors"))
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| {
                    non_empty_str(e.get("detail")).or_else(|| non_empty_str(e.get("message")))
                })
                .collect::<Vec<_>>()
                .join("; ")
        })
        .unwrap_or_default();

    if joined.is_empty() {
        preview(body)
    } else {
        joined
    }
}

fn preview(body: &str) -> String {
    body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect()
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// The `id` of a tweet object.
pub fn tweet_id(tweet: &Value) -> Option<TweetId> {
    tweet.get("id").and_then(Value::as_str).map(TweetId::from_api)
}

/// Text shown for a tweet: the long-form body when present, else `text`.
pub fn display_text(tweet: &Value) -> &str {
    tweet
        .get("note_tweet")
        .and_then(|note| non_empty_str(note.get("text")))
        .or_else(|| tweet.get("text").and_then(Value::as_str))
        .unwrap_or("")
}

/// `data.id` of a single-object response.
pub fn data_id(response: &Value) -> Result<UserId, AppError> {
    response
        .get("data")
        .and_then(|d| d.get("id"))
        .and_then(Value::as_str)
        .map(UserId::from_api)
        .ok_or_else(|| AppError::MalformedResponse("response has no data.id".to_string()))
}
