// src/types/ids.rs
//! Typed identifiers for tweets and users.

use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Matches `twitter.com/<user>/status/<id>` and the `x.com` equivalent.
static STATUS_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:twitter\.com|x\.com)/\w+/status/(\d+)").expect("status URL pattern is valid")
});

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweetMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserMarker;

pub type TweetId = Id<TweetMarker>;
pub type UserId = Id<UserMarker>;

impl<T> Id<T> {
    /// Create an ID from a value the API handed back (internal use)
    pub(crate) fn from_api(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _phantom: PhantomData,
        }
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl TweetId {
    /// Extracts a tweet ID from a status URL or a raw numeric string.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if let Some(caps) = STATUS_URL.captures(input) {
            return Ok(Self::from_api(&caps[1]));
        }

        let trimmed = input.trim();
        if is_numeric(trimmed) {
            return Ok(Self::from_api(trimmed));
        }

        Err(ValidationError::InvalidTweetId(input.to_string()))
    }
}

impl UserId {
    /// Accepts a numeric user ID.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if is_numeric(trimmed) {
            Ok(Self::from_api(trimmed))
        } else {
            Err(ValidationError::InvalidUserId(input.to_string()))
        }
    }
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_api(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tweet_id_parsing() {
        let id = TweetId::parse("1234567890").unwrap();
        assert_eq!(id.as_str(), "1234567890");

        let id = TweetId::parse("  42 \n").unwrap();
        assert_eq!(id.as_str(), "42");

        let id = TweetId::parse("https://x.com/jack/status/20").unwrap();
        assert_eq!(id.as_str(), "20");

        let id = TweetId::parse("https://twitter.com/some_user/status/1777?s=20").unwrap();
        assert_eq!(id.as_str(), "1777");
    }

    #[test]
    fn test_invalid_tweet_ids() {
        assert!(TweetId::parse("").is_err());
        assert!(TweetId::parse("abc").is_err());
        assert!(TweetId::parse("12a4").is_err());
        assert!(TweetId::parse("https://example.com/jack/status/20").is_err());

        let err = TweetId::parse("nope").unwrap_err();
        assert_eq!(err.to_string(), "Invalid tweet ID or URL: nope");
    }

    #[test]
    fn test_user_id() {
        assert_eq!(UserId::parse("783214").unwrap().as_str(), "783214");
        assert!(UserId::parse("jack").is_err());
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = TweetId::parse("99").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"99\"");
        let back: TweetId = serde_json::from_str("\"99\"").unwrap();
        assert_eq!(back, id);
    }
}
