// src/watch/state.rs
//! Per-target cursors, session counters, and the pure rules the loop applies.

use crate::constants::{RATE_LIMIT_FALLBACK_WAIT_SECS, RATE_LIMIT_SAFETY_MARGIN_SECS};
use crate::types::{TweetId, UserId, Username};
use colored::Colorize;
use std::collections::HashMap;

/// An account being watched and the newest tweet already delivered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub username: Username,
    pub user_id: UserId,
    pub last_seen_id: Option<TweetId>,
}

impl WatchTarget {
    pub fn new(username: Username, user_id: UserId) -> Self {
        Self {
            username,
            user_id,
            last_seen_id: None,
        }
    }
}

/// Counters accumulated over a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchStats {
    pub tweets_seen: u32,
    pub polls: u32,
    pub per_user: HashMap<Username, u32>,
}

impl WatchStats {
    pub fn record(&mut self, username: &Username) {
        self.tweets_seen += 1;
        *self.per_user.entry(username.clone()).or_insert(0) += 1;
    }

    pub fn seen_for(&self, username: &Username) -> u32 {
        self.per_user.get(username).copied().unwrap_or(0)
    }

    pub fn budget_reached(&self, max_items: Option<u32>) -> bool {
        max_items.is_some_and(|max| self.tweets_seen >= max)
    }

    /// The end-of-session report, one line per target in watch order.
    pub fn summary(&self, targets: &[WatchTarget]) -> String {
        let mut lines = vec![
            String::new(),
            "Watch session summary".bold().to_string(),
            format!("  Polls: {}", self.polls),
            format!("  Tweets seen: {}", self.tweets_seen),
        ];
        lines.extend(targets.iter().map(|t| {
            format!(
                "  {}: {} new tweets",
                t.username.handle(),
                self.seen_for(&t.username)
            )
        }));
        lines.join("\n")
    }
}

/// True when `text` should be shown under `filters`.
///
/// No filters match everything; otherwise any keyword must occur in the
/// text, ignoring case. Empty text never matches a non-empty filter set.
pub fn matches_filters(text: &str, filters: &[String]) -> bool {
    if filters.is_empty() {
        return true;
    }
    if text.is_empty() {
        return false;
    }
    let haystack = text.to_lowercase();
    filters
        .iter()
        .any(|keyword| haystack.contains(&keyword.to_lowercase()))
}

/// Seconds to wait after a rate limit that resets at `reset_at` (Unix
/// seconds, as sent by the API). Unparseable values wait a fixed minute.
pub fn backoff_seconds(reset_at: &str, now: i64) -> u64 {
    match reset_at.trim().parse::<i64>() {
        Ok(reset) => reset.saturating_sub(now).max(0) as u64 + RATE_LIMIT_SAFETY_MARGIN_SECS,
        Err(_) => RATE_LIMIT_FALLBACK_WAIT_SECS,
    }
}
