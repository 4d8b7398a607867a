// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! them tells the story of how the client talks to the API and how the
//! watch loop paces itself.

use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// X API boundaries
// ---------------------------------------------------------------------------

/// Root of the v2 REST API.
pub const X_API_BASE_URL: &str = "https://api.x.com/2";

/// How long a single request may take before the transport gives up.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Response header carrying the Unix time a rate-limit window resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// Error bodies are truncated to this many characters in messages.
pub const ERROR_BODY_PREVIEW_CHARS: usize = 500;

/// Accepted `max_results` per endpoint family. Values outside are clamped.
pub const SEARCH_RESULTS_RANGE: RangeInclusive<u32> = 10..=100;
pub const TIMELINE_RESULTS_RANGE: RangeInclusive<u32> = 5..=100;
pub const MENTIONS_RESULTS_RANGE: RangeInclusive<u32> = 5..=100;
pub const FOLLOWS_RESULTS_RANGE: RangeInclusive<u32> = 1..=1000;
pub const BOOKMARKS_RESULTS_RANGE: RangeInclusive<u32> = 1..=100;

/// Default poll length for `tweet post --poll`, one day.
pub const DEFAULT_POLL_DURATION_MINUTES: u32 = 1440;

// ---------------------------------------------------------------------------
// Requested fields
// ---------------------------------------------------------------------------

pub const TWEET_DETAIL_FIELDS: &str = "created_at,public_metrics,author_id,conversation_id,in_reply_to_user_id,referenced_tweets,attachments,entities,lang,note_tweet";
pub const TWEET_DETAIL_EXPANSIONS: &str = "author_id,referenced_tweets.id,attachments.media_keys";
pub const TWEET_DETAIL_USER_FIELDS: &str = "name,username,verified,profile_image_url,public_metrics";
pub const TWEET_DETAIL_MEDIA_FIELDS: &str = "url,preview_image_url,type,width,height,alt_text";

pub const TWEET_LIST_FIELDS: &str =
    "created_at,public_metrics,author_id,conversation_id,entities,lang,note_tweet";
pub const TWEET_METRICS_FIELDS: &str = "public_metrics,non_public_metrics,organic_metrics";
pub const MENTION_FIELDS: &str =
    "created_at,public_metrics,author_id,conversation_id,entities,note_tweet";

pub const USER_PROFILE_FIELDS: &str = "created_at,description,public_metrics,verified,profile_image_url,url,location,pinned_tweet_id";
pub const USER_LIST_FIELDS: &str = "created_at,description,public_metrics,verified,profile_image_url";
pub const COMPACT_USER_FIELDS: &str = "name,username,verified";
pub const LIST_USER_FIELDS: &str = "name,username,verified,profile_image_url";
pub const LIST_MEDIA_FIELDS: &str = "url,preview_image_url,type";

// ---------------------------------------------------------------------------
// Watch loop pacing
// ---------------------------------------------------------------------------

/// Seconds added on top of a rate-limit reset before polling again.
pub const RATE_LIMIT_SAFETY_MARGIN_SECS: u64 = 5;

/// Wait used when the reset time cannot be read as a Unix timestamp.
pub const RATE_LIMIT_FALLBACK_WAIT_SECS: u64 = 60;

/// Items requested per target on every pass.
pub const WATCH_PAGE_SIZE: u32 = 10;

/// Items requested when seeding a target's cursor.
pub const WATCH_SEED_PAGE_SIZE: u32 = 5;

/// Default seconds between passes.
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 60;

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Characters of tweet text shown in a desktop notification.
pub const NOTIFICATION_PREVIEW_CHARS: usize = 100;

/// Wrap width for human-mode panels.
pub const PANEL_WIDTH: usize = 78;

/// Description column width in user tables.
pub const USER_TABLE_DESCRIPTION_CHARS: usize = 50;
pub const MARKDOWN_DESCRIPTION_CHARS: usize = 60;
