// src/config.rs
use crate::constants::DEFAULT_WATCH_INTERVAL_SECS;
use crate::error::AppError;
use crate::types::{Credentials, OutputMode};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const API_KEY_VAR: &str = "X_API_KEY";
pub const API_SECRET_VAR: &str = "X_API_SECRET";
pub const ACCESS_TOKEN_VAR: &str = "X_ACCESS_TOKEN";
pub const ACCESS_TOKEN_SECRET_VAR: &str = "X_ACCESS_TOKEN_SECRET";
pub const BEARER_TOKEN_VAR: &str = "X_BEARER_TOKEN";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(
    name = "x-cli",
    author,
    version,
    about = "CLI for the X/Twitter API v2",
    long_about = None
)]
pub struct CommandLineInput {
    /// JSON output
    #[arg(short, long, global = true, conflicts_with_all = ["plain", "markdown"])]
    pub json: bool,

    /// TSV output for piping
    #[arg(short, long, global = true, conflicts_with = "markdown")]
    pub plain: bool,

    /// Markdown output
    #[arg(short, long, global = true)]
    pub markdown: bool,

    /// Verbose output (metrics, timestamps, metadata) and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CommandLineInput {
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.json, self.plain, self.markdown)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tweet operations
    #[command(subcommand)]
    Tweet(TweetCommand),

    /// User operations
    #[command(subcommand)]
    User(UserCommand),

    /// Operations on the authenticated account
    #[command(subcommand)]
    Me(MeCommand),

    /// Like a tweet
    Like { id_or_url: String },

    /// Remove a like
    Unlike { id_or_url: String },

    /// Retweet a tweet
    Retweet { id_or_url: String },

    /// Undo a retweet
    Unretweet { id_or_url: String },

    /// Poll accounts and show new tweets as they arrive
    Watch(WatchArgs),
}

impl Command {
    /// Whether the command acts as the authenticated account and so needs
    /// its user ID up front.
    pub fn needs_identity(&self) -> bool {
        matches!(
            self,
            Command::Me(_)
                | Command::Like { .. }
                | Command::Unlike { .. }
                | Command::Retweet { .. }
                | Command::Unretweet { .. }
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum TweetCommand {
    /// Post a tweet
    Post {
        text: String,
        /// Comma-separated poll options
        #[arg(long)]
        poll: Option<String>,
        /// Poll duration in minutes
        #[arg(long, default_value_t = crate::constants::DEFAULT_POLL_DURATION_MINUTES)]
        poll_duration: u32,
    },
    /// Fetch a tweet by ID or URL
    Get { id_or_url: String },
    /// Delete a tweet
    Delete { id_or_url: String },
    /// Reply to a tweet
    Reply { id_or_url: String, text: String },
    /// Quote a tweet
    Quote { id_or_url: String, text: String },
    /// Search recent tweets
    Search {
        query: String,
        /// Max results (10-100)
        #[arg(long = "max", default_value_t = 10)]
        max_results: u32,
    },
    /// Engagement metrics for a tweet
    Metrics { id_or_url: String },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Look up a profile
    Get { username: String },
    /// Recent tweets
    Timeline {
        username: String,
        /// Max results (5-100)
        #[arg(long = "max", default_value_t = 10)]
        max_results: u32,
    },
    /// Followers
    Followers {
        username: String,
        /// Max results (1-1000)
        #[arg(long = "max", default_value_t = 100)]
        max_results: u32,
    },
    /// Accounts the user follows
    Following {
        username: String,
        /// Max results (1-1000)
        #[arg(long = "max", default_value_t = 100)]
        max_results: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum MeCommand {
    /// Recent mentions
    Mentions {
        /// Max results (5-100)
        #[arg(long = "max", default_value_t = 10)]
        max_results: u32,
    },
    /// Bookmarked tweets
    Bookmarks {
        /// Max results (1-100)
        #[arg(long = "max", default_value_t = 10)]
        max_results: u32,
    },
    /// Bookmark a tweet
    Bookmark { id_or_url: String },
    /// Remove a bookmark
    Unbookmark { id_or_url: String },
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Usernames to watch, with or without @
    #[arg(required = true)]
    pub usernames: Vec<String>,

    /// Poll interval in seconds
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_WATCH_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: u64,

    /// Only show tweets containing this keyword (repeatable)
    #[arg(short, long = "filter")]
    pub filters: Vec<String>,

    /// Desktop notification for each new tweet
    #[arg(short, long)]
    pub notify: bool,

    /// Stop after N tweets (0 = unlimited)
    #[arg(long = "max", default_value_t = 0)]
    pub max_tweets: u32,
}

impl WatchArgs {
    pub fn max_items(&self) -> Option<u32> {
        (self.max_tweets > 0).then_some(self.max_tweets)
    }
}

/// `~/.config/x-cli/.env`
pub fn user_env_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("x-cli").join(".env"))
}

/// Loads `.env` files into the process environment: the per-user file
/// first, then one in the working directory. Variables already set win.
pub fn load_env_files() {
    if let Some(path) = user_env_file().filter(|p| p.exists()) {
        match dotenvy::from_path(&path) {
            Ok(()) => log::debug!("Loaded {}", path.display()),
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }
    }
    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("Loaded {}", path.display());
    }
}

/// Reads credentials from the environment after loading `.env` files.
pub fn load_credentials() -> Result<Credentials, AppError> {
    load_env_files();
    credentials_from(|name| std::env::var(name).ok())
}

/// Builds credentials from a variable lookup. Empty values count as missing.
pub fn credentials_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Credentials, AppError> {
    let require = |name: &str| {
        lookup(name).filter(|v| !v.is_empty()).ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "{} is not set. Set {}, {}, {}, {} and {}.",
                name,
                API_KEY_VAR,
                API_SECRET_VAR,
                ACCESS_TOKEN_VAR,
                ACCESS_TOKEN_SECRET_VAR,
                BEARER_TOKEN_VAR
            ))
        })
    };

    Ok(Credentials::new(
        require(API_KEY_VAR)?,
        require(API_SECRET_VAR)?,
        require(ACCESS_TOKEN_VAR)?,
        require(ACCESS_TOKEN_SECRET_VAR)?,
        require(BEARER_TOKEN_VAR)?,
    ))
}
