// src/lib.rs
//! x-cli library: an X/Twitter API v2 client with OAuth 1.0a signing,
//! output renderers, and a polling watch mode.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, credential loading
//! - **Domain types**: `TweetId`, `UserId`, `Username`, `Credentials`, `OutputMode`
//! - **Signing**: `sign`, `sign_with`, `SigningEntropy`
//! - **API client**: `XHttpClient`, `TimelineSource`, `TimelinePage`
//! - **Formatting**: `format_output`
//! - **Watch mode**: `run_watch`, `WatchSession`, `Clock`, `InterruptSignal`

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod output;
pub mod types;
pub mod watch;

// --- Error Handling ---
pub use crate::error::{ApiErrorKind, AppError};
pub use crate::types::ValidationError;

// --- Domain Types ---
pub use crate::types::{Credentials, OutputMode, TweetId, UserId, Username};

// --- Signing ---
pub use crate::auth::{sign, sign_with, FixedEntropy, SigningEntropy, SystemEntropy};

// --- API Client ---
pub use crate::api::{AuthenticatedContext, TimelinePage, TimelineSource, TweetDraft, XHttpClient};

// --- Formatting & Output ---
pub use crate::formatting::format_output;
pub use crate::output::{DesktopNotifier, Notifier, Renderer, TerminalRenderer};

// --- Watch Mode ---
pub use crate::watch::{
    run_watch, Clock, InterruptSignal, StopReason, SystemClock, WatchOptions, WatchOutcome,
    WatchSession, WatchStats, WatchTarget,
};
