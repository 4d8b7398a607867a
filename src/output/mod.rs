// src/output/mod.rs
//! Where rendered output and alerts go.
//!
//! Formatting stays pure in `crate::formatting`; the traits here are the only
//! places that touch stdout, stderr, or desktop notifications, so the watch
//! loop can be driven with recording fakes.

mod notify;
mod terminal;

use crate::error::AppError;
use crate::types::OutputMode;
use serde_json::Value;

pub use notify::{notification_script, DesktopNotifier};
pub use terminal::TerminalRenderer;

/// The ability to show a payload to the user.
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        payload: &Value,
        mode: OutputMode,
        title: &str,
        verbose: bool,
    ) -> Result<(), AppError>;
}

/// The ability to alert the user about a new tweet.
///
/// # Laws
///
/// - Never fails: delivery problems are logged and dropped.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, username: &str, text: &str);
}
