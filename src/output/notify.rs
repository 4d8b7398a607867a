// src/output/notify.rs
//! Desktop notifications for new tweets.
//!
//! macOS gets a native notification through `osascript`; every other
//! platform gets a terminal bell.

use super::Notifier;
use crate::constants::NOTIFICATION_PREVIEW_CHARS;
use crate::error::AppError;

#[cfg(target_os = "macos")]
const NOTIFY_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

#[async_trait::async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, username: &str, text: &str) {
        if let Err(e) = notify_with_platform_command(username, text).await {
            log::debug!("Notification for @{} dropped: {}", username, e);
        }
    }
}

/// The AppleScript that shows `text` under an `x-cli: @username` title.
pub fn notification_script(username: &str, text: &str) -> String {
    let preview: String = text
        .chars()
        .take(NOTIFICATION_PREVIEW_CHARS)
        .collect::<String>()
        .replace('"', "\\\"")
        .replace('\n', " ");
    format!(
        "display notification \"{}\" with title \"x-cli: @{}\"",
        preview, username
    )
}

#[cfg(target_os = "macos")]
async fn notify_with_platform_command(username: &str, text: &str) -> Result<(), AppError> {
    use std::process::Stdio;
    use std::time::Duration;
    use tokio::process::Command;

    let script = notification_script(username, text);
    let child = Command::new("osascript")
        .arg("-e")
        .arg(&script)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(Duration::from_secs(NOTIFY_TIMEOUT_SECS), child)
        .await
        .map_err(|_| AppError::NotificationFailure("osascript timed out".to_string()))?
        .map_err(|e| AppError::NotificationFailure(format!("Failed to spawn osascript: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(AppError::NotificationFailure(format!(
            "osascript failed: {}",
            stderr.trim()
        )))
    }
}

/// Rings the terminal bell on stderr so piped stdout stays clean.
#[cfg(not(target_os = "macos"))]
async fn notify_with_platform_command(_username: &str, _text: &str) -> Result<(), AppError> {
    use std::io::Write;

    let mut stderr = std::io::stderr().lock();
    stderr
        .write_all(b"\x07")
        .and_then(|_| stderr.flush())
        .map_err(|e| AppError::NotificationFailure(format!("Failed to ring bell: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_escapes_quotes_and_newlines() {
        assert_eq!(
            notification_script("alice", "say \"hi\"\nnow"),
            "display notification \"say \\\"hi\\\" now\" with title \"x-cli: @alice\""
        );
    }

    #[test]
    fn test_script_preview_is_truncated() {
        let text = "x".repeat(250);
        let script = notification_script("bob", &text);
        assert!(script.contains(&format!("\"{}\"", "x".repeat(NOTIFICATION_PREVIEW_CHARS))));
        assert!(!script.contains(&"x".repeat(NOTIFICATION_PREVIEW_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_notify_never_fails() {
        DesktopNotifier.notify("alice", "hello").await;
    }
}
