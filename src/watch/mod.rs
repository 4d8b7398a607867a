// src/watch/mod.rs
//! Watch mode: follow accounts and show their new tweets as they arrive.
//!
//! The loop is written against capabilities (`TimelineSource`, `Renderer`,
//! `Notifier`, `Clock`) so it runs the same against the live API and
//! against scripted fakes.

mod clock;
mod session;
mod state;

pub use clock::{Clock, InterruptSignal, SystemClock};
pub use session::{
    resolve_targets, seed_cursors, StopReason, WatchOptions, WatchOutcome, WatchSession,
};
pub use state::{backoff_seconds, matches_filters, WatchStats, WatchTarget};

use crate::api::TimelineSource;
use crate::error::AppError;
use crate::output::{Notifier, Renderer};
use crate::types::Username;
use colored::Colorize;

/// Resolves `usernames`, seeds their cursors, and polls until the budget is
/// spent or `interrupt` is raised.
pub async fn run_watch(
    source: &dyn TimelineSource,
    renderer: &dyn Renderer,
    notifier: &dyn Notifier,
    clock: &dyn Clock,
    interrupt: InterruptSignal,
    usernames: &[Username],
    options: WatchOptions,
) -> Result<WatchOutcome, AppError> {
    eprintln!("{}", "Initializing watch...".dimmed());
    let mut targets = resolve_targets(source, usernames).await?;
    seed_cursors(source, &mut targets).await;

    let session = WatchSession::new(source, renderer, notifier, clock, interrupt, options);
    Ok(session.run(targets).await)
}
