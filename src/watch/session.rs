// src/watch/session.rs
//! The polling loop.
//!
//! A session visits every target in order, shows tweets newer than the
//! target's cursor oldest first, then sleeps for the interval. It ends when
//! the item budget is spent or the interrupt is raised.

use super::clock::{Clock, InterruptSignal};
use super::state::{backoff_seconds, matches_filters, WatchStats, WatchTarget};
use crate::api::parser::display_text;
use crate::api::{TimelinePage, TimelineSource};
use crate::constants::{WATCH_PAGE_SIZE, WATCH_SEED_PAGE_SIZE};
use crate::error::AppError;
use crate::output::{Notifier, Renderer};
use crate::types::{OutputMode, Username};
use colored::Colorize;
use serde_json::json;
use std::time::Duration;

/// How a session behaves.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    pub interval: Duration,
    pub filters: Vec<String>,
    pub notify: bool,
    /// Stop after this many shown tweets; `None` runs until interrupted.
    pub max_items: Option<u32>,
    pub mode: OutputMode,
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    BudgetReached,
    Interrupted,
}

/// What a finished session leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOutcome {
    pub stats: WatchStats,
    pub targets: Vec<WatchTarget>,
    pub reason: StopReason,
}

enum PassResult {
    Continue,
    BudgetReached,
}

/// Looks up every username. Any failure aborts before polling starts.
pub async fn resolve_targets(
    source: &dyn TimelineSource,
    usernames: &[Username],
) -> Result<Vec<WatchTarget>, AppError> {
    let mut targets = Vec::with_capacity(usernames.len());
    for username in usernames {
        let user_id = source.resolve_user(username).await.map_err(|e| {
            log::error!("Could not resolve {}: {}", username.handle(), e);
            e
        })?;
        log::debug!("Resolved {} to {}", username.handle(), user_id);
        targets.push(WatchTarget::new(username.clone(), user_id));
    }
    Ok(targets)
}

/// Points each cursor at the newest existing tweet so the backlog is
/// skipped. A target whose timeline cannot be read keeps no cursor.
pub async fn seed_cursors(source: &dyn TimelineSource, targets: &mut [WatchTarget]) {
    for target in targets.iter_mut() {
        match source
            .fetch_timeline(&target.user_id, WATCH_SEED_PAGE_SIZE, None)
            .await
        {
            Ok(page) => target.last_seen_id = page.newest_id(),
            Err(e) => log::warn!("Could not seed {}: {}", target.username.handle(), e),
        }
        eprintln!(
            "{}",
            format!("  Tracking {} (id={})", target.username.handle(), target.user_id).dimmed()
        );
    }
}

/// A watch session over already-resolved targets.
pub struct WatchSession<'a> {
    source: &'a dyn TimelineSource,
    renderer: &'a dyn Renderer,
    notifier: &'a dyn Notifier,
    clock: &'a dyn Clock,
    interrupt: InterruptSignal,
    options: WatchOptions,
}

impl<'a> WatchSession<'a> {
    pub fn new(
        source: &'a dyn TimelineSource,
        renderer: &'a dyn Renderer,
        notifier: &'a dyn Notifier,
        clock: &'a dyn Clock,
        interrupt: InterruptSignal,
        options: WatchOptions,
    ) -> Self {
        Self {
            source,
            renderer,
            notifier,
            clock,
            interrupt,
            options,
        }
    }

    /// Polls until the budget is spent or the interrupt is raised, then
    /// prints the summary.
    pub async fn run(&self, mut targets: Vec<WatchTarget>) -> WatchOutcome {
        let mut stats = WatchStats::default();
        self.announce(&targets);

        let reason = 'session: loop {
            if self.interrupt.is_raised() {
                break StopReason::Interrupted;
            }

            for target in targets.iter_mut() {
                if self.interrupt.is_raised() {
                    break 'session StopReason::Interrupted;
                }
                if let PassResult::BudgetReached = self.poll_target(target, &mut stats).await {
                    break 'session StopReason::BudgetReached;
                }
            }

            if self.interrupt.is_raised() {
                break StopReason::Interrupted;
            }
            stats.polls += 1;
            log::debug!("Pass {} complete", stats.polls);
            self.pause(self.options.interval).await;
        };

        if let (StopReason::BudgetReached, Some(max)) = (reason, self.options.max_items) {
            eprintln!("\n{}", format!("Reached --max {} tweets.", max).bold());
        }
        eprintln!("{}", stats.summary(&targets));
        log::info!(
            "Watch ended ({:?}) after {} polls, {} tweets",
            reason,
            stats.polls,
            stats.tweets_seen
        );

        WatchOutcome {
            stats,
            targets,
            reason,
        }
    }

    /// Fetches and shows one target's new tweets.
    async fn poll_target(&self, target: &mut WatchTarget, stats: &mut WatchStats) -> PassResult {
        let fetched = self
            .source
            .fetch_timeline(&target.user_id, WATCH_PAGE_SIZE, target.last_seen_id.as_ref())
            .await;

        let page = match fetched {
            Ok(page) => page,
            Err(AppError::RateLimited { reset_at }) => {
                let wait = backoff_seconds(&reset_at, self.clock.now_unix());
                log::warn!("Rate limited polling {}; reset at {}", target.username.handle(), reset_at);
                eprintln!("{}", format!("Rate limited. Waiting {}s...", wait).yellow());
                self.pause(Duration::from_secs(wait)).await;
                return PassResult::Continue;
            }
            Err(e) => {
                log::error!("Poll failed for {}: {}", target.username.handle(), e);
                eprintln!(
                    "{}",
                    format!("Error for {}: {}", target.username.handle(), e).red()
                );
                return PassResult::Continue;
            }
        };

        if page.is_empty() {
            return PassResult::Continue;
        }

        if let PassResult::BudgetReached = self.show_page(target, &page, stats).await {
            return PassResult::BudgetReached;
        }

        if let Some(newest) = page.newest_id() {
            target.last_seen_id = Some(newest);
        }
        PassResult::Continue
    }

    /// Shows matching tweets oldest first.
    async fn show_page(
        &self,
        target: &WatchTarget,
        page: &TimelinePage,
        stats: &mut WatchStats,
    ) -> PassResult {
        let title = target.username.handle();

        for tweet in page.tweets.iter().rev() {
            let text = display_text(tweet);
            if !matches_filters(text, &self.options.filters) {
                continue;
            }

            let payload = json!({ "data": tweet, "includes": page.includes });
            let rendered =
                self.renderer
                    .render(&payload, self.options.mode, &title, self.options.verbose);
            if let Err(e) = rendered {
                log::warn!("Could not render tweet from {}: {}", title, e);
            }

            if self.options.notify {
                self.notifier.notify(target.username.as_str(), text).await;
            }

            stats.record(&target.username);
            if stats.budget_reached(self.options.max_items) {
                return PassResult::BudgetReached;
            }
        }
        PassResult::Continue
    }

    /// Sleeps, waking early if interrupted.
    async fn pause(&self, duration: Duration) {
        tokio::select! {
            biased;
            _ = self.interrupt.raised() => {
                log::debug!("Sleep cut short by interrupt");
            }
            _ = self.clock.sleep(duration) => {}
        }
    }

    fn announce(&self, targets: &[WatchTarget]) {
        let handles: Vec<String> = targets.iter().map(|t| t.username.handle()).collect();
        eprintln!(
            "{} (every {}s, Ctrl+C to stop)",
            format!("Watching {}", handles.join(", ")).green().bold(),
            self.options.interval.as_secs()
        );
        if !self.options.filters.is_empty() {
            eprintln!(
                "{}",
                format!("Filters: {}", self.options.filters.join(", ")).dimmed()
            );
        }
        eprintln!();
    }
}
