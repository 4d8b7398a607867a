// src/watch/clock.rs
//! Time and interruption, the two things the watch loop waits on.

use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// The ability to read the wall clock and to wait.
///
/// # Laws
///
/// - `now_unix` is seconds since the Unix epoch.
/// - `sleep(d)` returns after roughly `d`; callers may cut it short.
#[async_trait::async_trait]
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait::async_trait]
impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A flag raised once, typically by Ctrl+C, that wakes any pending wait.
#[derive(Debug, Clone, Default)]
pub struct InterruptSignal {
    raised: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl InterruptSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Resolves once the flag is raised.
    pub async fn raised(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_raised() {
                return;
            }
            notified.await;
        }
    }

    /// Raises the flag on the first Ctrl+C and exits the process on the
    /// second, so a stuck request can still be abandoned.
    pub fn install_ctrl_c(&self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(handle_interrupts(self.clone(), tokio::signal::ctrl_c, || {
            std::process::exit(FORCE_QUIT_EXIT_CODE);
        }))
    }
}

/// 128 + SIGINT
const FORCE_QUIT_EXIT_CODE: i32 = 130;

/// Waits for interrupts from `next`: the first raises `signal`, the second
/// calls `force_quit`.
async fn handle_interrupts<F, Fut>(signal: InterruptSignal, mut next: F, force_quit: impl FnOnce())
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    if let Err(e) = next().await {
        log::warn!("Could not listen for Ctrl+C: {}", e);
        return;
    }
    log::info!("Interrupt received");
    signal.raise();

    match next().await {
        Ok(()) => {
            log::warn!("Second interrupt received, quitting");
            force_quit();
        }
        Err(e) => log::warn!("Could not listen for a second Ctrl+C: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_raise_wakes_waiter() {
        let signal = InterruptSignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.raised().await })
        };
        tokio::task::yield_now().await;
        assert!(!signal.is_raised());

        signal.raise();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
        assert!(signal.is_raised());
    }

    #[tokio::test]
    async fn test_already_raised_returns_immediately() {
        let signal = InterruptSignal::new();
        signal.raise();
        tokio::time::timeout(Duration::from_millis(100), signal.raised())
            .await
            .expect("should not block");
    }

    fn scripted(results: Vec<io::Result<()>>) -> impl FnMut() -> std::future::Ready<io::Result<()>> {
        let mut results = results.into_iter();
        move || std::future::ready(results.next().unwrap_or_else(|| Err(io::Error::other("done"))))
    }

    #[tokio::test]
    async fn test_second_interrupt_forces_quit() {
        let signal = InterruptSignal::new();
        let mut forced = false;
        handle_interrupts(signal.clone(), scripted(vec![Ok(()), Ok(())]), || forced = true).await;
        assert!(signal.is_raised());
        assert!(forced);
    }

    #[tokio::test]
    async fn test_single_interrupt_only_raises() {
        let signal = InterruptSignal::new();
        let mut forced = false;
        handle_interrupts(signal.clone(), scripted(vec![Ok(())]), || forced = true).await;
        assert!(signal.is_raised());
        assert!(!forced);
    }

    #[tokio::test]
    async fn test_listener_failure_raises_nothing() {
        let signal = InterruptSignal::new();
        let mut forced = false;
        handle_interrupts(
            signal.clone(),
            scripted(vec![Err(io::Error::other("no signals"))]),
            || forced = true,
        )
        .await;
        assert!(!signal.is_raised());
        assert!(!forced);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now_unix() > 1_577_836_800);
    }
}
