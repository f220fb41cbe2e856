//! Pacing between animation steps.
//!
//! Executors never sleep on their own. Every pause goes through a
//! [`Scheduler`], which keeps the state rules testable without wall-clock
//! delays and gives the runtime a single suspension point at which queued
//! consumer work may touch the store.
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use game_core::GameStore;

/// Suspends a running animation between two steps.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Waits for `duration`.
    ///
    /// The store is lent to the scheduler for the length of the pause; a
    /// pause is the only point where anything other than the running
    /// executor may mutate it.
    async fn pause(&self, store: &mut GameStore, duration: Duration);
}

/// Wall-clock pacing backed by `tokio::time::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn pause(&self, _store: &mut GameStore, duration: Duration) {
        if duration.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(duration).await;
        }
    }
}

type PauseHook = Box<dyn Fn(&mut GameStore) + Send + Sync>;

/// Resolves every pause at once and records what was requested.
///
/// An optional hook runs at each pause with the store, standing in for a
/// consumer that prunes effects while the animation is suspended.
#[derive(Default)]
pub struct ImmediateScheduler {
    pauses: Mutex<Vec<Duration>>,
    hook: Option<PauseHook>,
}

impl ImmediateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook<F>(hook: F) -> Self
    where
        F: Fn(&mut GameStore) + Send + Sync + 'static,
    {
        Self {
            pauses: Mutex::default(),
            hook: Some(Box::new(hook)),
        }
    }

    /// Every requested duration, in order.
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn pause_count(&self) -> usize {
        self.pauses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Wall-clock time the same run would have taken with real pacing.
    pub fn total(&self) -> Duration {
        self.pauses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .sum()
    }
}

impl fmt::Debug for ImmediateScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImmediateScheduler")
            .field("pauses", &self.pause_count())
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

#[async_trait]
impl Scheduler for ImmediateScheduler {
    async fn pause(&self, store: &mut GameStore, duration: Duration) {
        self.pauses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
        if let Some(hook) = &self.hook {
            hook(store);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn immediate_scheduler_records_pauses() {
        let scheduler = ImmediateScheduler::new();
        let mut store = GameStore::new();

        scheduler.pause(&mut store, Duration::from_millis(100)).await;
        scheduler.pause(&mut store, Duration::from_millis(50)).await;

        assert_eq!(
            scheduler.pauses(),
            vec![Duration::from_millis(100), Duration::from_millis(50)]
        );
        assert_eq!(scheduler.total(), Duration::from_millis(150));
    }

    #[tokio::test]
    async fn hook_sees_the_store() {
        let scheduler = ImmediateScheduler::with_hook(|store| store.add_log("paused"));
        let mut store = GameStore::new();

        scheduler.pause(&mut store, Duration::ZERO).await;

        assert_eq!(store.log(), ["paused"]);
    }

    #[tokio::test]
    async fn tokio_scheduler_sleeps() {
        let start = tokio::time::Instant::now();
        let mut store = GameStore::new();

        TokioScheduler
            .pause(&mut store, Duration::from_millis(20))
            .await;

        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
