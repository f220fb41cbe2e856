//! Stand-in renderer that removes effects once they have been "shown".
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use game_core::{EffectRef, StoreChange};
use runtime::{Event, RuntimeHandle, Topic};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Subscribes to store changes and prunes each new effect after `lifetime`.
///
/// When the store topic lags, the missed effects are recovered from a
/// snapshot. Every effect is scheduled at most once.
pub struct EffectConsumer {
    handle: RuntimeHandle,
    lifetime: Duration,
    pruned: Arc<AtomicUsize>,
    scheduled: Arc<Mutex<HashSet<EffectRef>>>,
    task: Option<JoinHandle<()>>,
}

impl EffectConsumer {
    pub fn new(handle: RuntimeHandle, lifetime: Duration) -> Self {
        Self {
            handle,
            lifetime,
            pruned: Arc::new(AtomicUsize::new(0)),
            scheduled: Arc::new(Mutex::new(HashSet::new())),
            task: None,
        }
    }

    /// Starts listening. Effects added before this call are not seen.
    pub fn start(&mut self) {
        let mut store_rx = self.handle.subscribe(Topic::Store);
        let handle = self.handle.clone();
        let pruner = Pruner {
            lifetime: self.lifetime,
            pruned: Arc::clone(&self.pruned),
            scheduled: Arc::clone(&self.scheduled),
        };

        self.task = Some(tokio::spawn(async move {
            loop {
                match store_rx.recv().await {
                    Ok(Event::Store(StoreChange::EffectAdded(effect))) => {
                        pruner.schedule(&handle, effect);
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(target: "client::consumer", skipped, "store events dropped, resyncing");
                        match handle.query_snapshot().await {
                            Ok(snapshot) => {
                                for effect in snapshot.effect_refs() {
                                    pruner.schedule(&handle, effect);
                                }
                            }
                            Err(error) => {
                                warn!(target: "client::consumer", %error, "resync failed");
                            }
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }));
    }

    /// Number of prune requests sent so far.
    pub fn pruned(&self) -> usize {
        self.pruned.load(Ordering::Relaxed)
    }

    /// Polls the store until no effect is pending or `timeout` elapses.
    ///
    /// Returns the number of effects still pending.
    pub async fn wait_drained(&self, timeout: Duration) -> runtime::Result<usize> {
        let step = Duration::from_millis(20);
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let pending = self.handle.query_snapshot().await?.pending_effects();
            if pending == 0 || tokio::time::Instant::now() >= deadline {
                return Ok(pending);
            }
            tokio::time::sleep(step).await;
        }
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for EffectConsumer {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Pruner {
    lifetime: Duration,
    pruned: Arc<AtomicUsize>,
    scheduled: Arc<Mutex<HashSet<EffectRef>>>,
}

impl Pruner {
    /// Spawns a delayed prune unless `effect` was already scheduled.
    fn schedule(&self, handle: &RuntimeHandle, effect: EffectRef) {
        let fresh = match self.scheduled.lock() {
            Ok(mut scheduled) => scheduled.insert(effect),
            Err(poisoned) => poisoned.into_inner().insert(effect),
        };
        if !fresh {
            return;
        }

        let handle = handle.clone();
        let lifetime = self.lifetime;
        let pruned = Arc::clone(&self.pruned);
        tokio::spawn(async move {
            if !lifetime.is_zero() {
                tokio::time::sleep(lifetime).await;
            }
            pruned.fetch_add(1, Ordering::Relaxed);
            if let Err(error) = handle.prune(effect) {
                pruned.fetch_sub(1, Ordering::Relaxed);
                debug!(target: "client::consumer", %effect, %error, "prune dropped");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use game_core::{Action, AnimationTiming, Coordinates, GameConfig};
    use runtime::{Runtime, RuntimeConfig};

    use super::*;

    #[tokio::test]
    async fn every_effect_is_pruned() {
        let runtime = Runtime::builder()
            .config(RuntimeConfig {
                game_config: GameConfig::default().with_timing(AnimationTiming::instant()),
                ..RuntimeConfig::default()
            })
            .build()
            .await
            .unwrap();
        let handle = runtime.handle();
        let mut consumer = EffectConsumer::new(handle.clone(), Duration::from_millis(5));
        consumer.start();

        handle
            .execute_action(Action::spawn("a", "", Coordinates::new(0, 0)))
            .await
            .unwrap();
        handle
            .execute_action(Action::spawn("b", "", Coordinates::new(3, 0)))
            .await
            .unwrap();
        handle.execute_action(Action::fire("a", "b", 2)).await.unwrap();

        let leaked = consumer.wait_drained(Duration::from_secs(2)).await.unwrap();
        assert_eq!(leaked, 0);
        // 2 appear points, then 2 x (dissolve point, trace)
        assert_eq!(consumer.pruned(), 6);
    }

    #[tokio::test]
    async fn lagging_consumer_resyncs_from_snapshot() {
        let runtime = Runtime::builder()
            .config(RuntimeConfig {
                game_config: GameConfig::default().with_timing(AnimationTiming::instant()),
                event_buffer_size: 4,
                ..RuntimeConfig::default()
            })
            .build()
            .await
            .unwrap();
        let handle = runtime.handle();
        let mut consumer = EffectConsumer::new(handle.clone(), Duration::from_millis(5));
        consumer.start();

        handle
            .execute_action(Action::spawn("a", "", Coordinates::new(0, 0)))
            .await
            .unwrap();
        handle
            .execute_action(Action::spawn("b", "", Coordinates::new(3, 0)))
            .await
            .unwrap();
        handle.execute_action(Action::fire("a", "b", 20)).await.unwrap();

        let leaked = consumer.wait_drained(Duration::from_secs(2)).await.unwrap();
        assert_eq!(leaked, 0);
        // 2 appear points, then 20 x (dissolve point, trace)
        assert_eq!(consumer.pruned(), 42);
    }
}
