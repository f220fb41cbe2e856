use async_trait::async_trait;
use game_core::{FireAction, FirePlan, GameConfig, GameStore};
use tracing::{debug, warn};

use super::{Animate, StagedExecutor};
use crate::api::Result;
use crate::scheduler::Scheduler;

pub type FireExecutor = StagedExecutor<FireAction>;

#[async_trait]
impl Animate for FireAction {
    /// Per shot: a point dissolves at the attacker and a trace flies to the
    /// victim.
    ///
    /// The victim's hearts are only written back as they are; the real
    /// damage lands at commit.
    async fn animate(
        &self,
        _plan: &FirePlan,
        store: &mut GameStore,
        scheduler: &dyn Scheduler,
        config: &GameConfig,
    ) -> Result<()> {
        for shot in 0..self.amount {
            let attacker = store.require_player(&self.attacker)?;
            let (at, points) = (attacker.position, attacker.points);

            store.add_dissolve_point(at, points);
            store.set_player_points(&self.attacker, points - 1)?;
            let trace = store.add_trace_path(&self.attacker, &self.victim, config.trace_power)?;
            debug!(target: "runtime::executor", shot, %trace, "fire");

            scheduler.pause(store, config.timing.fire()).await;

            let hearts = store.require_player(&self.victim)?.hearts;
            store.set_player_hearts(&self.victim, hearts)?;
        }
        Ok(())
    }

    fn committed(&self, plan: &FirePlan, _store: &GameStore) {
        if plan.health_after <= 0 {
            warn!(
                target: "runtime::executor",
                victim = %self.victim,
                hearts = plan.health_after,
                "player has no hearts left"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use game_core::{Coordinates, ResourcePolicy, StoreChange};

    use super::*;
    use crate::api::RuntimeError;
    use crate::executor::testing::store_with;
    use crate::executor::{Executor, drive};
    use crate::scheduler::ImmediateScheduler;

    #[tokio::test]
    async fn fire_law_and_effects() {
        let mut store = store_with(&[("a", 1, 1, 4), ("v", 5, 3, 0)]);
        let scheduler = ImmediateScheduler::new();
        let mut executor = FireExecutor::new(FireAction::new("a", "v", 2), GameConfig::default());

        drive(&mut executor, &mut store, &scheduler).await.unwrap();

        assert_eq!(store.player("a").unwrap().points, 2);
        assert_eq!(store.player("v").unwrap().hearts, 1);
        assert_eq!(store.dissolve_points().len(), 2);
        assert_eq!(store.tracings().len(), 2);
        assert!(store.dissolve_hearts().is_empty());
        assert_eq!(store.pending_effects(), 4);
        assert_eq!(
            scheduler.pauses(),
            vec![Duration::from_millis(300), Duration::from_millis(300)]
        );

        let trace = &store.tracings()[0];
        assert_eq!(trace.from, Coordinates::new(1, 1));
        assert_eq!(trace.to, Coordinates::new(5, 3));
        assert_eq!(trace.power, 2.5);
        assert_ne!(store.tracings()[0].id, store.tracings()[1].id);
    }

    #[tokio::test]
    async fn effects_are_emitted_in_animation_order() {
        let mut store = store_with(&[("a", 0, 0, 1), ("v", 1, 0, 3)]);
        let order = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&order);
        store.subscribe(move |change| {
            if let StoreChange::EffectAdded(effect) = change {
                sink.lock().unwrap().push(effect.queue_name());
            }
        });

        run_fire(&mut store, FireAction::new("a", "v", 1)).await;

        assert_eq!(
            *order.lock().unwrap(),
            ["dissolve_points", "tracings"]
        );
    }

    #[tokio::test]
    async fn strict_fire_checks_attacker_points() {
        let mut store = store_with(&[("a", 0, 0, 1), ("v", 1, 0, 0)]);
        let scheduler = ImmediateScheduler::new();
        let config = GameConfig::default().with_resource_policy(ResourcePolicy::Strict);
        let mut executor = FireExecutor::new(FireAction::new("a", "v", 2), config);

        let err = executor.begin(&mut store).unwrap_err();

        assert!(err.action_error().is_some());
        assert!(matches!(err, RuntimeError::Rejected { .. }));
        assert_eq!(scheduler.pause_count(), 0);
        assert_eq!(store.player("a").unwrap().points, 1);
    }

    #[tokio::test]
    async fn overkill_keeps_victim_in_ledger() {
        let mut store = store_with(&[("a", 0, 0, 5), ("v", 1, 0, 0)]);

        run_fire(&mut store, FireAction::new("a", "v", 5)).await;

        let victim = store.player("v").unwrap();
        assert_eq!(victim.hearts, -2);
        assert!(!victim.is_alive());
    }

    async fn run_fire(store: &mut GameStore, action: FireAction) {
        let scheduler = ImmediateScheduler::new();
        let mut executor = FireExecutor::new(action, GameConfig::default());
        executor.begin(store).unwrap();
        executor.execute(store, &scheduler).await.unwrap();
        executor.commit(store).unwrap();
    }
}
