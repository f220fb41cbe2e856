use async_trait::async_trait;
use game_core::{GameConfig, GameStore, SpawnAction, SpawnPlan};
use tracing::debug;

use super::{Animate, StagedExecutor};
use crate::api::Result;
use crate::scheduler::Scheduler;

pub type SpawnExecutor = StagedExecutor<SpawnAction>;

#[async_trait]
impl Animate for SpawnAction {
    async fn animate(
        &self,
        _plan: &SpawnPlan,
        store: &mut GameStore,
        scheduler: &dyn Scheduler,
        config: &GameConfig,
    ) -> Result<()> {
        let effect = store.add_appear_point(self.place, 0);
        debug!(
            target: "runtime::executor",
            player = %self.player.name,
            at = %self.place,
            %effect,
            "appear"
        );
        scheduler.pause(store, config.timing.spawn()).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use game_core::{Coordinates, ResourcePolicy};

    use super::*;
    use crate::api::RuntimeError;
    use crate::executor::{Executor, drive};
    use crate::scheduler::ImmediateScheduler;

    #[tokio::test]
    async fn spawn_appears_then_joins_ledger() {
        let mut store = GameStore::new();
        let scheduler = ImmediateScheduler::new();
        let mut executor = SpawnExecutor::new(
            SpawnAction::new("alice", "pic.png", Coordinates::new(3, 5)),
            GameConfig::default(),
        );

        executor.begin(&mut store).unwrap();
        assert_eq!(store.log(), ["Spawn alice"]);
        executor.execute(&mut store, &scheduler).await.unwrap();

        // the player only exists after commit
        assert!(store.player("alice").is_none());
        assert_eq!(store.appear_points().len(), 1);
        assert_eq!(store.appear_points()[0].point.at, Coordinates::new(3, 5));
        assert_eq!(store.appear_points()[0].point.height, 0);

        executor.commit(&mut store).unwrap();
        let alice = store.player("alice").unwrap();
        assert_eq!(alice.position, Coordinates::new(3, 5));
        assert_eq!((alice.range, alice.hearts, alice.points), (2, 3, 1));
        assert_eq!(scheduler.pauses(), vec![Duration::from_millis(150)]);
    }

    #[tokio::test]
    async fn strict_spawn_off_board_is_rejected() {
        let mut store = GameStore::new();
        let scheduler = ImmediateScheduler::new();
        let config = GameConfig::default().with_resource_policy(ResourcePolicy::Strict);
        let mut executor =
            SpawnExecutor::new(SpawnAction::new("x", "", Coordinates::new(-1, 4)), config);

        let err = drive(&mut executor, &mut store, &scheduler)
            .await
            .unwrap_err();

        assert!(matches!(err, RuntimeError::Rejected { .. }));
        assert_eq!(store.pending_effects(), 0);
        assert!(store.log().is_empty());
    }
}
