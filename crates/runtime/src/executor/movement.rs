use async_trait::async_trait;
use game_core::{GameConfig, GameStore, MoveAction, MovePlan};
use tracing::debug;

use super::{Animate, StagedExecutor};
use crate::api::Result;
use crate::scheduler::Scheduler;

pub type MoveExecutor = StagedExecutor<MoveAction>;

#[async_trait]
impl Animate for MoveAction {
    /// Walks `distance` king-move steps, dropping a point on each cell left
    /// behind.
    async fn animate(
        &self,
        plan: &MovePlan,
        store: &mut GameStore,
        scheduler: &dyn Scheduler,
        config: &GameConfig,
    ) -> Result<()> {
        for step in 0..plan.distance {
            let player = store.require_player(&self.who)?;
            let (at, points) = (player.position, player.points);

            store.add_dissolve_point(at, points);
            store.set_player_points(&self.who, points - 1)?;
            let next = at.step_toward(plan.target);
            store.set_player_position(&self.who, next)?;
            debug!(target: "runtime::executor", who = %self.who, step, %next, "move step");

            scheduler.pause(store, config.timing.movement()).await;
        }
        Ok(())
    }
}
