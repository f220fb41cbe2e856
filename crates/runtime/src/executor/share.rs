use async_trait::async_trait;
use game_core::{GameConfig, GameStore, ShareAction, SharePlan, UnattachedPoint};
use tracing::debug;

use super::{Animate, StagedExecutor};
use crate::api::Result;
use crate::scheduler::Scheduler;

pub type ShareExecutor = StagedExecutor<ShareAction>;

#[async_trait]
impl Animate for ShareAction {
    /// One floating point per unit, each flying from the sender's live
    /// balance to one above the receiver's.
    async fn animate(
        &self,
        _plan: &SharePlan,
        store: &mut GameStore,
        scheduler: &dyn Scheduler,
        config: &GameConfig,
    ) -> Result<()> {
        for step in 0..self.amount {
            let sender = store.require_player(&self.from)?;
            let from = UnattachedPoint::new(sender.position, sender.points);
            let receiver = store.require_player(&self.to)?;
            let to = UnattachedPoint::new(receiver.position, receiver.points + 1);

            let effect = store.add_floating_point(from, to);
            store.set_player_points(&self.from, from.height - 1)?;
            debug!(target: "runtime::executor", step, %effect, "share point");

            scheduler.pause(store, config.timing.share()).await;
        }
        Ok(())
    }
}
