use async_trait::async_trait;
use game_core::{GameConfig, GameStore, InvestAction, InvestPlan};
use tracing::debug;

use super::{Animate, StagedExecutor};
use crate::api::Result;
use crate::scheduler::Scheduler;

pub type InvestExecutor = StagedExecutor<InvestAction>;

#[async_trait]
impl Animate for InvestAction {
    /// Counts down from the plan: each step burns one point into range,
    /// so live values walk toward the frozen ones one unit at a time.
    async fn animate(
        &self,
        plan: &InvestPlan,
        store: &mut GameStore,
        scheduler: &dyn Scheduler,
        config: &GameConfig,
    ) -> Result<()> {
        for left in (0..i64::from(self.amount)).rev() {
            let player = store.require_player(&self.who)?;
            store.add_dissolve_point(player.position, player.points);

            store.set_player_points(&self.who, plan.points_after + left)?;
            store.set_player_range(&self.who, plan.range_after - left)?;
            debug!(target: "runtime::executor", who = %self.who, left, "invest step");

            scheduler.pause(store, config.timing.invest()).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::executor::testing::store_with;
    use crate::executor::{Executor, drive};
    use crate::scheduler::ImmediateScheduler;

    #[tokio::test]
    async fn invest_law_holds() {
        let mut store = store_with(&[("a", 2, 2, 4)]);
        let scheduler = ImmediateScheduler::new();
        let mut executor = InvestExecutor::new(InvestAction::new("a", 3), GameConfig::default());

        drive(&mut executor, &mut store, &scheduler).await.unwrap();

        let a = store.player("a").unwrap();
        assert_eq!((a.range, a.points), (5, 1));
        assert_eq!(a.range + a.points, 2 + 4);
        assert_eq!(store.dissolve_points().len(), 3);
        assert_eq!(scheduler.pause_count(), 3);
        assert_eq!(store.log(), ["a increases range on 3"]);
    }

    #[tokio::test]
    async fn live_values_step_toward_plan() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let probe = Arc::clone(&seen);
        let scheduler = ImmediateScheduler::with_hook(move |store| {
            if let Some(a) = store.player("a") {
                probe.lock().unwrap().push((a.points, a.range));
            }
        });
        let mut store = store_with(&[("a", 0, 0, 2)]);
        let mut executor = InvestExecutor::new(InvestAction::new("a", 2), GameConfig::default());

        drive(&mut executor, &mut store, &scheduler).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![(1, 3), (0, 4)]);
        let heights: Vec<_> = store
            .dissolve_points()
            .iter()
            .map(|d| d.point.height)
            .collect();
        assert_eq!(heights, vec![2, 1]);
    }

    #[tokio::test]
    async fn zero_amount_logs_without_animating() {
        let mut store = store_with(&[("a", 0, 0, 1)]);
        let scheduler = ImmediateScheduler::new();
        let mut executor = InvestExecutor::new(InvestAction::new("a", 0), GameConfig::default());

        executor.begin(&mut store).unwrap();
        executor.execute(&mut store, &scheduler).await.unwrap();
        executor.commit(&mut store).unwrap();

        assert_eq!(scheduler.pause_count(), 0);
        assert_eq!(store.pending_effects(), 0);
        assert_eq!(store.log().len(), 1);
    }
}
