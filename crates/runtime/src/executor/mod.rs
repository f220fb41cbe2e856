//! Staged action executors.
//!
//! An executor applies one action in three steps:
//!
//! 1. `begin` validates against the current store, freezes the final values
//!    (the plan) and appends the log line
//! 2. `execute` plays the animation: it emits ephemeral effects and nudges
//!    live values toward the plan, pausing through a [`Scheduler`]
//! 3. `commit` writes the frozen plan, overriding whatever the animation
//!    left behind
//!
//! The rules live in `game-core` ([`ActionTransition`]); this module only
//! adds the animation ([`Animate`]) and the lifecycle guard around it.

mod dispatch;
mod fire;
mod invest;
mod lifecycle;
mod movement;
mod share;
mod spawn;

pub use dispatch::ActionExecutor;
pub use fire::FireExecutor;
pub use invest::InvestExecutor;
pub use lifecycle::{ExecutorState, Lifecycle, LifecycleError, Stage};
pub use movement::MoveExecutor;
pub use share::ShareExecutor;
pub use spawn::SpawnExecutor;

use async_trait::async_trait;
use game_core::engine::{begin_transition, commit_transition};
use game_core::{
    Action, ActionError, ActionKind, ActionTransition, GameConfig, GameStore, TransitionPhaseError,
};
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};
use crate::scheduler::Scheduler;

/// The begin/execute/commit contract shared by every executor.
#[async_trait]
pub trait Executor: Send + Sync {
    fn kind(&self) -> ActionKind;

    fn state(&self) -> ExecutorState;

    /// Validates, logs and freezes the plan. Leaves the store untouched on error.
    fn begin(&mut self, store: &mut GameStore) -> Result<()>;

    /// Plays the animation. Calls after the first one has started are no-ops.
    async fn execute(&self, store: &mut GameStore, scheduler: &dyn Scheduler) -> Result<()>;

    /// Writes the frozen plan. Execute may be skipped or interrupted.
    fn commit(&mut self, store: &mut GameStore) -> Result<()>;
}

/// Animation half of an action: what `execute` does between begin and commit.
#[async_trait]
pub trait Animate: ActionTransition + Send + Sync {
    async fn animate(
        &self,
        plan: &Self::Plan,
        store: &mut GameStore,
        scheduler: &dyn Scheduler,
        config: &GameConfig,
    ) -> Result<()>;

    /// Runs after the plan has been written.
    fn committed(&self, _plan: &Self::Plan, _store: &GameStore) {}
}

/// Generic executor that binds an action payload to its frozen plan.
#[derive(Debug)]
pub struct StagedExecutor<T: Animate> {
    action: T,
    config: GameConfig,
    plan: Option<T::Plan>,
    lifecycle: Lifecycle,
}

impl<T: Animate> StagedExecutor<T> {
    pub fn new(action: T, config: GameConfig) -> Self {
        Self {
            action,
            config,
            plan: None,
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn action(&self) -> &T {
        &self.action
    }

    /// The frozen plan, available once `begin` succeeded.
    pub fn plan(&self) -> Option<&T::Plan> {
        self.plan.as_ref()
    }

    fn rejected(&self, error: TransitionPhaseError<ActionError>) -> RuntimeError {
        RuntimeError::Rejected {
            kind: self.action.kind(),
            phase: error.phase,
            source: error.error,
        }
    }
}

#[async_trait]
impl<T: Animate> Executor for StagedExecutor<T> {
    fn kind(&self) -> ActionKind {
        self.action.kind()
    }

    fn state(&self) -> ExecutorState {
        self.lifecycle.state()
    }

    fn begin(&mut self, store: &mut GameStore) -> Result<()> {
        self.lifecycle.ensure_created()?;

        let plan = begin_transition(&self.action, store, &self.config)
            .map_err(|error| self.rejected(error))?;
        debug!(
            target: "runtime::executor",
            kind = %self.action.kind(),
            plan = ?plan,
            "begun"
        );

        self.plan = Some(plan);
        self.lifecycle.mark_begun();
        Ok(())
    }

    async fn execute(&self, store: &mut GameStore, scheduler: &dyn Scheduler) -> Result<()> {
        if !self.lifecycle.try_start_execute()? {
            debug!(
                target: "runtime::executor",
                kind = %self.action.kind(),
                state = %self.lifecycle.state(),
                "execute re-entered, ignoring"
            );
            return Ok(());
        }

        let plan = self.plan.as_ref().ok_or(LifecycleError::NotBegun {
            stage: Stage::Execute,
        })?;
        self.action
            .animate(plan, store, scheduler, &self.config)
            .await?;

        self.lifecycle.finish_execute();
        Ok(())
    }

    fn commit(&mut self, store: &mut GameStore) -> Result<()> {
        self.lifecycle.ensure_committable()?;

        let plan = self.plan.as_ref().ok_or(LifecycleError::NotBegun {
            stage: Stage::Commit,
        })?;
        commit_transition(&self.action, plan, store).map_err(|error| self.rejected(error))?;
        self.action.committed(plan, store);

        self.lifecycle.mark_committed();
        info!(
            target: "runtime::executor",
            kind = %self.action.kind(),
            "{}",
            self.action.describe()
        );
        Ok(())
    }
}

/// Runs `begin; execute; commit` on one executor.
pub async fn drive(
    executor: &mut dyn Executor,
    store: &mut GameStore,
    scheduler: &dyn Scheduler,
) -> Result<()> {
    executor.begin(store)?;
    executor.execute(store, scheduler).await?;
    executor.commit(store)
}

/// Builds the executor for `action` and drives it to completion.
pub async fn run(
    action: Action,
    store: &mut GameStore,
    scheduler: &dyn Scheduler,
    config: &GameConfig,
) -> Result<ActionKind> {
    let mut executor = ActionExecutor::new(action, config)?;
    drive(&mut executor, store, scheduler).await?;
    Ok(executor.kind())
}

#[cfg(test)]
pub(crate) mod testing {
    use game_core::{Coordinates, GameStore, PlayerData, PlayerId, SpawnStats};

    /// Builds a store with `(name, x, y, points)` players and default spawn stats.
    pub(crate) fn store_with(players: &[(&str, i32, i32, i64)]) -> GameStore {
        let mut store = GameStore::new();
        for &(name, x, y, points) in players {
            let mut data = PlayerData::spawned(
                PlayerId::from(name),
                "",
                Coordinates::new(x, y),
                SpawnStats::default(),
            );
            data.points = points;
            store.add_player(data);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::testing::store_with;
    use super::*;
    use crate::scheduler::ImmediateScheduler;
    use game_core::{Coordinates, GameEngine, ShareAction};

    #[tokio::test]
    async fn lifecycle_misuse_is_rejected() {
        let mut store = store_with(&[("a", 0, 0, 3), ("b", 1, 1, 0)]);
        let scheduler = ImmediateScheduler::new();
        let mut executor =
            ShareExecutor::new(ShareAction::new("a", "b", 1), GameConfig::default());

        assert!(matches!(
            executor.execute(&mut store, &scheduler).await,
            Err(RuntimeError::Lifecycle(LifecycleError::NotBegun { .. }))
        ));
        assert!(matches!(
            executor.commit(&mut store),
            Err(RuntimeError::Lifecycle(LifecycleError::NotBegun { .. }))
        ));

        executor.begin(&mut store).unwrap();
        assert!(matches!(
            executor.begin(&mut store),
            Err(RuntimeError::Lifecycle(LifecycleError::DoubleExecution {
                stage: Stage::Begin
            }))
        ));

        executor.commit(&mut store).unwrap();
        assert!(matches!(
            executor.commit(&mut store),
            Err(RuntimeError::Lifecycle(LifecycleError::DoubleExecution {
                stage: Stage::Commit
            }))
        ));
        assert_eq!(store.log().len(), 1);
    }

    #[tokio::test]
    async fn staged_and_instant_paths_agree() {
        let actions = [
            Action::spawn("a", "", Coordinates::new(3, 5)),
            Action::spawn("b", "", Coordinates::new(8, 1)),
            Action::share("a", "b", 1),
            Action::fire("b", "a", 2),
            Action::invest("a", 3),
            Action::move_to("b", Coordinates::new(0, 9)),
        ];
        let config = GameConfig::default();

        let mut staged = GameStore::new();
        let scheduler = ImmediateScheduler::new();
        for action in actions.iter().cloned() {
            run(action, &mut staged, &scheduler, &config).await.unwrap();
        }

        let mut instant = GameStore::new();
        GameEngine::new(&mut instant, &config)
            .execute_all(&actions)
            .unwrap();

        assert_eq!(staged.state(), instant.state());
        assert_eq!(staged.log(), instant.log());
    }

    #[tokio::test]
    async fn rejected_begin_leaves_store_untouched() {
        let mut store = store_with(&[("a", 0, 0, 3)]);
        let before = store.snapshot();
        let mut executor =
            ShareExecutor::new(ShareAction::new("a", "zed", 1), GameConfig::default());

        let err = executor.begin(&mut store).unwrap_err();

        assert!(matches!(
            err,
            RuntimeError::Rejected {
                kind: ActionKind::Share,
                ..
            }
        ));
        assert_eq!(executor.state(), ExecutorState::Created);
        assert_eq!(store.snapshot(), before);
    }
}
