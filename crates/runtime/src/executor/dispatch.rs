use async_trait::async_trait;
use game_core::{Action, ActionKind, GameConfig, GameStore};

use super::{
    Executor, ExecutorState, FireExecutor, InvestExecutor, MoveExecutor, ShareExecutor,
    SpawnExecutor,
};
use crate::api::{Result, RuntimeError};
use crate::scheduler::Scheduler;

/// Executor for any executable [`Action`].
///
/// Kinds without an executor (`help`, `die`, `judge-pool`) are refused at
/// construction, before anything touches the store.
#[derive(Debug)]
pub enum ActionExecutor {
    Spawn(SpawnExecutor),
    Share(ShareExecutor),
    Fire(FireExecutor),
    Invest(InvestExecutor),
    Move(MoveExecutor),
}

impl ActionExecutor {
    pub fn new(action: Action, config: &GameConfig) -> Result<Self> {
        let config = config.clone();
        let executor = match action {
            Action::Spawn(a) => Self::Spawn(SpawnExecutor::new(a, config)),
            Action::Share(a) => Self::Share(ShareExecutor::new(a, config)),
            Action::Fire(a) => Self::Fire(FireExecutor::new(a, config)),
            Action::Invest(a) => Self::Invest(InvestExecutor::new(a, config)),
            Action::Move(a) => Self::Move(MoveExecutor::new(a, config)),
            other @ (Action::Help(_) | Action::Die(_) | Action::JudgePool(_)) => {
                return Err(RuntimeError::Unsupported { kind: other.kind() });
            }
        };
        Ok(executor)
    }
}

impl TryFrom<Action> for ActionExecutor {
    type Error = RuntimeError;

    fn try_from(action: Action) -> Result<Self> {
        Self::new(action, &GameConfig::default())
    }
}

macro_rules! delegate {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            ActionExecutor::Spawn($inner) => $body,
            ActionExecutor::Share($inner) => $body,
            ActionExecutor::Fire($inner) => $body,
            ActionExecutor::Invest($inner) => $body,
            ActionExecutor::Move($inner) => $body,
        }
    };
}

#[async_trait]
impl Executor for ActionExecutor {
    fn kind(&self) -> ActionKind {
        delegate!(self, e => e.kind())
    }

    fn state(&self) -> ExecutorState {
        delegate!(self, e => e.state())
    }

    fn begin(&mut self, store: &mut GameStore) -> Result<()> {
        delegate!(self, e => e.begin(store))
    }

    async fn execute(&self, store: &mut GameStore, scheduler: &dyn Scheduler) -> Result<()> {
        delegate!(self, e => e.execute(store, scheduler).await)
    }

    fn commit(&mut self, store: &mut GameStore) -> Result<()> {
        delegate!(self, e => e.commit(store))
    }
}

#[cfg(test)]
mod tests {
    use game_core::{Coordinates, DieAction, HelpAction, JudgePoolAction};

    use super::*;
    use crate::executor::drive;
    use crate::executor::testing::store_with;
    use crate::scheduler::ImmediateScheduler;

    #[test]
    fn deferred_kinds_have_no_executor() {
        let deferred = [
            Action::Help(HelpAction {
                judge_pool: 1,
                to: "a".into(),
            }),
            Action::Die(DieAction {
                who: "a".into(),
                murderer: "b".into(),
                points: 2,
            }),
            Action::JudgePool(JudgePoolAction {
                judges: vec!["a".into()],
                num: 0,
            }),
        ];

        for action in deferred {
            let kind = action.kind();
            let err = ActionExecutor::try_from(action).unwrap_err();
            assert!(matches!(err, RuntimeError::Unsupported { kind: k } if k == kind));
        }
    }

    #[test]
    fn dispatch_picks_matching_executor() {
        let executor = ActionExecutor::try_from(Action::invest("a", 1)).unwrap();
        assert!(matches!(executor, ActionExecutor::Invest(_)));
        assert_eq!(executor.kind(), ActionKind::Invest);
        assert_eq!(executor.state(), ExecutorState::Created);
    }

    #[tokio::test]
    async fn second_execute_is_a_noop() {
        let mut store = store_with(&[("a", 0, 0, 2)]);
        let scheduler = ImmediateScheduler::new();
        let mut executor =
            ActionExecutor::try_from(Action::move_to("a", Coordinates::new(2, 0))).unwrap();

        executor.begin(&mut store).unwrap();
        executor.execute(&mut store, &scheduler).await.unwrap();
        executor.execute(&mut store, &scheduler).await.unwrap();
        executor.commit(&mut store).unwrap();

        assert_eq!(scheduler.pause_count(), 2);
        assert_eq!(store.dissolve_points().len(), 2);
        assert_eq!(store.player("a").unwrap().points, 0);
    }

    #[tokio::test]
    async fn concurrent_execute_animates_once() {
        let mut first = store_with(&[("a", 0, 0, 3), ("b", 1, 0, 0)]);
        let mut second = store_with(&[("a", 0, 0, 3), ("b", 1, 0, 0)]);
        let scheduler = ImmediateScheduler::new();
        let mut executor = ActionExecutor::try_from(Action::share("a", "b", 3)).unwrap();
        executor.begin(&mut first).unwrap();

        let (left, right) = tokio::join!(
            executor.execute(&mut first, &scheduler),
            executor.execute(&mut second, &scheduler),
        );
        left.unwrap();
        right.unwrap();

        assert_eq!(scheduler.pause_count(), 3);
        assert_eq!(
            first.floating_points().len() + second.floating_points().len(),
            3
        );
        assert_eq!(executor.state(), ExecutorState::Executed);
    }

    #[tokio::test]
    async fn drive_runs_every_stage() {
        let mut store = GameStore::new();
        let scheduler = ImmediateScheduler::new();
        let mut executor =
            ActionExecutor::try_from(Action::spawn("z", "", Coordinates::new(1, 1))).unwrap();

        drive(&mut executor, &mut store, &scheduler).await.unwrap();

        assert_eq!(executor.state(), ExecutorState::Committed);
        assert!(store.player("z").is_some());
    }
}
