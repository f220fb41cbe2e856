//! Instant action execution.
//!
//! The [`GameEngine`] is the reference reducer for the [`GameStore`]: it runs
//! each action through validation, planning and commit with no animation in
//! between. The runtime's staged executors reuse [`begin_transition`] and
//! [`commit_transition`] so both paths land on the same ledger.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use transition::{begin_transition, commit_transition};

use crate::action::{Action, ActionKind, ActionTransition};
use crate::config::GameConfig;
use crate::state::GameStore;

/// Applies actions to a store instantly.
///
/// Rejected actions leave the store exactly as it was: every check runs
/// before the log line or any field is written.
pub struct GameEngine<'a> {
    store: &'a mut GameStore,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(store: &'a mut GameStore, config: &'a GameConfig) -> Self {
        Self { store, config }
    }

    /// Executes an action and returns its kind on success.
    pub fn execute(&mut self, action: &Action) -> Result<ActionKind, ExecuteError> {
        match action {
            Action::Spawn(transition) => self.drive(transition),
            Action::Share(transition) => self.drive(transition),
            Action::Fire(transition) => self.drive(transition),
            Action::Invest(transition) => self.drive(transition),
            Action::Move(transition) => self.drive(transition),
            Action::Help(_) | Action::Die(_) | Action::JudgePool(_) => {
                Err(ExecuteError::Unsupported {
                    kind: action.kind(),
                })
            }
        }
    }

    /// Executes actions in order, stopping at the first failure.
    pub fn execute_all<'b>(
        &mut self,
        actions: impl IntoIterator<Item = &'b Action>,
    ) -> Result<usize, ExecuteError> {
        let mut applied = 0;
        for action in actions {
            self.execute(action)?;
            applied += 1;
        }
        Ok(applied)
    }

    fn drive<T: ActionTransition>(&mut self, action: &T) -> Result<ActionKind, ExecuteError> {
        transition::drive_transition(action, self.store, self.config)
            .map_err(|source| ExecuteError::transition(action.kind(), source))?;
        Ok(action.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionError, DieAction, JudgePoolAction};
    use crate::config::ResourcePolicy;
    use crate::state::{Coordinates, PlayerId};

    fn seeded(config: &GameConfig) -> GameStore {
        let mut store = GameStore::new();
        let mut engine = GameEngine::new(&mut store, config);
        engine
            .execute_all(&[
                Action::spawn("alice", "", Coordinates::new(3, 5)),
                Action::spawn("bob", "", Coordinates::new(7, 1)),
            ])
            .unwrap();
        store
    }

    #[test]
    fn spawn_then_move_goes_negative() {
        let config = GameConfig::default();
        let mut store = GameStore::new();
        let mut engine = GameEngine::new(&mut store, &config);

        engine
            .execute(&Action::spawn("alice", "", Coordinates::new(3, 5)))
            .unwrap();
        engine
            .execute(&Action::move_to("alice", Coordinates::new(5, 5)))
            .unwrap();

        let alice = store.player("alice").unwrap();
        assert_eq!(alice.points, -1);
        assert_eq!(alice.position, Coordinates::new(5, 5));
        assert_eq!((alice.range, alice.hearts), (2, 3));
        assert_eq!(store.log(), ["Spawn alice", "alice moves on [5,5]"]);
    }

    #[test]
    fn algebraic_laws_hold() {
        let config = GameConfig::default();
        let mut store = seeded(&config);
        let before = store.state();
        let mut engine = GameEngine::new(&mut store, &config);

        engine.execute(&Action::share("alice", "bob", 3)).unwrap();
        engine.execute(&Action::fire("bob", "alice", 2)).unwrap();
        engine.execute(&Action::invest("alice", 4)).unwrap();

        let a0 = before.player("alice").unwrap();
        let b0 = before.player("bob").unwrap();
        let a1 = store.player("alice").unwrap();
        let b1 = store.player("bob").unwrap();

        // share 3, then invest 4
        assert_eq!(a1.points, a0.points - 3 - 4);
        assert_eq!(a1.range, a0.range + 4);
        // received 3, fired 2
        assert_eq!(b1.points, b0.points + 3 - 2);
        assert_eq!(a1.hearts, a0.hearts - 2);
        assert_eq!(b1.hearts, b0.hearts);
    }

    #[test]
    fn engine_never_emits_effects() {
        let config = GameConfig::default();
        let mut store = seeded(&config);
        let mut engine = GameEngine::new(&mut store, &config);

        engine.execute(&Action::fire("alice", "bob", 1)).unwrap();
        engine
            .execute(&Action::move_to("bob", Coordinates::new(0, 0)))
            .unwrap();

        assert_eq!(store.pending_effects(), 0);
    }

    #[test]
    fn unknown_player_rejected_without_mutation() {
        let config = GameConfig::default();
        let mut store = seeded(&config);
        let before = store.snapshot();
        let mut engine = GameEngine::new(&mut store, &config);

        let err = engine
            .execute(&Action::share("alice", "carol", 1))
            .unwrap_err();

        assert_eq!(
            err,
            ExecuteError::Transition {
                kind: ActionKind::Share,
                source: TransitionPhaseError::new(
                    TransitionPhase::PreValidate,
                    ActionError::UnknownPlayer {
                        id: PlayerId::from("carol")
                    }
                ),
            }
        );
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn strict_policy_rejects_overdraft_without_mutation() {
        let config = GameConfig::default().with_resource_policy(ResourcePolicy::Strict);
        let mut store = seeded(&config);
        let before = store.snapshot();
        let mut engine = GameEngine::new(&mut store, &config);

        let err = engine.execute(&Action::invest("alice", 2)).unwrap_err();

        assert!(matches!(
            err.action_error(),
            Some(ActionError::InsufficientResource { .. })
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn deferred_kinds_are_unsupported() {
        let config = GameConfig::default();
        let mut store = seeded(&config);
        let mut engine = GameEngine::new(&mut store, &config);

        let die = Action::from(DieAction {
            who: "alice".into(),
            murderer: "bob".into(),
            points: 0,
        });
        let pool = Action::from(JudgePoolAction {
            judges: vec!["alice".into()],
            num: 1,
        });

        assert_eq!(
            engine.execute(&die),
            Err(ExecuteError::Unsupported {
                kind: ActionKind::Die
            })
        );
        assert_eq!(
            engine.execute(&pool),
            Err(ExecuteError::Unsupported {
                kind: ActionKind::JudgePool
            })
        );
    }

    #[test]
    fn execute_all_stops_at_first_failure() {
        let config = GameConfig::default();
        let mut store = GameStore::new();
        let mut engine = GameEngine::new(&mut store, &config);

        let result = engine.execute_all(&[
            Action::spawn("alice", "", Coordinates::new(0, 0)),
            Action::invest("ghost", 1),
            Action::invest("alice", 1),
        ]);

        assert!(result.is_err());
        assert_eq!(store.player("alice").unwrap().range, 2);
        assert_eq!(store.log(), ["Spawn alice"]);
    }
}
