//! Phase drivers shared by the instant engine and the staged executors.

use crate::action::{ActionError, ActionTransition};
use crate::config::GameConfig;
use crate::state::GameStore;

use super::errors::{TransitionPhase, TransitionPhaseError};

/// Runs the read-only phases, then appends the action's log line.
///
/// Phases:
/// 1. `pre_validate` - check preconditions before mutation
/// 2. `plan` - freeze the final values from the current store
///
/// The log line is only written once both succeed, so a rejected action
/// leaves the store untouched.
pub fn begin_transition<T>(
    transition: &T,
    store: &mut GameStore,
    config: &GameConfig,
) -> Result<T::Plan, TransitionPhaseError<ActionError>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(store, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let plan = transition
        .plan(store, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Plan, error))?;

    store.add_log(transition.describe());
    Ok(plan)
}

/// Writes a frozen plan into the store.
#[inline]
pub fn commit_transition<T>(
    transition: &T,
    plan: &T::Plan,
    store: &mut GameStore,
) -> Result<(), TransitionPhaseError<ActionError>>
where
    T: ActionTransition,
{
    transition
        .commit(plan, store)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Commit, error))
}

/// Begins and commits in one step, with nothing in between.
#[inline]
pub(super) fn drive_transition<T>(
    transition: &T,
    store: &mut GameStore,
    config: &GameConfig,
) -> Result<(), TransitionPhaseError<ActionError>>
where
    T: ActionTransition,
{
    let plan = begin_transition(transition, store, config)?;
    commit_transition(transition, &plan, store)
}
