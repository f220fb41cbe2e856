use core::fmt;

use super::{ActionError, ActionKind};
use crate::config::GameConfig;
use crate::state::{GameStore, PlayerData, PlayerId};

/// Defines how a concrete action variant changes the store.
///
/// The rules are split the same way the executors stage their work:
/// validation and planning read the store before anything moves, and
/// `commit` writes the frozen plan no matter what the animation did to the
/// live values in between.
pub trait ActionTransition {
    /// Frozen "after" values computed once, before any animation.
    type Plan: Clone + fmt::Debug + Send + Sync;

    fn kind(&self) -> ActionKind;

    /// Log line appended to the store when the action begins.
    fn describe(&self) -> String;

    /// Validates pre-conditions using the store **before** mutation.
    fn pre_validate(&self, _store: &GameStore, _config: &GameConfig) -> Result<(), ActionError> {
        Ok(())
    }

    /// Computes the final values from the current store.
    fn plan(&self, store: &GameStore, config: &GameConfig) -> Result<Self::Plan, ActionError>;

    /// Writes the planned values, overriding any intermediate state.
    fn commit(&self, plan: &Self::Plan, store: &mut GameStore) -> Result<(), ActionError>;
}

pub(crate) fn require<'a>(
    store: &'a GameStore,
    id: &PlayerId,
) -> Result<&'a PlayerData, ActionError> {
    Ok(store.require_player(id)?)
}

/// Fails with `InsufficientResource` when strict and `points < required`.
pub(crate) fn require_points(
    config: &GameConfig,
    player: &PlayerData,
    required: i64,
) -> Result<(), ActionError> {
    if config.resource_policy.is_strict() && player.points < required {
        return Err(ActionError::InsufficientResource {
            who: player.name.clone(),
            resource: super::Resource::Points,
            required,
            available: player.points,
        });
    }
    Ok(())
}
