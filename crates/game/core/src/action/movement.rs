use super::transition::{require, require_points};
use super::{ActionError, ActionKind, ActionTransition};
use crate::config::GameConfig;
use crate::state::{Coordinates, GameStore, PlayerId};

/// Moves a player to a target cell, paying one point per king-move step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub who: PlayerId,
    pub to: Coordinates,
}

impl MoveAction {
    pub fn new(who: impl Into<PlayerId>, to: Coordinates) -> Self {
        Self {
            who: who.into(),
            to,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovePlan {
    /// Chebyshev distance from the starting cell; also the animation step count.
    pub distance: u32,
    pub points_before: i64,
    pub target: Coordinates,
}

impl MovePlan {
    pub fn points_after(&self) -> i64 {
        self.points_before - i64::from(self.distance)
    }
}

impl ActionTransition for MoveAction {
    type Plan = MovePlan;

    fn kind(&self) -> ActionKind {
        ActionKind::Move
    }

    fn describe(&self) -> String {
        format!("{} moves on {}", self.who, self.to)
    }

    fn pre_validate(&self, store: &GameStore, config: &GameConfig) -> Result<(), ActionError> {
        let player = require(store, &self.who)?;
        let distance = player.position.chebyshev_distance(self.to);
        require_points(config, player, i64::from(distance))
    }

    fn plan(&self, store: &GameStore, _config: &GameConfig) -> Result<MovePlan, ActionError> {
        let player = require(store, &self.who)?;
        Ok(MovePlan {
            distance: player.position.chebyshev_distance(self.to),
            points_before: player.points,
            target: self.to,
        })
    }

    fn commit(&self, plan: &MovePlan, store: &mut GameStore) -> Result<(), ActionError> {
        store.set_player_points(&self.who, plan.points_after())?;
        store.set_player_position(&self.who, plan.target)?;
        Ok(())
    }
}
