use super::transition::{require, require_points};
use super::{ActionError, ActionKind, ActionTransition};
use crate::config::GameConfig;
use crate::state::{GameStore, PlayerId};

/// Converts action points into range, one for one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvestAction {
    pub who: PlayerId,
    pub amount: u32,
}

impl InvestAction {
    pub fn new(who: impl Into<PlayerId>, amount: u32) -> Self {
        Self {
            who: who.into(),
            amount,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvestPlan {
    pub range_after: i64,
    pub points_after: i64,
}

impl ActionTransition for InvestAction {
    type Plan = InvestPlan;

    fn kind(&self) -> ActionKind {
        ActionKind::Invest
    }

    fn describe(&self) -> String {
        format!("{} increases range on {}", self.who, self.amount)
    }

    fn pre_validate(&self, store: &GameStore, config: &GameConfig) -> Result<(), ActionError> {
        let player = require(store, &self.who)?;
        require_points(config, player, i64::from(self.amount))
    }

    fn plan(&self, store: &GameStore, _config: &GameConfig) -> Result<InvestPlan, ActionError> {
        let player = require(store, &self.who)?;
        let amount = i64::from(self.amount);
        Ok(InvestPlan {
            range_after: player.range + amount,
            points_after: player.points - amount,
        })
    }

    fn commit(&self, plan: &InvestPlan, store: &mut GameStore) -> Result<(), ActionError> {
        store.set_player_range(&self.who, plan.range_after)?;
        store.set_player_points(&self.who, plan.points_after)?;
        Ok(())
    }
}
