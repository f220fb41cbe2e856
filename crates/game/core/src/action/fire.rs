use super::transition::{require, require_points};
use super::{ActionError, ActionKind, ActionTransition};
use crate::config::GameConfig;
use crate::state::{GameStore, PlayerId};

/// Spends the attacker's points to take the same number of hearts from the victim.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FireAction {
    pub attacker: PlayerId,
    pub victim: PlayerId,
    pub amount: u32,
}

impl FireAction {
    pub fn new(attacker: impl Into<PlayerId>, victim: impl Into<PlayerId>, amount: u32) -> Self {
        Self {
            attacker: attacker.into(),
            victim: victim.into(),
            amount,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FirePlan {
    pub points_after: i64,
    pub health_after: i64,
}

impl ActionTransition for FireAction {
    type Plan = FirePlan;

    fn kind(&self) -> ActionKind {
        ActionKind::Fire
    }

    fn describe(&self) -> String {
        format!("{} attacks {} on {}", self.attacker, self.victim, self.amount)
    }

    fn pre_validate(&self, store: &GameStore, config: &GameConfig) -> Result<(), ActionError> {
        let attacker = require(store, &self.attacker)?;
        require(store, &self.victim)?;
        require_points(config, attacker, i64::from(self.amount))
    }

    fn plan(&self, store: &GameStore, _config: &GameConfig) -> Result<FirePlan, ActionError> {
        let amount = i64::from(self.amount);
        Ok(FirePlan {
            points_after: require(store, &self.attacker)?.points - amount,
            health_after: require(store, &self.victim)?.hearts - amount,
        })
    }

    fn commit(&self, plan: &FirePlan, store: &mut GameStore) -> Result<(), ActionError> {
        store.set_player_hearts(&self.victim, plan.health_after)?;
        store.set_player_points(&self.attacker, plan.points_after)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::store_with;

    #[test]
    fn fire_spends_points_and_removes_hearts() {
        let mut store = store_with(&[("a", 0, 0, 4), ("v", 2, 2, 1)]);
        let action = FireAction::new("a", "v", 2);

        let plan = action.plan(&store, &GameConfig::default()).unwrap();
        action.commit(&plan, &mut store).unwrap();

        assert_eq!(store.player("a").unwrap().points, 2);
        assert_eq!(store.player("v").unwrap().hearts, 1);
        assert_eq!(store.player("v").unwrap().points, 1);
        assert_eq!(action.describe(), "a attacks v on 2");
    }

    #[test]
    fn overkill_leaves_victim_dead_but_in_ledger() {
        let mut store = store_with(&[("a", 0, 0, 5), ("v", 2, 2, 1)]);
        let action = FireAction::new("a", "v", 4);

        let plan = action.plan(&store, &GameConfig::default()).unwrap();
        action.commit(&plan, &mut store).unwrap();

        let victim = store.player("v").unwrap();
        assert_eq!(victim.hearts, -1);
        assert!(!victim.is_alive());
    }
}
