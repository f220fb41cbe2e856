use super::transition::{require, require_points};
use super::{ActionError, ActionKind, ActionTransition};
use crate::config::GameConfig;
use crate::state::{GameStore, PlayerId};

/// Transfers action points from one player to another.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShareAction {
    pub from: PlayerId,
    pub to: PlayerId,
    pub amount: u32,
}

impl ShareAction {
    pub fn new(from: impl Into<PlayerId>, to: impl Into<PlayerId>, amount: u32) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SharePlan {
    pub sender_after: i64,
    pub receiver_after: i64,
}

impl ActionTransition for ShareAction {
    type Plan = SharePlan;

    fn kind(&self) -> ActionKind {
        ActionKind::Share
    }

    fn describe(&self) -> String {
        format!("{} shares {} to {}", self.from, self.amount, self.to)
    }

    fn pre_validate(&self, store: &GameStore, config: &GameConfig) -> Result<(), ActionError> {
        let sender = require(store, &self.from)?;
        require(store, &self.to)?;
        if self.from == self.to {
            return Err(ActionError::SelfTarget {
                who: self.from.clone(),
            });
        }
        require_points(config, sender, i64::from(self.amount))
    }

    fn plan(&self, store: &GameStore, _config: &GameConfig) -> Result<SharePlan, ActionError> {
        let amount = i64::from(self.amount);
        Ok(SharePlan {
            sender_after: require(store, &self.from)?.points - amount,
            receiver_after: require(store, &self.to)?.points + amount,
        })
    }

    fn commit(&self, plan: &SharePlan, store: &mut GameStore) -> Result<(), ActionError> {
        store.set_player_points(&self.from, plan.sender_after)?;
        store.set_player_points(&self.to, plan.receiver_after)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::store_with;
    use crate::config::ResourcePolicy;

    #[test]
    fn share_conserves_points() {
        let mut store = store_with(&[("a", 0, 0, 5), ("b", 3, 3, 2)]);
        let config = GameConfig::default();
        let action = ShareAction::new("a", "b", 3);

        let plan = action.plan(&store, &config).unwrap();
        action.commit(&plan, &mut store).unwrap();

        let a = store.player("a").unwrap().points;
        let b = store.player("b").unwrap().points;
        assert_eq!((a, b), (2, 5));
        assert_eq!(a + b, 7);
    }

    #[test]
    fn permissive_policy_allows_negative_sender() {
        let mut store = store_with(&[("a", 0, 0, 1), ("b", 1, 0, 0)]);
        let config = GameConfig::default();
        let action = ShareAction::new("a", "b", 3);

        action.pre_validate(&store, &config).unwrap();
        let plan = action.plan(&store, &config).unwrap();
        action.commit(&plan, &mut store).unwrap();

        assert_eq!(store.player("a").unwrap().points, -2);
        assert_eq!(store.player("b").unwrap().points, 3);
    }

    #[test]
    fn strict_policy_rejects_overdraft() {
        let store = store_with(&[("a", 0, 0, 1), ("b", 1, 0, 0)]);
        let config = GameConfig::default().with_resource_policy(ResourcePolicy::Strict);

        let err = ShareAction::new("a", "b", 2)
            .pre_validate(&store, &config)
            .unwrap_err();
        assert!(matches!(
            err,
            ActionError::InsufficientResource {
                required: 2,
                available: 1,
                ..
            }
        ));
    }

    #[test]
    fn self_share_is_rejected_under_any_policy() {
        let store = store_with(&[("a", 0, 0, 1)]);
        let action = ShareAction::new("a", "a", 1);

        for policy in [ResourcePolicy::Permissive, ResourcePolicy::Strict] {
            let config = GameConfig::default().with_resource_policy(policy);
            assert_eq!(
                action.pre_validate(&store, &config),
                Err(ActionError::SelfTarget {
                    who: PlayerId::from("a")
                })
            );
        }
        assert_eq!(store.player("a").unwrap().points, 1);
    }

    #[test]
    fn unknown_receiver_is_rejected() {
        let store = store_with(&[("a", 0, 0, 1)]);
        let err = ShareAction::new("a", "nobody", 1)
            .pre_validate(&store, &GameConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::UnknownPlayer {
                id: PlayerId::from("nobody")
            }
        );
    }
}
