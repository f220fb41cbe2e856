use super::{ActionError, ActionKind, ActionTransition};
use crate::config::GameConfig;
use crate::state::{Coordinates, GameStore, PlayerData, PlayerId};

/// Identity of the player being spawned.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnProfile {
    pub name: PlayerId,
    pub userpic: String,
}

/// Places a new player on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnAction {
    pub player: SpawnProfile,
    pub place: Coordinates,
}

impl SpawnAction {
    pub fn new(name: impl Into<PlayerId>, userpic: impl Into<String>, place: Coordinates) -> Self {
        Self {
            player: SpawnProfile {
                name: name.into(),
                userpic: userpic.into(),
            },
            place,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnPlan {
    pub player: PlayerData,
}

impl ActionTransition for SpawnAction {
    type Plan = SpawnPlan;

    fn kind(&self) -> ActionKind {
        ActionKind::Spawn
    }

    fn describe(&self) -> String {
        format!("Spawn {}", self.player.name)
    }

    fn pre_validate(&self, _store: &GameStore, config: &GameConfig) -> Result<(), ActionError> {
        if config.resource_policy.is_strict() && !config.board.contains(self.place) {
            return Err(ActionError::OutOfBounds {
                position: self.place,
            });
        }
        Ok(())
    }

    fn plan(&self, _store: &GameStore, config: &GameConfig) -> Result<SpawnPlan, ActionError> {
        Ok(SpawnPlan {
            player: PlayerData::spawned(
                self.player.name.clone(),
                self.player.userpic.clone(),
                self.place,
                config.spawn,
            ),
        })
    }

    fn commit(&self, plan: &SpawnPlan, store: &mut GameStore) -> Result<(), ActionError> {
        store.add_player(plan.player.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourcePolicy;

    #[test]
    fn spawn_inserts_player_with_starting_stats() {
        let mut store = GameStore::new();
        let config = GameConfig::default();
        let action = SpawnAction::new("alice", "pic.png", Coordinates::new(3, 5));

        action.pre_validate(&store, &config).unwrap();
        let plan = action.plan(&store, &config).unwrap();
        assert!(store.player("alice").is_none());
        action.commit(&plan, &mut store).unwrap();

        let alice = store.player("alice").unwrap();
        assert_eq!(alice.position, Coordinates::new(3, 5));
        assert_eq!((alice.range, alice.hearts, alice.points), (2, 3, 1));
        assert_eq!(alice.userpic, "pic.png");
        assert_eq!(action.describe(), "Spawn alice");
    }

    #[test]
    fn strict_policy_rejects_off_board_spawn() {
        let store = GameStore::new();
        let action = SpawnAction::new("bob", "", Coordinates::new(20, 0));

        let permissive = GameConfig::default();
        assert!(action.pre_validate(&store, &permissive).is_ok());

        let strict = GameConfig::default().with_resource_policy(ResourcePolicy::Strict);
        assert_eq!(
            action.pre_validate(&store, &strict),
            Err(ActionError::OutOfBounds {
                position: Coordinates::new(20, 0)
            })
        );
    }
}
