use std::borrow::Borrow;
use std::fmt;

use super::Coordinates;
use crate::config::SpawnStats;

/// Opaque, stable identifier of a player (wallet address, username, ...).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Ledger entry for one player.
///
/// Balances are signed: under the permissive resource policy an action may
/// spend more than the player owns and leave a negative value behind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerData {
    pub position: Coordinates,
    /// Attack reach, raised by investing points.
    pub range: i64,
    pub hearts: i64,
    /// Spendable action points.
    pub points: i64,
    /// Ledger key; always equal to the key this entry is stored under.
    pub name: PlayerId,
    pub userpic: String,
}

impl PlayerData {
    /// Creates a freshly spawned player with the configured starting stats.
    pub fn spawned(
        name: PlayerId,
        userpic: impl Into<String>,
        position: Coordinates,
        stats: SpawnStats,
    ) -> Self {
        Self {
            position,
            range: stats.range,
            hearts: stats.hearts,
            points: stats.points,
            name,
            userpic: userpic.into(),
        }
    }

    /// A player with no hearts left is dead. Nothing removes it from the ledger.
    pub fn is_alive(&self) -> bool {
        self.hearts > 0
    }
}
