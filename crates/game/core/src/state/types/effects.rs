//! Ephemeral visual effects.
//!
//! Effects carry no authoritative state. Executors append them to the store
//! and the renderer removes each one, by identity, once its animation ends.
use std::fmt;

use uuid::Uuid;

use super::{Coordinates, PlayerId};

/// Store-assigned identity of a point or heart effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u64);

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fx#{}", self.0)
    }
}

/// A point token that is not attached to any player.
///
/// `height` is the token's index within the owner's point stack at the time
/// it was detached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnattachedPoint {
    pub at: Coordinates,
    pub height: i64,
}

impl UnattachedPoint {
    pub const fn new(at: Coordinates, height: i64) -> Self {
        Self { at, height }
    }
}

/// A point travelling from one owner to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatingPoint {
    pub id: EffectId,
    pub from: UnattachedPoint,
    pub to: UnattachedPoint,
}

/// A point being spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DissolvePoint {
    pub id: EffectId,
    pub point: UnattachedPoint,
}

/// A point materializing on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppearPoint {
    pub id: EffectId,
    pub point: UnattachedPoint,
}

/// A heart being lost by its owner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DissolveHeart {
    pub id: EffectId,
    pub owner: PlayerId,
}

/// A directed attack beam between two cells.
///
/// Endpoints are copies of the players' positions when the trace was added,
/// not live references.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TracePath {
    pub id: Uuid,
    pub from: Coordinates,
    pub to: Coordinates,
    pub power: f32,
}

/// Identity of any effect in the store, used for removal and notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectRef {
    Floating(EffectId),
    Dissolve(EffectId),
    Appear(EffectId),
    Heart(EffectId),
    Trace(Uuid),
}

impl EffectRef {
    /// Returns the snake_case name of the effect queue this reference points into.
    pub const fn queue_name(&self) -> &'static str {
        match self {
            Self::Floating(_) => "floating_points",
            Self::Dissolve(_) => "dissolve_points",
            Self::Appear(_) => "appear_points",
            Self::Heart(_) => "dissolve_hearts",
            Self::Trace(_) => "tracings",
        }
    }
}

impl fmt::Display for EffectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Floating(id) | Self::Dissolve(id) | Self::Appear(id) | Self::Heart(id) => {
                write!(f, "{}/{}", self.queue_name(), id)
            }
            Self::Trace(id) => write!(f, "{}/{}", self.queue_name(), id),
        }
    }
}
