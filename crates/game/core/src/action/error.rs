//! Errors raised while validating or applying an action.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Coordinates, PlayerId, StoreError};

/// The resource an action tried to spend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resource {
    Points,
    Hearts,
    Range,
}

/// Errors surfaced by [`ActionTransition`](super::ActionTransition) phases.
///
/// Every error is raised before the store is touched, so a rejected action
/// leaves the ledger exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("player {id} is not in the ledger")]
    UnknownPlayer { id: PlayerId },

    #[error("{who} needs {required} {resource} but has {available}")]
    InsufficientResource {
        who: PlayerId,
        resource: Resource,
        required: i64,
        available: i64,
    },

    #[error("position {position} is off the board")]
    OutOfBounds { position: Coordinates },

    #[error("{who} cannot target themselves")]
    SelfTarget { who: PlayerId },
}

impl From<StoreError> for ActionError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UnknownPlayer { id } => ActionError::UnknownPlayer { id },
        }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::UnknownPlayer { .. }
            | ActionError::OutOfBounds { .. }
            | ActionError::SelfTarget { .. } => ErrorSeverity::Validation,
            ActionError::InsufficientResource { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::UnknownPlayer { .. } => "ACTION_UNKNOWN_PLAYER",
            ActionError::InsufficientResource { .. } => "ACTION_INSUFFICIENT_RESOURCE",
            ActionError::OutOfBounds { .. } => "ACTION_OUT_OF_BOUNDS",
            ActionError::SelfTarget { .. } => "ACTION_SELF_TARGET",
        }
    }
}
