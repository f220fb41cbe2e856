//! Store errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::PlayerId;

/// Errors raised by [`GameStore`](crate::state::GameStore) mutators.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoreError {
    /// The referenced player is not in the ledger.
    #[error("player {id} is not in the ledger")]
    UnknownPlayer { id: PlayerId },
}

impl GameError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StoreError::UnknownPlayer { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StoreError::UnknownPlayer { .. } => "STORE_UNKNOWN_PLAYER",
        }
    }
}
