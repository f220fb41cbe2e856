//! Event payloads for the action topic.

use game_core::{Action, ActionKind};
use serde::{Deserialize, Serialize};

/// Progress of one action through the simulation worker.
///
/// `seq` numbers every action the worker receives, starting at 1, so the
/// three variants of one action can be correlated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionEvent {
    /// `begin` succeeded: the log line is written and the plan is frozen.
    Begun { seq: u64, action: Action },

    /// The plan has been written to the ledger.
    Committed { seq: u64, kind: ActionKind },

    /// The action was refused or interrupted. The message is the rendered
    /// error so the event stays serializable.
    Failed {
        seq: u64,
        kind: ActionKind,
        error: String,
    },
}

impl ActionEvent {
    pub fn seq(&self) -> u64 {
        match self {
            ActionEvent::Begun { seq, .. }
            | ActionEvent::Committed { seq, .. }
            | ActionEvent::Failed { seq, .. } => *seq,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionEvent::Begun { action, .. } => action.kind(),
            ActionEvent::Committed { kind, .. } | ActionEvent::Failed { kind, .. } => *kind,
        }
    }
}
