//! Error types for the action transition pipeline.

use crate::action::{ActionError, ActionKind};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Plan,
    Commit,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Plan => "plan",
            TransitionPhase::Commit => "commit",
        }
    }
}

impl std::fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("{kind} action failed: {source}")]
    Transition {
        kind: ActionKind,
        source: TransitionPhaseError<ActionError>,
    },

    #[error("{kind} actions have no executor")]
    Unsupported { kind: ActionKind },
}

impl ExecuteError {
    pub fn transition(kind: ActionKind, source: TransitionPhaseError<ActionError>) -> Self {
        Self::Transition { kind, source }
    }

    /// The underlying rule violation, if any.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            ExecuteError::Transition { source, .. } => Some(&source.error),
            ExecuteError::Unsupported { .. } => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::Transition { source, .. } => source.error.severity(),
            ExecuteError::Unsupported { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Transition { source, .. } => source.error.error_code(),
            ExecuteError::Unsupported { .. } => "EXECUTE_UNSUPPORTED",
        }
    }
}
