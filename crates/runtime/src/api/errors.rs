//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule violations, executor misuse, worker coordination failures and
//! scenario loading so clients can bubble them up with consistent context.
use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::oneshot;

use game_core::engine::TransitionPhase;
use game_core::{ActionError, ActionKind, ErrorSeverity, GameError, StoreError};

pub use crate::executor::LifecycleError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} rejected during {phase}: {source}")]
    Rejected {
        kind: ActionKind,
        phase: TransitionPhase,
        #[source]
        source: ActionError,
    },

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("{kind} actions have no executor")]
    Unsupported { kind: ActionKind },

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to read scenario {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid RON scenario: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("invalid JSON scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown scenario format for {path} (expected .ron or .json)")]
    UnknownScenarioFormat { path: PathBuf },
}

impl RuntimeError {
    /// The rule violation behind this error, if the action itself was at fault.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            RuntimeError::Rejected { source, .. } => Some(source),
            RuntimeError::Action(error) => Some(error),
            _ => None,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Rejected { source, .. } | RuntimeError::Action(source) => {
                source.severity()
            }
            RuntimeError::Store(error) => error.severity(),
            RuntimeError::Unsupported { .. }
            | RuntimeError::Ron(_)
            | RuntimeError::Json(_)
            | RuntimeError::UnknownScenarioFormat { .. } => ErrorSeverity::Validation,
            RuntimeError::Io { .. } => ErrorSeverity::Recoverable,
            RuntimeError::Lifecycle(_)
            | RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Rejected { source, .. } | RuntimeError::Action(source) => {
                source.error_code()
            }
            RuntimeError::Store(error) => error.error_code(),
            RuntimeError::Lifecycle(LifecycleError::NotBegun { .. }) => "EXECUTOR_NOT_BEGUN",
            RuntimeError::Lifecycle(LifecycleError::DoubleExecution { .. }) => {
                "EXECUTOR_DOUBLE_EXECUTION"
            }
            RuntimeError::Unsupported { .. } => "RUNTIME_UNSUPPORTED_ACTION",
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            RuntimeError::Io { .. } => "SCENARIO_IO",
            RuntimeError::Ron(_) => "SCENARIO_RON",
            RuntimeError::Json(_) => "SCENARIO_JSON",
            RuntimeError::UnknownScenarioFormat { .. } => "SCENARIO_UNKNOWN_FORMAT",
        }
    }
}
