//! Executor state machine: Created → Begun → Executing → Executed → Committed.
use std::sync::atomic::{AtomicU8, Ordering};

use thiserror::Error;

/// Where an executor is in its begin/execute/commit sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ExecutorState {
    Created,
    Begun,
    Executing,
    Executed,
    Committed,
}

impl ExecutorState {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Created => 0,
            Self::Begun => 1,
            Self::Executing => 2,
            Self::Executed => 3,
            Self::Committed => 4,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Created,
            1 => Self::Begun,
            2 => Self::Executing,
            3 => Self::Executed,
            _ => Self::Committed,
        }
    }
}

/// Entry point of the executor contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Begin,
    Execute,
    Commit,
}

/// Misuse of the begin/execute/commit contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("{stage} called before begin")]
    NotBegun { stage: Stage },

    #[error("{stage} called twice")]
    DoubleExecution { stage: Stage },
}

/// Atomic phase flag shared by every staged executor.
///
/// `begin` and `commit` take the executor mutably, so only the execute
/// transition can race; it uses a compare-and-swap so a second caller
/// observes `Executing` and backs off.
#[derive(Debug)]
pub struct Lifecycle(AtomicU8);

impl Lifecycle {
    pub fn new() -> Self {
        Self(AtomicU8::new(ExecutorState::Created.as_u8()))
    }

    pub fn state(&self) -> ExecutorState {
        ExecutorState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Fails unless nothing has happened yet.
    pub fn ensure_created(&self) -> Result<(), LifecycleError> {
        match self.state() {
            ExecutorState::Created => Ok(()),
            _ => Err(LifecycleError::DoubleExecution {
                stage: Stage::Begin,
            }),
        }
    }

    pub fn mark_begun(&self) {
        self.0.store(ExecutorState::Begun.as_u8(), Ordering::Release);
    }

    /// Claims the execute slot.
    ///
    /// Returns `Ok(true)` for the caller that should animate and `Ok(false)`
    /// for any caller arriving once execution has started or finished.
    pub fn try_start_execute(&self) -> Result<bool, LifecycleError> {
        match self.0.compare_exchange(
            ExecutorState::Begun.as_u8(),
            ExecutorState::Executing.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(true),
            Err(current) => match ExecutorState::from_u8(current) {
                ExecutorState::Created => Err(LifecycleError::NotBegun {
                    stage: Stage::Execute,
                }),
                _ => Ok(false),
            },
        }
    }

    pub fn finish_execute(&self) {
        let _ = self.0.compare_exchange(
            ExecutorState::Executing.as_u8(),
            ExecutorState::Executed.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Commit is allowed after begin, whether or not execute ran or finished.
    pub fn ensure_committable(&self) -> Result<(), LifecycleError> {
        match self.state() {
            ExecutorState::Created => Err(LifecycleError::NotBegun {
                stage: Stage::Commit,
            }),
            ExecutorState::Committed => Err(LifecycleError::DoubleExecution {
                stage: Stage::Commit,
            }),
            ExecutorState::Begun | ExecutorState::Executing | ExecutorState::Executed => Ok(()),
        }
    }

    pub fn mark_committed(&self) {
        self.0.store(ExecutorState::Committed.as_u8(), Ordering::Release);
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
