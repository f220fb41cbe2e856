//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`StoreError`, `ActionError`) live next to the code
//! that raises them. This module provides the shared classification used by
//! the runtime when it decides how loudly to report a rejected action.

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Valid request that cannot be honoured right now (e.g. not enough points).
    Recoverable,

    /// Invalid input that should not be retried unchanged (e.g. unknown player).
    Validation,

    /// Unexpected state inconsistency that indicates a bug.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all game-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant (metrics, tests).
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
