//! Deterministic game rules and the authoritative store shared by every layer.
//!
//! `game-core` defines the canonical data (players, effects, actions), the
//! [`GameStore`] that owns them and the pure transition rules that move the
//! ledger from one action to the next. It is synchronous and has no logging
//! backend; the runtime crate adds pacing, animation and observability.
//! Instant execution flows through [`engine::GameEngine`], staged execution
//! reuses [`engine::begin_transition`] and [`engine::commit_transition`].
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

pub use action::{
    Action, ActionError, ActionKind, ActionTransition, DieAction, FireAction, FirePlan,
    HelpAction, InvestAction, InvestPlan, JudgePoolAction, MoveAction, MovePlan, Resource,
    ShareAction, SharePlan, SpawnAction, SpawnPlan, SpawnProfile,
};
pub use config::{AnimationTiming, BoardDimensions, GameConfig, ResourcePolicy, SpawnStats};
pub use engine::{
    ExecuteError, GameEngine, TransitionPhase, TransitionPhaseError, begin_transition,
    commit_transition,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    AppearPoint, Coordinates, DissolveHeart, DissolvePoint, EffectId, EffectRef, FloatingPoint,
    GameState, GameStore, ListenerId, PlayerData, PlayerField, PlayerId, StoreChange, StoreError,
    StoreSnapshot, TracePath, UnattachedPoint, chebyshev_distance,
};
