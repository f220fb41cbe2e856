//! Authoritative game state representation.
//!
//! This module owns the value types (coordinates, players, effects) and the
//! [`GameStore`] that holds them. Runtime layers read snapshots of the store
//! and mutate it exclusively through its named methods.
mod error;
mod observer;
mod store;
pub mod types;

pub use error::StoreError;
pub use observer::{ListenerId, PlayerField, StoreChange};
pub use store::{GameState, GameStore, StoreSnapshot};
pub use types::{
    AppearPoint, Coordinates, DissolveHeart, DissolvePoint, EffectId, EffectRef, FloatingPoint,
    PlayerData, PlayerId, TracePath, UnattachedPoint, chebyshev_distance,
};
