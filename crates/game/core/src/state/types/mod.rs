mod common;
mod effects;
mod player;

pub use common::{Coordinates, chebyshev_distance};
pub use effects::{
    AppearPoint, DissolveHeart, DissolvePoint, EffectId, EffectRef, FloatingPoint, TracePath,
    UnattachedPoint,
};
pub use player::{PlayerData, PlayerId};
