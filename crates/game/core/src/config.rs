//! Game configuration constants and tunable parameters.
use core::time::Duration;

use crate::state::Coordinates;

/// Game configuration shared by the rules, the executors and the runtime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Board size. Only enforced for spawns under [`ResourcePolicy::Strict`].
    pub board: BoardDimensions,
    /// Stats assigned to a freshly spawned player.
    pub spawn: SpawnStats,
    /// Pause lengths between animation steps.
    pub timing: AnimationTiming,
    /// Whether actions may overdraw points.
    pub resource_policy: ResourcePolicy,
    /// Power attached to every attack trace.
    pub trace_power: f32,
}

impl GameConfig {
    pub const DEFAULT_TRACE_POWER: f32 = 2.5;

    pub fn new() -> Self {
        Self {
            board: BoardDimensions::default(),
            spawn: SpawnStats::default(),
            timing: AnimationTiming::default(),
            resource_policy: ResourcePolicy::default(),
            trace_power: Self::DEFAULT_TRACE_POWER,
        }
    }

    pub fn with_resource_policy(mut self, policy: ResourcePolicy) -> Self {
        self.resource_policy = policy;
        self
    }

    pub fn with_timing(mut self, timing: AnimationTiming) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Board size in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardDimensions {
    pub width: u32,
    pub height: u32,
}

impl BoardDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true when `position` lies on the board.
    pub fn contains(&self, position: Coordinates) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }
}

impl Default for BoardDimensions {
    fn default() -> Self {
        Self::new(20, 10)
    }
}

/// Initial stats of a spawned player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnStats {
    pub range: i64,
    pub hearts: i64,
    pub points: i64,
}

impl Default for SpawnStats {
    fn default() -> Self {
        Self {
            range: 2,
            hearts: 3,
            points: 1,
        }
    }
}

/// Whether an action may spend more than the actor owns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourcePolicy {
    /// Balances may go negative; nothing is checked beyond player existence.
    #[default]
    Permissive,
    /// Overdrafts and off-board spawns are rejected before any mutation.
    Strict,
}

impl ResourcePolicy {
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Pause lengths, in milliseconds, between the animation steps of each action.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationTiming {
    pub spawn_ms: u64,
    pub share_ms: u64,
    pub fire_ms: u64,
    pub invest_ms: u64,
    pub move_ms: u64,
    /// Multiplier applied to every pause. `0.0` disables pacing entirely.
    pub speed: f32,
}

impl AnimationTiming {
    /// Timing with every pause collapsed to zero.
    pub fn instant() -> Self {
        Self {
            speed: 0.0,
            ..Self::default()
        }
    }

    pub fn spawn(&self) -> Duration {
        self.scaled(self.spawn_ms)
    }

    pub fn share(&self) -> Duration {
        self.scaled(self.share_ms)
    }

    pub fn fire(&self) -> Duration {
        self.scaled(self.fire_ms)
    }

    pub fn invest(&self) -> Duration {
        self.scaled(self.invest_ms)
    }

    pub fn movement(&self) -> Duration {
        self.scaled(self.move_ms)
    }

    fn scaled(&self, millis: u64) -> Duration {
        if self.speed <= 0.0 || !self.speed.is_finite() {
            return Duration::ZERO;
        }
        let scaled = millis as f64 * f64::from(self.speed);
        Duration::from_millis(scaled.round() as u64)
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            spawn_ms: 150,
            share_ms: 100,
            fire_ms: 300,
            invest_ms: 150,
            move_ms: 500,
            speed: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_matches_reference_pacing() {
        let timing = AnimationTiming::default();
        assert_eq!(timing.spawn(), Duration::from_millis(150));
        assert_eq!(timing.share(), Duration::from_millis(100));
        assert_eq!(timing.fire(), Duration::from_millis(300));
        assert_eq!(timing.invest(), Duration::from_millis(150));
        assert_eq!(timing.movement(), Duration::from_millis(500));
    }

    #[test]
    fn speed_scales_and_zero_disables_pauses() {
        let fast = AnimationTiming {
            speed: 0.5,
            ..AnimationTiming::default()
        };
        assert_eq!(fast.movement(), Duration::from_millis(250));
        assert_eq!(AnimationTiming::instant().fire(), Duration::ZERO);
    }

    #[test]
    fn board_contains_only_cells_inside_bounds() {
        let board = BoardDimensions::default();
        assert!(board.contains(Coordinates::new(0, 0)));
        assert!(board.contains(Coordinates::new(19, 9)));
        assert!(!board.contains(Coordinates::new(20, 9)));
        assert!(!board.contains(Coordinates::new(-1, 3)));
    }
}
