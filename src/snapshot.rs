use serde::{Deserialize, Serialize};

use crate::collectible::CollectibleKind;
use crate::game::DeathReason;
use crate::grid::{GridSize, Position};
use crate::input::Direction;

/// Read-only view of one collectible.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct CollectibleView {
    pub kind: CollectibleKind,
    pub position: Position,
    pub active: bool,
    /// Ticks left before it moves; zero for items that never expire.
    pub remaining_ticks: u32,
}

/// Remaining duration of every status effect, in frames.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EffectDurations {
    pub speed_boost: u32,
    pub slowdown: u32,
    pub invincible: u32,
    pub reverse_controls: u32,
    pub freeze: u32,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub bounds: GridSize,
    /// Snake cells from head to tail.
    pub body: Vec<Position>,
    pub heading: Direction,
    pub collectibles: Vec<CollectibleView>,
    /// Top-left corners of the 2×2 obstacle blocks.
    pub obstacles: Vec<Position>,
    pub score: u32,
    pub level: u32,
    pub combo: u32,
    pub effects: EffectDurations,
    pub move_interval: u32,
    pub paused: bool,
    pub game_over: bool,
    pub death_reason: Option<DeathReason>,
}

impl GameSnapshot {
    /// Score multiplier the next streak pickup would get.
    #[must_use]
    pub fn combo_multiplier(&self) -> u32 {
        self.combo + 1
    }
}
