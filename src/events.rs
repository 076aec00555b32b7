use serde::{Deserialize, Serialize};

use crate::collectible::CollectibleKind;

/// Fire-and-forget rumble request for a controller, if one exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    /// Low-frequency motor intensity in `0.0..=1.0`.
    pub low: f32,
    /// High-frequency motor intensity in `0.0..=1.0`.
    pub high: f32,
    pub duration_ms: u32,
}

impl Pulse {
    #[must_use]
    pub const fn new(low: f32, high: f32, duration_ms: u32) -> Self {
        Self {
            low,
            high,
            duration_ms,
        }
    }
}

/// Pulse played when the snake runs into an obstacle.
pub const OBSTACLE_HIT_PULSE: Pulse = Pulse::new(1.0, 1.0, 500);

/// Pulse played on every level-up.
pub const LEVEL_UP_PULSE: Pulse = Pulse::new(1.0, 1.0, 600);

/// Notifications emitted by the simulation for outer collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Pickup { kind: CollectibleKind, score_delta: i32 },
    LevelUp { level: u32 },
    Pulse(Pulse),
    /// Emitted exactly once per transition into game over.
    GameOver { score: u32, level: u32 },
}
