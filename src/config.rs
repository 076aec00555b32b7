use thiserror::Error;

use crate::grid::GridSize;

/// Default grid width: a 1920 px wide field at 40 px per cell.
pub const DEFAULT_GRID_WIDTH: u16 = 48;

/// Default grid height: a 1080 px tall field at 40 px per cell.
pub const DEFAULT_GRID_HEIGHT: u16 = 27;

/// Smallest grid that still leaves room for obstacle placement.
pub const MIN_GRID_SIZE: u16 = 8;

/// Largest grid the terminal front-end will accept.
pub const MAX_GRID_SIZE: u16 = 512;

/// Minimum (and starting) snake length.
pub const MIN_SNAKE_LENGTH: usize = 3;

/// Target frame rate for the driver loop.
pub const FRAMES_PER_SECOND: u64 = 60;

/// Score needed per level increase.
pub const POINTS_PER_LEVEL: u32 = 100;

/// Obstacle count for a new game.
pub const INITIAL_OBSTACLE_COUNT: usize = 5;

/// Obstacle count is never raised past this on level-up.
pub const MAX_OBSTACLE_COUNT: usize = 15;

/// Random top-left samples tried per obstacle block.
pub const OBSTACLE_PLACEMENT_ATTEMPTS: usize = 100;

/// Frames between movement steps without throttle or effects.
pub const BASE_MOVE_INTERVAL: u32 = 10;

/// Fastest movement cadence in frames.
pub const MIN_MOVE_INTERVAL: u32 = 2;

/// Slowest movement cadence in frames.
pub const MAX_MOVE_INTERVAL: u32 = 20;

/// Frames added or removed by slowdown and speed boost.
pub const SPEED_EFFECT_FRAMES: u32 = 5;

/// Throttle values at or below this are treated as released.
pub const THROTTLE_DEADZONE: f32 = 0.1;

/// Frames of speed boost (Bonus) or slowdown (Debuff).
pub const SPEED_EFFECT_DURATION: u32 = 150;

/// Frames of invincibility granted by a Star.
pub const INVINCIBLE_DURATION: u32 = 300;

/// Frames of reversed controls granted by a Mushroom.
pub const REVERSE_CONTROLS_DURATION: u32 = 180;

/// Frames of frozen movement granted by Ice.
pub const FREEZE_DURATION: u32 = 30;

/// Errors raised while validating a [`GameConfig`].
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid {width}x{height} is smaller than the {min}x{min} minimum", min = MIN_GRID_SIZE)]
    GridTooSmall { width: u16, height: u16 },
    #[error("grid {width}x{height} exceeds the {max}x{max} maximum", max = MAX_GRID_SIZE)]
    GridTooLarge { width: u16, height: u16 },
}

/// Settings for one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            seed: None,
        }
    }
}

impl GameConfig {
    /// Checks that the grid can hold the starting snake and obstacles.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let GridSize { width, height } = self.grid;

        if width < MIN_GRID_SIZE || height < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        if width > MAX_GRID_SIZE || height > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge { width, height });
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::GridSize;

    use super::{ConfigError, GameConfig};

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();

        assert_eq!(config.validate(), Ok(config));
        assert_eq!(config.grid.total_cells(), 48 * 27);
    }

    #[test]
    fn tiny_grid_is_rejected() {
        let config = GameConfig {
            grid: GridSize {
                width: 4,
                height: 20,
            },
            seed: None,
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                width: 4,
                height: 20
            })
        );
    }

    #[test]
    fn huge_grid_is_rejected() {
        let config = GameConfig {
            grid: GridSize {
                width: 1000,
                height: 20,
            },
            seed: Some(1),
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }
}
