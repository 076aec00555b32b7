use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cadence::MovementCadence;
use crate::collectible::{Collectible, CollectibleKind, ComboRule, LengthChange, Reward};
use crate::config::{GameConfig, INITIAL_OBSTACLE_COUNT, MAX_OBSTACLE_COUNT, POINTS_PER_LEVEL};
use crate::effects::StatusEffects;
use crate::events::{GameEvent, LEVEL_UP_PULSE, OBSTACLE_HIT_PULSE};
use crate::grid::GridSize;
use crate::input::{Direction, GameInput};
use crate::obstacle::ObstacleField;
use crate::snake::Snake;
use crate::snapshot::{CollectibleView, EffectDurations, GameSnapshot};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

/// What ended the run.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum DeathReason {
    SelfCollision,
    Obstacle,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub obstacles: ObstacleField,
    pub effects: StatusEffects,
    pub score: u32,
    pub level: u32,
    pub combo: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
    combo_active: bool,
    collectibles: [Collectible; 8],
    cadence: MovementCadence,
    bounds: GridSize,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Creates a state from a validated configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config.grid, rng)
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let snake = Snake::starting(bounds);

        let mut obstacles = ObstacleField::with_count(INITIAL_OBSTACLE_COUNT);
        obstacles.generate(&mut rng, bounds, &snake);

        let collectibles =
            CollectibleKind::ALL.map(|kind| Collectible::spawn(kind, &mut rng, bounds, &snake));

        Self {
            snake,
            obstacles,
            effects: StatusEffects::default(),
            score: 0,
            level: 1,
            combo: 0,
            status: GameStatus::Playing,
            death_reason: None,
            tick_count: 0,
            combo_active: false,
            collectibles,
            cadence: MovementCadence::default(),
            bounds,
            rng,
            events: Vec::new(),
        }
    }

    /// Runs one frame: the movement cadence, a possible advance, then the
    /// per-frame update. Returns whether the snake moved.
    ///
    /// `throttle` is an analog speed request in `0.0..=1.0`.
    pub fn run_frame(&mut self, throttle: f32) -> bool {
        let mut moved = false;
        if self.status == GameStatus::Playing && self.cadence.on_frame(&mut self.effects, throttle)
        {
            self.advance();
            moved = true;
        }

        self.update();
        moved
    }

    /// Moves the snake one cell along its pending heading.
    pub fn advance(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }
        self.snake.advance(self.bounds);
    }

    /// Advances the simulation by one tick: countdowns, collisions, pickups.
    pub fn update(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.tick_count += 1;

        for item in &mut self.collectibles {
            item.tick(&mut self.rng, self.bounds, &self.snake);
        }
        self.effects.tick();
        self.snake.wrap_head(self.bounds);

        let head = self.snake.head();
        if !self.effects.is_invincible() {
            if self.snake.head_overlaps_body() {
                self.end_game(DeathReason::SelfCollision);
                return;
            }

            if self.obstacles.collides(head) {
                self.events.push(GameEvent::Pulse(OBSTACLE_HIT_PULSE));
                self.end_game(DeathReason::Obstacle);
                return;
            }
        }

        for kind in CollectibleKind::ALL {
            let item = self.collectible(kind);
            if item.active && item.position == head {
                self.resolve_pickup(kind);
            }
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Playing {
                    self.handle_direction_input(direction);
                }
            }
            GameInput::Pause => {
                self.status = match self.status {
                    GameStatus::Playing => GameStatus::Paused,
                    GameStatus::Paused => GameStatus::Playing,
                    other => other,
                };
            }
            GameInput::Reset => self.reset(),
            GameInput::Boost | GameInput::Quit => {}
        }
    }

    /// Forwards a heading request to the snake, mirrored while controls are
    /// reversed.
    pub fn handle_direction_input(&mut self, direction: Direction) {
        let direction = if self.effects.controls_reversed() {
            direction.opposite()
        } else {
            direction
        };
        self.snake.set_heading(direction);
    }

    /// Starts a new game on the same grid.
    ///
    /// Pending events survive so a final game-over is not lost.
    pub fn reset(&mut self) {
        let rng = std::mem::replace(&mut self.rng, StdRng::seed_from_u64(0));
        let events = std::mem::take(&mut self.events);

        *self = Self::with_rng(self.bounds, rng);
        self.events = events;

        info!("game reset");
    }

    /// Returns and clears the events produced since the last call.
    ///
    /// Events queue up until drained, so a driver must call this every frame.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the collectible of `kind`.
    #[must_use]
    pub fn collectible(&self, kind: CollectibleKind) -> &Collectible {
        &self.collectibles[kind as usize]
    }

    /// Returns mutable access to the collectible of `kind`.
    pub fn collectible_mut(&mut self, kind: CollectibleKind) -> &mut Collectible {
        &mut self.collectibles[kind as usize]
    }

    /// Iterates over all collectibles in pickup order.
    pub fn collectibles(&self) -> impl Iterator<Item = &Collectible> {
        self.collectibles.iter()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// True while streak pickups are multiplying their reward.
    #[must_use]
    pub fn combo_active(&self) -> bool {
        self.combo_active
    }

    /// Returns the grid size used for movement and spawning.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Builds the read-only view handed to renderers.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let slowdown = self.effects.slowdown_timer();

        GameSnapshot {
            bounds: self.bounds,
            body: self.snake.segments().copied().collect(),
            heading: self.snake.current_heading(),
            collectibles: self
                .collectibles
                .iter()
                .map(|item| CollectibleView {
                    kind: item.kind,
                    position: item.position,
                    active: item.active,
                    remaining_ticks: item.remaining_ticks(),
                })
                .collect(),
            obstacles: self.obstacles.blocks().to_vec(),
            score: self.score,
            level: self.level,
            combo: self.combo,
            effects: EffectDurations {
                speed_boost: if slowdown < 0 { slowdown.unsigned_abs() } else { 0 },
                slowdown: if slowdown > 0 { slowdown.unsigned_abs() } else { 0 },
                invincible: self.effects.invincible_timer(),
                reverse_controls: self.effects.reverse_controls_timer(),
                freeze: self.effects.freeze_timer(),
            },
            move_interval: self.cadence.interval(),
            paused: self.status == GameStatus::Paused,
            game_over: self.is_game_over(),
            death_reason: self.death_reason,
        }
    }

    fn resolve_pickup(&mut self, kind: CollectibleKind) {
        let effect = kind.effect();
        let score_before = self.score;

        match effect.length {
            LengthChange::Grow => self.snake.grow(),
            LengthChange::Shrink => {
                let _ = self.snake.shrink();
            }
        }

        self.score = match effect.reward {
            Reward::Rolled => self.score.saturating_add(self.collectible(kind).points()),
            Reward::Fixed(points) => self.score.saturating_add(points),
            Reward::Combo(base) => {
                let points = if self.combo_active {
                    base.saturating_mul(1 + self.combo)
                } else {
                    base
                };
                self.score.saturating_add(points)
            }
            Reward::Penalty(points) => self.score.saturating_sub(points),
        };

        if let Some(grant) = effect.grant {
            self.effects.apply(grant);
        }

        let item = &mut self.collectibles[kind as usize];
        item.respawn(&mut self.rng, self.bounds, &self.snake);

        match effect.combo {
            ComboRule::Extend => {
                self.combo = if self.combo_active { self.combo + 1 } else { 1 };
                self.combo_active = true;
            }
            ComboRule::Break => {
                self.combo = 0;
                self.combo_active = false;
            }
        }

        let score_delta = i64::from(self.score) - i64::from(score_before);
        self.events.push(GameEvent::Pickup {
            kind,
            score_delta: i32::try_from(score_delta).unwrap_or(i32::MAX),
        });
        self.events.push(GameEvent::Pulse(effect.pulse));

        if effect.checks_level {
            self.check_level_up();
        }
    }

    fn check_level_up(&mut self) {
        let new_level = self.score / POINTS_PER_LEVEL + 1;
        if new_level <= self.level {
            return;
        }

        self.level = new_level;
        let count = usize::try_from(5 + self.level)
            .unwrap_or(MAX_OBSTACLE_COUNT)
            .min(MAX_OBSTACLE_COUNT);
        self.obstacles.set_count(count);
        self.obstacles.generate(&mut self.rng, self.bounds, &self.snake);

        debug!(level = self.level, obstacles = count, "level up");
        self.events.push(GameEvent::LevelUp { level: self.level });
        self.events.push(GameEvent::Pulse(LEVEL_UP_PULSE));
    }

    fn end_game(&mut self, reason: DeathReason) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);

        info!(score = self.score, level = self.level, ?reason, "game over");
        self.events.push(GameEvent::GameOver {
            score: self.score,
            level: self.level,
        });
    }
}
