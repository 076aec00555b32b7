use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::effects::EffectGrant;
use crate::events::Pulse;
use crate::grid::{GridSize, Position};
use crate::snake::Snake;

/// Inclusive range of points a Food item can be worth.
pub const FOOD_POINTS_RANGE: (u32, u32) = (1, 5);

/// Every item that can appear on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Food,
    /// Apple: speed boost.
    Bonus,
    /// Spider: score penalty and slowdown.
    Debuff,
    Strawberry,
    Diamond,
    Star,
    Mushroom,
    Ice,
}

impl CollectibleKind {
    /// All kinds, in the order pickups are resolved within one tick.
    pub const ALL: [Self; 8] = [
        Self::Food,
        Self::Bonus,
        Self::Debuff,
        Self::Strawberry,
        Self::Diamond,
        Self::Star,
        Self::Mushroom,
        Self::Ice,
    ];

    /// Ticks the item stays in place before moving elsewhere. Food never
    /// expires.
    #[must_use]
    pub fn lifetime_ticks(self) -> Option<u32> {
        match self {
            Self::Food => None,
            Self::Bonus | Self::Star => Some(500),
            Self::Debuff | Self::Strawberry => Some(400),
            Self::Mushroom => Some(350),
            Self::Diamond | Self::Ice => Some(300),
        }
    }

    /// Returns what happens when the snake picks this kind up.
    #[must_use]
    pub fn effect(self) -> PickupEffect {
        match self {
            Self::Food => PickupEffect {
                reward: Reward::Rolled,
                length: LengthChange::Grow,
                combo: ComboRule::Break,
                grant: None,
                checks_level: true,
                pulse: Pulse::new(0.7, 0.7, 200),
            },
            Self::Bonus => PickupEffect {
                reward: Reward::Combo(3),
                length: LengthChange::Grow,
                combo: ComboRule::Extend,
                grant: Some(EffectGrant::SpeedBoost),
                checks_level: true,
                pulse: Pulse::new(1.0, 0.5, 300),
            },
            Self::Debuff => PickupEffect {
                reward: Reward::Penalty(1),
                length: LengthChange::Grow,
                combo: ComboRule::Break,
                grant: Some(EffectGrant::Slowdown),
                checks_level: false,
                pulse: Pulse::new(0.3, 0.8, 200),
            },
            Self::Strawberry => PickupEffect {
                reward: Reward::Combo(5),
                length: LengthChange::Shrink,
                combo: ComboRule::Extend,
                grant: None,
                checks_level: true,
                pulse: Pulse::new(0.8, 0.6, 250),
            },
            Self::Diamond => PickupEffect {
                reward: Reward::Combo(10),
                length: LengthChange::Grow,
                combo: ComboRule::Extend,
                grant: None,
                checks_level: true,
                pulse: Pulse::new(1.0, 1.0, 400),
            },
            Self::Star => PickupEffect {
                reward: Reward::Fixed(2),
                length: LengthChange::Grow,
                combo: ComboRule::Extend,
                grant: Some(EffectGrant::Invincibility),
                checks_level: true,
                pulse: Pulse::new(0.5, 0.5, 200),
            },
            Self::Mushroom => PickupEffect {
                reward: Reward::Fixed(1),
                length: LengthChange::Grow,
                combo: ComboRule::Break,
                grant: Some(EffectGrant::ReverseControls),
                checks_level: true,
                pulse: Pulse::new(0.6, 0.4, 250),
            },
            Self::Ice => PickupEffect {
                reward: Reward::Fixed(1),
                length: LengthChange::Grow,
                combo: ComboRule::Break,
                grant: Some(EffectGrant::Freeze),
                checks_level: true,
                pulse: Pulse::new(0.4, 0.8, 150),
            },
        }
    }

    /// Short display name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Bonus => "apple",
            Self::Debuff => "spider",
            Self::Strawberry => "strawberry",
            Self::Diamond => "diamond",
            Self::Star => "star",
            Self::Mushroom => "mushroom",
            Self::Ice => "ice",
        }
    }
}

/// How a pickup changes the score.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Reward {
    /// The item's own rolled points value.
    Rolled,
    /// Flat points, never multiplied.
    Fixed(u32),
    /// Base points multiplied by `1 + combo` while a combo is running.
    Combo(u32),
    /// Points taken away, never below zero.
    Penalty(u32),
}

/// How a pickup changes the snake's length.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LengthChange {
    Grow,
    Shrink,
}

/// Whether a pickup continues or ends the combo streak.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ComboRule {
    Extend,
    Break,
}

/// Everything the orchestrator needs to resolve one pickup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupEffect {
    pub reward: Reward,
    pub length: LengthChange,
    pub combo: ComboRule,
    pub grant: Option<EffectGrant>,
    pub checks_level: bool,
    pub pulse: Pulse,
}

/// One item on the board together with its expiry countdown.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub position: Position,
    pub active: bool,
    remaining_ticks: u32,
    points: u32,
}

impl Collectible {
    /// Places an item of `kind` at an explicit position with a fresh countdown.
    #[must_use]
    pub fn at(kind: CollectibleKind, position: Position) -> Self {
        Self {
            kind,
            position,
            active: true,
            remaining_ticks: kind.lifetime_ticks().unwrap_or(0),
            points: FOOD_POINTS_RANGE.0,
        }
    }

    /// Spawns an item of `kind` on a random cell not covered by the snake.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        kind: CollectibleKind,
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
    ) -> Self {
        let mut item = Self::at(kind, Position::new(0, 0));
        item.respawn(rng, bounds, snake);
        item
    }

    /// Moves the item to a new free cell and restarts its countdown.
    ///
    /// On a board without a free cell the item stays where it is.
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: GridSize, snake: &Snake) {
        match spawn_position(rng, bounds, snake) {
            Some(position) => self.position = position,
            None => warn!(kind = self.kind.label(), "no free cell to respawn collectible"),
        }

        self.remaining_ticks = self.kind.lifetime_ticks().unwrap_or(0);
        if self.kind == CollectibleKind::Food {
            self.points = rng.gen_range(FOOD_POINTS_RANGE.0..=FOOD_POINTS_RANGE.1);
        }

        debug!(
            kind = self.kind.label(),
            x = self.position.x,
            y = self.position.y,
            "collectible spawned"
        );
    }

    /// Advances the expiry countdown by one tick, respawning on expiry.
    /// Returns `true` when the item moved. Food never expires.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: GridSize, snake: &Snake) -> bool {
        if self.kind.lifetime_ticks().is_none() {
            return false;
        }

        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks > 0 {
            return false;
        }

        self.respawn(rng, bounds, snake);
        true
    }

    /// Ticks left before the item moves; zero for Food.
    #[must_use]
    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    /// Points value rolled for Food on its latest spawn.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Overrides the rolled points value.
    pub fn set_points(&mut self, points: u32) {
        self.points = points;
    }
}

/// Picks a uniformly random cell that is not currently occupied by the snake.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let mut candidates = Vec::with_capacity(bounds.total_cells());

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::grid::{GridSize, Position};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{Collectible, CollectibleKind, ComboRule, Reward, spawn_position};

    const BOUNDS: GridSize = GridSize {
        width: 8,
        height: 6,
    };

    #[test]
    fn spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::new(Position { x: 2, y: 0 }, Direction::Right);

        for _ in 0..100 {
            let position = spawn_position(&mut rng, BOUNDS, &snake).expect("board has free cells");
            assert!(!snake.occupies(position));
            assert!(position.is_within_bounds(BOUNDS));
        }
    }

    #[test]
    fn spawn_on_full_board_keeps_position() {
        let mut rng = StdRng::seed_from_u64(1);
        let tiny = GridSize {
            width: 3,
            height: 1,
        };
        let snake = Snake::new(Position { x: 2, y: 0 }, Direction::Right);
        let mut item = Collectible::at(CollectibleKind::Diamond, Position::new(5, 5));

        assert_eq!(spawn_position(&mut rng, tiny, &snake), None);

        item.respawn(&mut rng, tiny, &snake);
        assert_eq!(item.position, Position::new(5, 5));
        assert_eq!(item.remaining_ticks(), 300);
    }

    #[test]
    fn timed_item_respawns_exactly_when_countdown_hits_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = Snake::new(Position { x: 2, y: 0 }, Direction::Right);
        let mut item = Collectible::spawn(CollectibleKind::Diamond, &mut rng, BOUNDS, &snake);
        assert_eq!(item.remaining_ticks(), 300);

        for _ in 0..299 {
            assert!(!item.tick(&mut rng, BOUNDS, &snake));
        }
        assert_eq!(item.remaining_ticks(), 1);

        assert!(item.tick(&mut rng, BOUNDS, &snake));
        assert_eq!(item.remaining_ticks(), 300);
        assert!(!snake.occupies(item.position));
    }

    #[test]
    fn food_never_expires() {
        let mut rng = StdRng::seed_from_u64(4);
        let snake = Snake::new(Position { x: 2, y: 0 }, Direction::Right);
        let mut food = Collectible::at(CollectibleKind::Food, Position::new(4, 4));

        for _ in 0..1_000 {
            assert!(!food.tick(&mut rng, BOUNDS, &snake));
        }
        assert_eq!(food.position, Position::new(4, 4));
    }

    #[test]
    fn food_rolls_points_on_every_spawn() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::new(Position { x: 2, y: 0 }, Direction::Right);
        let mut food = Collectible::spawn(CollectibleKind::Food, &mut rng, BOUNDS, &snake);
        let mut seen = [false; 6];

        for _ in 0..200 {
            food.respawn(&mut rng, BOUNDS, &snake);
            assert!((1..=5).contains(&food.points()));
            seen[food.points() as usize] = true;
        }

        assert!(seen[1..].iter().all(|hit| *hit));
    }

    #[test]
    fn pickup_table_matches_streak_rules() {
        let extends: Vec<_> = CollectibleKind::ALL
            .into_iter()
            .filter(|kind| kind.effect().combo == ComboRule::Extend)
            .collect();

        assert_eq!(
            extends,
            vec![
                CollectibleKind::Bonus,
                CollectibleKind::Strawberry,
                CollectibleKind::Diamond,
                CollectibleKind::Star
            ]
        );
        assert_eq!(CollectibleKind::Star.effect().reward, Reward::Fixed(2));
        assert!(!CollectibleKind::Debuff.effect().checks_level);
    }
}
