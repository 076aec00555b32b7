use rand::Rng;
use tracing::debug;

use crate::config::{INITIAL_OBSTACLE_COUNT, OBSTACLE_PLACEMENT_ATTEMPTS};
use crate::grid::{GridSize, Position, footprint_2x2};
use crate::snake::Snake;

/// Distance kept between obstacle top-lefts and the top/left edges.
const EDGE_MARGIN: i32 = 2;

/// Set of 2×2 blocking rocks, stored by top-left corner.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ObstacleField {
    blocks: Vec<Position>,
    count: usize,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::with_count(INITIAL_OBSTACLE_COUNT)
    }
}

impl ObstacleField {
    /// Creates an empty field that will try to place `count` blocks.
    #[must_use]
    pub fn with_count(count: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(count),
            count,
        }
    }

    /// Creates a field from explicit top-left corners.
    #[must_use]
    pub fn from_blocks(blocks: Vec<Position>) -> Self {
        let count = blocks.len();
        Self { blocks, count }
    }

    /// Discards all blocks and places up to `count` new ones.
    ///
    /// Each block gets a bounded number of random attempts; a block whose
    /// attempts all overlap another block or the snake is skipped.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: GridSize, snake: &Snake) {
        self.blocks.clear();

        let max_x = i32::from(bounds.width) - 4;
        let max_y = i32::from(bounds.height) - 4;
        if max_x < EDGE_MARGIN || max_y < EDGE_MARGIN {
            debug!(
                width = bounds.width,
                height = bounds.height,
                "grid too small for obstacles"
            );
            return;
        }

        for _ in 0..self.count {
            for _ in 0..OBSTACLE_PLACEMENT_ATTEMPTS {
                let candidate = Position::new(
                    rng.gen_range(EDGE_MARGIN..=max_x),
                    rng.gen_range(EDGE_MARGIN..=max_y),
                );
                if self.can_place(candidate, snake) {
                    self.blocks.push(candidate);
                    break;
                }
            }
        }

        if self.blocks.len() < self.count {
            debug!(
                placed = self.blocks.len(),
                requested = self.count,
                "obstacle placement ran out of attempts"
            );
        }
    }

    fn can_place(&self, candidate: Position, snake: &Snake) -> bool {
        footprint_2x2(candidate)
            .into_iter()
            .all(|cell| !snake.occupies(cell) && !self.collides(cell))
    }

    /// Returns true if `position` lies on any block.
    #[must_use]
    pub fn collides(&self, position: Position) -> bool {
        self.blocks
            .iter()
            .any(|block| footprint_2x2(*block).contains(&position))
    }

    /// Number of blocks the next generation will try to place.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    /// Top-left corners of the placed blocks.
    #[must_use]
    pub fn blocks(&self) -> &[Position] {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::grid::{GridSize, Position, footprint_2x2};
    use crate::snake::Snake;

    use super::ObstacleField;

    const BOUNDS: GridSize = GridSize {
        width: 48,
        height: 27,
    };

    #[test]
    fn collides_covers_whole_footprint() {
        let field = ObstacleField::from_blocks(vec![Position::new(5, 5)]);

        for cell in footprint_2x2(Position::new(5, 5)) {
            assert!(field.collides(cell));
        }
        assert!(!field.collides(Position::new(7, 5)));
        assert!(!field.collides(Position::new(4, 5)));
        assert!(!field.collides(Position::new(5, 7)));
    }

    #[test]
    fn generated_blocks_never_overlap_each_other_or_the_snake() {
        let snake = Snake::default();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut field = ObstacleField::with_count(15);
            field.generate(&mut rng, BOUNDS, &snake);

            let blocks = field.blocks();
            assert!(blocks.len() <= 15);
            for (i, a) in blocks.iter().enumerate() {
                assert!((2..=44).contains(&a.x) && (2..=23).contains(&a.y));
                for cell in footprint_2x2(*a) {
                    assert!(!snake.occupies(cell));
                    for b in &blocks[i + 1..] {
                        assert!(!footprint_2x2(*b).contains(&cell));
                    }
                }
            }
        }
    }

    #[test]
    fn regeneration_replaces_previous_blocks() {
        let snake = Snake::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut field = ObstacleField::default();
        field.generate(&mut rng, BOUNDS, &snake);
        assert_eq!(field.blocks().len(), 5);

        field.set_count(7);
        field.generate(&mut rng, BOUNDS, &snake);
        assert_eq!(field.blocks().len(), 7);
    }

    #[test]
    fn crowded_field_degrades_gracefully() {
        let small = GridSize {
            width: 8,
            height: 8,
        };
        let snake = Snake::starting(small);
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ObstacleField::with_count(15);

        field.generate(&mut rng, small, &snake);

        // Top-lefts are limited to 2..=4 on both axes, so only a few fit.
        assert!(field.blocks().len() < 15);
        assert_eq!(field.count(), 15);
    }

    #[test]
    fn tiny_grid_yields_empty_field() {
        let tiny = GridSize {
            width: 5,
            height: 5,
        };
        let snake = Snake::new(Position::new(0, 0), crate::input::Direction::Left);
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ObstacleField::default();

        field.generate(&mut rng, tiny, &snake);

        assert!(field.blocks().is_empty());
    }
}
