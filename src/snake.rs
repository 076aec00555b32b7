use std::collections::VecDeque;

use crate::config::MIN_SNAKE_LENGTH;
use crate::grid::{GridSize, Position};
use crate::input::{Direction, direction_change_is_valid};

/// Head position of a freshly created snake.
pub const DEFAULT_SNAKE_START: Position = Position::new(10, 10);

/// Mutable snake state and heading gating behavior.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    current_heading: Direction,
    pending_heading: Direction,
    pending_growth: u32,
}

impl Snake {
    /// Creates a three-cell snake with its head at `head`, body trailing
    /// behind it against `heading`.
    #[must_use]
    pub fn new(head: Position, heading: Direction) -> Self {
        let behind = heading.opposite();
        let mut body = VecDeque::with_capacity(MIN_SNAKE_LENGTH);
        let mut cell = head;
        for _ in 0..MIN_SNAKE_LENGTH {
            body.push_back(cell);
            cell = cell.step(behind);
        }

        Self::with_body(body, heading)
    }

    /// Creates the starting snake for a grid, heading right.
    ///
    /// Uses [`DEFAULT_SNAKE_START`] unless the grid is too small for it, in
    /// which case the head is moved towards the centre.
    #[must_use]
    pub fn starting(bounds: GridSize) -> Self {
        let head = Position::new(
            DEFAULT_SNAKE_START.x.min(i32::from(bounds.width) / 2),
            DEFAULT_SNAKE_START.y.min(i32::from(bounds.height) / 2),
        );
        Self::new(head, Direction::Right)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Callers are responsible for passing at least three segments.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, heading: Direction) -> Self {
        debug_assert!(segments.len() >= MIN_SNAKE_LENGTH);
        Self::with_body(VecDeque::from(segments), heading)
    }

    fn with_body(body: VecDeque<Position>, heading: Direction) -> Self {
        Self {
            body,
            current_heading: heading,
            pending_heading: heading,
            pending_growth: 0,
        }
    }

    /// Requests a heading change for the next advance.
    ///
    /// A reversal of the committed heading is ignored, even if a different
    /// turn is already pending.
    pub fn set_heading(&mut self, heading: Direction) {
        if !direction_change_is_valid(self.current_heading, heading) {
            return;
        }
        self.pending_heading = heading;
    }

    /// Applies one movement step along the pending heading.
    pub fn advance(&mut self, bounds: GridSize) {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        let next_head = self.head().step(self.pending_heading).wrapped(bounds);
        self.body.push_front(next_head);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            let _ = self.body.pop_back();
        }

        self.current_heading = self.pending_heading;
    }

    /// Keeps the tail in place on the next advance.
    pub fn grow(&mut self) {
        self.pending_growth += 1;
    }

    /// Drops the tail cell, cancelling a pending growth first if there is
    /// one. Returns false when the snake, counting pending growth, is already
    /// at its minimum length.
    pub fn shrink(&mut self) -> bool {
        let effective_len = self.body.len() + self.pending_growth as usize;
        if effective_len <= MIN_SNAKE_LENGTH {
            return false;
        }

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
            return true;
        }
        self.body.pop_back().is_some()
    }

    /// Moves the head back inside `bounds` if it has left them.
    pub fn wrap_head(&mut self, bounds: GridSize) {
        if let Some(head) = self.body.front_mut() {
            *head = head.wrapped(bounds);
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the heading used by the last advance.
    #[must_use]
    pub fn current_heading(&self) -> Direction {
        self.current_heading
    }

    /// Returns the heading the next advance will use.
    #[must_use]
    pub fn pending_heading(&self) -> Direction {
        self.pending_heading
    }

    /// Returns how many advances will still keep their tail.
    #[must_use]
    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new(DEFAULT_SNAKE_START, Direction::Right)
    }
}
