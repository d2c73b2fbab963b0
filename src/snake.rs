use std::collections::VecDeque;

use log::debug;

use crate::config::GridSize;
use crate::input::{direction_change_is_valid, Direction};

/// Heading every fresh or reset snake starts with.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring cell in `direction`, wrapping at the edges.
    #[must_use]
    pub fn stepped(self, direction: Direction, bounds: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
        .wrapped(bounds)
    }

    /// Returns the cell in the middle of the board.
    #[must_use]
    pub fn center_of(bounds: GridSize) -> Self {
        Self {
            x: i32::from(bounds.width / 2),
            y: i32::from(bounds.height / 2),
        }
    }
}

/// Mutable snake state: body, heading, buffered turn and growth target.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
    target_length: usize,
    center: Position,
}

impl Snake {
    /// Creates a one-cell snake at `center`, which is also where it respawns.
    #[must_use]
    pub fn new(center: Position) -> Self {
        Self {
            body: VecDeque::from([center]),
            direction: INITIAL_DIRECTION,
            pending_direction: None,
            target_length: 1,
            center,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The growth target matches the given length, so the snake keeps its
    /// size until it eats. `center` is the respawn cell used by [`reset`].
    ///
    /// [`reset`]: Snake::reset
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction, center: Position) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            target_length: segments.len(),
            body: VecDeque::from(segments),
            direction,
            pending_direction: None,
            center,
        }
    }

    /// Stores a heading request for the next tick, replacing any earlier one.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Promotes the pending heading unless it reverses the current one.
    ///
    /// The pending slot is emptied either way.
    pub fn apply_pending_direction(&mut self) {
        let Some(next) = self.pending_direction.take() else {
            return;
        };

        if direction_change_is_valid(self.direction, next) {
            self.direction = next;
        } else {
            debug!("discarded reversal from {:?} to {next:?}", self.direction);
        }
    }

    /// Moves the head one cell and returns the vacated tail cell, if any.
    ///
    /// No cell is vacated while the body is shorter than the growth target.
    pub fn advance(&mut self, bounds: GridSize) -> Option<Position> {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        let next_head = self.head().stepped(self.direction, bounds);
        self.body.push_front(next_head);

        if self.body.len() > self.target_length {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Raises the growth target by one segment.
    pub fn grow_one(&mut self) {
        self.target_length += 1;
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Respawns as a one-cell snake at the center heading right.
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push_front(self.center);
        self.direction = INITIAL_DIRECTION;
        self.pending_direction = None;
        self.target_length = 1;
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

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    #[must_use]
    pub fn center(&self) -> Position {
        self.center
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    const BOUNDS: GridSize = GridSize {
        width: 32,
        height: 24,
    };

    fn cells(snake: &Snake) -> Vec<Position> {
        snake.segments().copied().collect()
    }

    #[test]
    fn position_wrapping_keeps_coordinates_inside_bounds() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert_eq!(Position { x: -1, y: 3 }.wrapped(bounds), Position { x: 9, y: 3 });
        assert_eq!(Position { x: 4, y: 8 }.wrapped(bounds), Position { x: 4, y: 0 });
        assert_eq!(Position { x: 0, y: -1 }.wrapped(bounds), Position { x: 0, y: 7 });
    }

    #[test]
    fn new_snake_sits_on_center_heading_right() {
        let center = Position::center_of(BOUNDS);
        let snake = Snake::new(center);

        assert_eq!(center, Position { x: 16, y: 12 });
        assert_eq!(cells(&snake), vec![center]);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.target_length(), 1);
    }

    #[test]
    fn advance_shifts_body_and_reports_vacated_tail() {
        let mut snake = Snake::from_segments(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
                Position { x: 3, y: 5 },
            ],
            Direction::Right,
            Position::center_of(BOUNDS),
        );

        let vacated = snake.advance(BOUNDS);

        assert_eq!(vacated, Some(Position { x: 3, y: 5 }));
        assert_eq!(
            cells(&snake),
            vec![
                Position { x: 6, y: 5 },
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
            ]
        );
    }

    #[test]
    fn growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position { x: 5, y: 5 });

        snake.grow_one();
        let vacated = snake.advance(BOUNDS);

        assert_eq!(vacated, None);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.target_length(), 2);

        assert_eq!(snake.advance(BOUNDS), Some(Position { x: 5, y: 5 }));
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn head_wraps_at_right_edge() {
        let mut snake = Snake::new(Position { x: 31, y: 4 });

        snake.advance(BOUNDS);

        assert_eq!(snake.head(), Position { x: 0, y: 4 });
    }

    #[test]
    fn head_wraps_at_top_edge() {
        let mut snake = Snake::new(Position { x: 3, y: 0 });
        snake.set_pending_direction(Direction::Up);
        snake.apply_pending_direction();

        snake.advance(BOUNDS);

        assert_eq!(snake.head(), Position { x: 3, y: 23 });
    }

    #[test]
    fn pending_reversal_is_discarded() {
        let mut snake = Snake::new(Position { x: 5, y: 5 });

        snake.set_pending_direction(Direction::Left);
        snake.apply_pending_direction();

        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn latest_pending_request_wins() {
        let mut snake = Snake::new(Position { x: 5, y: 5 });

        snake.set_pending_direction(Direction::Up);
        snake.set_pending_direction(Direction::Down);
        snake.apply_pending_direction();

        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn pending_direction_is_applied_once() {
        let mut snake = Snake::new(Position { x: 5, y: 5 });

        snake.set_pending_direction(Direction::Up);
        snake.apply_pending_direction();
        snake.apply_pending_direction();

        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn self_collision_detects_head_on_body() {
        let snake = Snake::from_segments(
            vec![
                Position { x: 1, y: 0 },
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
            ],
            Direction::Right,
            Position::center_of(BOUNDS),
        );
        assert!(snake.self_collision());

        let straight = Snake::from_segments(
            vec![Position { x: 2, y: 0 }, Position { x: 1, y: 0 }],
            Direction::Right,
            Position::center_of(BOUNDS),
        );
        assert!(!straight.self_collision());
    }

    #[test]
    fn reset_restores_initial_state() {
        let center = Position::center_of(BOUNDS);
        let mut snake = Snake::from_segments(
            vec![Position { x: 2, y: 2 }, Position { x: 2, y: 3 }],
            Direction::Up,
            center,
        );
        snake.grow_one();
        snake.set_pending_direction(Direction::Left);

        snake.reset();

        assert_eq!(cells(&snake), vec![center]);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.target_length(), 1);
    }
}
