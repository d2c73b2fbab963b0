use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GridSize;
use crate::food::{Food, PlacementError};
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// What happened to the snake during one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickEvent {
    /// Plain move, length unchanged.
    Moved,
    /// Head reached the food; the growth target went up by one.
    Ate,
    /// Head ran into the body; the snake respawned at the center.
    Collided,
    /// The snake ate the last free cell and respawned at the center.
    BoardFilled,
}

impl TickEvent {
    /// Returns true when the snake was re-seeded and the board needs a full redraw.
    #[must_use]
    pub fn is_restart(self) -> bool {
        matches!(self, Self::Collided | Self::BoardFilled)
    }
}

/// Outcome of one tick, handed to the renderer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickReport {
    pub event: TickEvent,
    /// Tail cell dropped by this move, for incremental redraws.
    pub vacated: Option<Position>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub tick_count: u64,
    pub restarts: u32,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from system entropy.
    pub fn new(bounds: GridSize) -> Result<Self, PlacementError> {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Result<Self, PlacementError> {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Result<Self, PlacementError> {
        let snake = Snake::new(Position::center_of(bounds));
        let food = Food::spawn(&mut rng, bounds, &snake)?;

        Ok(Self {
            snake,
            food,
            tick_count: 0,
            restarts: 0,
            bounds,
            rng,
        })
    }

    /// Buffers a heading change; it takes effect on the next tick.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.snake.set_pending_direction(direction);
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Food is checked before self-collision, so a move onto the food never
    /// counts as a crash.
    pub fn tick(&mut self) -> TickReport {
        self.tick_count += 1;
        self.snake.apply_pending_direction();
        let vacated = self.snake.advance(self.bounds);

        let head = self.snake.head();
        let event = if self.food.is_consumed_by(head) {
            self.snake.grow_one();
            match self.food.place(&mut self.rng, self.bounds, &self.snake) {
                Ok(()) => TickEvent::Ate,
                Err(error) => {
                    info!("{error} at length {}, restarting", self.snake.len());
                    self.restart();
                    TickEvent::BoardFilled
                }
            }
        } else if self.snake.self_collision() {
            info!(
                "snake hit itself at ({}, {}) with length {}, restarting",
                head.x,
                head.y,
                self.snake.len()
            );
            self.restart();
            TickEvent::Collided
        } else {
            TickEvent::Moved
        };

        TickReport { event, vacated }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    fn restart(&mut self) {
        self.restarts += 1;
        self.snake.reset();

        // A one-cell snake always leaves a free cell on a validated board.
        if let Err(error) = self.food.place(&mut self.rng, self.bounds, &self.snake) {
            error!("could not place food after restart: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::food::Food;
    use crate::input::Direction;

    use super::{GameState, TickEvent};
    use crate::snake::{Position, Snake};

    const BOUNDS: GridSize = GridSize {
        width: 32,
        height: 24,
    };

    fn state(seed: u64) -> GameState {
        GameState::new_with_seed(BOUNDS, seed).expect("board has room for food")
    }

    fn cells(state: &GameState) -> Vec<Position> {
        state.snake.segments().copied().collect()
    }

    #[test]
    fn new_state_places_food_off_the_snake() {
        let state = state(1);

        assert_eq!(cells(&state), vec![Position { x: 16, y: 12 }]);
        assert!(!state.snake.occupies(state.food.position));
        assert!(state.food.position.is_within_bounds(BOUNDS));
    }

    #[test]
    fn single_cell_board_cannot_host_food() {
        let bounds = GridSize {
            width: 1,
            height: 1,
        };

        assert!(GameState::new_with_seed(bounds, 1).is_err());
    }

    #[test]
    fn eating_food_raises_target_and_moves_food() {
        let mut state = state(2);
        state.snake = Snake::new(Position { x: 10, y: 10 });
        state.food = Food::new(Position { x: 11, y: 10 });

        let report = state.tick();

        assert_eq!(report.event, TickEvent::Ate);
        assert_eq!(report.vacated, Some(Position { x: 10, y: 10 }));
        assert_eq!(cells(&state), vec![Position { x: 11, y: 10 }]);
        assert_eq!(state.snake.target_length(), 2);
        assert_ne!(state.food.position, Position { x: 11, y: 10 });
        assert!(!state.snake.occupies(state.food.position));
    }

    #[test]
    fn body_grows_on_the_tick_after_eating() {
        let mut state = state(3);
        state.snake = Snake::new(Position { x: 1, y: 1 });
        state.food = Food::new(Position { x: 2, y: 1 });

        state.tick();
        assert_eq!(state.snake.len(), 1);

        state.food = Food::new(Position { x: 0, y: 0 });
        let report = state.tick();

        assert_eq!(report.event, TickEvent::Moved);
        assert_eq!(report.vacated, None);
        assert_eq!(
            cells(&state),
            vec![Position { x: 3, y: 1 }, Position { x: 2, y: 1 }]
        );
    }

    #[test]
    fn plain_move_keeps_length_and_vacates_tail() {
        let mut state = state(4);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
                Position { x: 3, y: 5 },
            ],
            Direction::Right,
            Position::center_of(BOUNDS),
        );
        state.food = Food::new(Position { x: 20, y: 20 });

        let report = state.tick();

        assert_eq!(report.event, TickEvent::Moved);
        assert_eq!(report.vacated, Some(Position { x: 3, y: 5 }));
        assert_eq!(
            cells(&state),
            vec![
                Position { x: 6, y: 5 },
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
            ]
        );
    }

    #[test]
    fn self_collision_resets_snake_to_center() {
        let mut state = state(5);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 2, y: 0 },
                Position { x: 3, y: 0 },
            ],
            Direction::Right,
            Position::center_of(BOUNDS),
        );
        state.food = Food::new(Position { x: 20, y: 20 });

        let report = state.tick();

        assert_eq!(report.event, TickEvent::Collided);
        assert_eq!(cells(&state), vec![Position { x: 16, y: 12 }]);
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.snake.pending_direction(), None);
        assert_eq!(state.snake.target_length(), 1);
        assert_eq!(state.restarts, 1);
        assert!(!state.snake.occupies(state.food.position));
    }

    #[test]
    fn food_is_checked_before_collision() {
        let mut state = state(6);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 2, y: 0 },
                Position { x: 3, y: 0 },
            ],
            Direction::Right,
            Position::center_of(BOUNDS),
        );
        state.food = Food::new(Position { x: 1, y: 0 });

        let report = state.tick();

        assert_eq!(report.event, TickEvent::Ate);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.restarts, 0);
    }

    #[test]
    fn reversal_request_is_ignored_by_tick() {
        let mut state = state(7);
        state.snake = Snake::new(Position { x: 5, y: 5 });
        state.food = Food::new(Position { x: 20, y: 20 });

        state.set_pending_direction(Direction::Left);
        state.tick();

        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.snake.head(), Position { x: 6, y: 5 });
    }

    #[test]
    fn filling_the_board_restarts_the_snake() {
        let bounds = GridSize {
            width: 3,
            height: 1,
        };
        let mut state = GameState::new_with_seed(bounds, 8).expect("board has room for food");
        state.snake = Snake::from_segments(
            vec![Position { x: 1, y: 0 }, Position { x: 0, y: 0 }],
            Direction::Right,
            Position { x: 1, y: 0 },
        );
        state.snake.grow_one();
        state.food = Food::new(Position { x: 2, y: 0 });

        let report = state.tick();

        assert_eq!(report.event, TickEvent::BoardFilled);
        assert_eq!(cells(&state), vec![Position { x: 1, y: 0 }]);
        assert_ne!(state.food.position, Position { x: 1, y: 0 });
        assert_eq!(state.restarts, 1);
    }

    #[test]
    fn same_seed_replays_same_food() {
        let mut left = state(42);
        let mut right = state(42);

        for _ in 0..200 {
            left.tick();
            right.tick();
            assert_eq!(left.food, right.food);
            assert_eq!(cells(&left), cells(&right));
        }
    }
}
