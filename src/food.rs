use log::{debug, warn};
use rand::Rng;
use thiserror::Error;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Random draws tried before falling back to a full-board scan.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// Raised when the snake covers every cell of the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum PlacementError {
    #[error("no free cell left on the {width}x{height} board")]
    BoardFull { width: u16, height: u16 },
}

/// The single apple currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at `position` without checking the snake.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Creates food on a random cell the snake does not occupy.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
    ) -> Result<Self, PlacementError> {
        spawn_position(rng, bounds, snake).map(Self::new)
    }

    /// Moves the food to a random cell the snake does not occupy.
    ///
    /// On error the previous position is kept.
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
    ) -> Result<(), PlacementError> {
        self.position = spawn_position(rng, bounds, snake)?;
        debug!("food placed at ({}, {})", self.position.x, self.position.y);
        Ok(())
    }

    /// Returns true when the head has reached the food.
    #[must_use]
    pub fn is_consumed_by(self, head: Position) -> bool {
        head == self.position
    }
}

/// Picks a uniformly random cell that is not currently occupied by the snake.
///
/// Rejection sampling is tried first; once it exceeds
/// [`MAX_PLACEMENT_ATTEMPTS`] the free cells are collected and one of them
/// is chosen, so dense boards still terminate.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Result<Position, PlacementError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(candidate) {
            return Ok(candidate);
        }
    }

    warn!(
        "food sampling missed {MAX_PLACEMENT_ATTEMPTS} times with {} of {} cells occupied, scanning board",
        snake.len(),
        bounds.total_cells()
    );

    let candidates = free_cells(bounds, snake);
    if candidates.is_empty() {
        return Err(PlacementError::BoardFull {
            width: bounds.width,
            height: bounds.height,
        });
    }

    Ok(candidates[rng.gen_range(0..candidates.len())])
}

fn free_cells(bounds: GridSize, snake: &Snake) -> Vec<Position> {
    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(snake.len()));

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    candidates
}
