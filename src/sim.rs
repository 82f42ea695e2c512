use log::{debug, info, warn};

use crate::body::{Body, Segment, MIN_LENGTH};
use crate::food::{place_food, PlacementError, RandomSource};
use crate::geometry::{in_bounds, step, Direction};
use crate::shape::{refresh_neck, refresh_tail, ShapeCode};
use crate::{Coords, GridInt};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFull,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver(GameOverReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved {
        new_head: Coords,
        /// Cell given up by the tail; `None` when the snake grew.
        old_tail: Option<Coords>,
        ate_food: bool,
    },
    Crashed { at: Coords },
    BoardFull,
    /// The game was already over, nothing changed.
    Halted,
}

/// What a renderer needs after each tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub segments: Vec<Segment>,
    pub food: Option<Coords>,
    pub score: u32,
    pub alive: bool,
}

#[derive(Clone, Debug)]
pub struct SimulationState {
    grid: GridInt,
    body: Body,
    food: Option<Coords>,
    direction: Direction,
    requested: Option<Direction>,
    score: u32,
    status: Status,
}

impl SimulationState {
    /// Fresh game: a three segment body in the middle of the board heading right.
    ///
    /// Boards narrower than [`MIN_LENGTH`] cannot hold the starting body.
    pub fn new<R: RandomSource + ?Sized>(grid: GridInt, rng: &mut R) -> Result<Self, PlacementError> {
        if grid < MIN_LENGTH as GridInt {
            return Err(PlacementError::InvalidGrid { grid });
        }

        let center = (grid / 2, grid / 2);
        let body = Body::new(center, MIN_LENGTH, Direction::Right, grid);
        let food = place_food(&body, grid, rng)?;

        info!("new game on a {}x{} board, food at {:?}", grid, grid, food);
        Ok(Self::assemble(body, Direction::Right, food, grid))
    }

    /// Resumes from an explicit position, mainly for scripted scenarios.
    ///
    /// Returns `None` when a segment lies off the board, or the food lies off the board or
    /// on the body.
    pub fn from_parts(body: Body, direction: Direction, food: Coords, grid: GridInt) -> Option<Self> {
        let body_fits = body.positions().all(|pos| in_bounds(pos, grid));
        if !body_fits || !in_bounds(food, grid) || body.contains(food) {
            return None;
        }

        Some(Self::assemble(body, direction, food, grid))
    }

    fn assemble(body: Body, direction: Direction, food: Coords, grid: GridInt) -> Self {
        SimulationState {
            grid,
            body,
            food: Some(food),
            direction,
            requested: None,
            score: 0,
            status: Status::Running,
        }
    }

    pub fn grid_size(&self) -> GridInt {
        self.grid
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// `None` only once the board is full.
    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == Status::Running
    }

    /// Queues a turn for the next step. The latest request wins; a reversal of the current
    /// heading is dropped when the step resolves it.
    pub fn request_direction(&mut self, direction: Direction) {
        self.requested = Some(direction);
    }

    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> StepOutcome {
        if !self.is_alive() {
            return StepOutcome::Halted;
        }

        if let Some(dir) = self.requested.take() {
            if !dir.is_reverse_of(self.direction) {
                self.direction = dir;
            }
        }

        let new_head = step(self.body.head().pos, self.direction, self.grid);
        let ate_food = self.food == Some(new_head);

        // The tail moves out of the way this tick unless the snake grows.
        let still_present = if ate_food { self.body.len() } else { self.body.len() - 1 };
        if self.body.positions().take(still_present).any(|pos| pos == new_head) {
            info!("self collision at {:?} with score {}", new_head, self.score);
            self.status = Status::GameOver(GameOverReason::SelfCollision);
            return StepOutcome::Crashed { at: new_head };
        }

        self.body.push_head(Segment { pos: new_head, shape: ShapeCode::head(self.direction) });
        refresh_neck(&mut self.body, self.grid);

        let old_tail = if ate_food {
            self.score += 1;
            debug!("ate food at {:?}, score {}", new_head, self.score);
            None
        } else {
            self.body.pop_tail().map(|segment| segment.pos)
        };

        refresh_tail(&mut self.body, self.grid);

        if ate_food {
            match place_food(&self.body, self.grid, rng) {
                Ok(food) => self.food = Some(food),
                Err(err) => {
                    warn!("{}, ending the game with score {}", err, self.score);
                    self.food = None;
                    self.status = Status::GameOver(GameOverReason::BoardFull);
                    return StepOutcome::BoardFull;
                }
            }
        }

        StepOutcome::Moved { new_head, old_tail, ate_food }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.body.segments().iter().copied().collect(),
            food: self.food,
            score: self.score,
            alive: self.is_alive(),
        }
    }
}
