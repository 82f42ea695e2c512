use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::body::Body;
use crate::{Coords, GridInt};

/// Source of uniform indices for food placement.
pub trait RandomSource {
    /// Uniform value in `0..bound`; `bound` is never zero.
    fn pick(&mut self, bound: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn pick(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no free cell left on the {grid}x{grid} board")]
    BoardFull { grid: GridInt },
    #[error("a board of side {grid} cannot hold a snake")]
    InvalidGrid { grid: GridInt },
}

/// Picks a cell the body does not occupy.
///
/// One blind draw first; if it lands on the body, every free cell is collected and one of
/// them is drawn instead, so dense boards never loop.
pub fn place_food<S: RandomSource + ?Sized>(
    body: &Body,
    grid: GridInt,
    rng: &mut S,
) -> Result<Coords, PlacementError> {
    if grid <= 0 {
        return Err(PlacementError::InvalidGrid { grid });
    }

    let side = grid as usize;
    let candidate = (rng.pick(side) as GridInt, rng.pick(side) as GridInt);

    if !body.contains(candidate) {
        return Ok(candidate);
    }

    let free: Vec<Coords> = all_cells(grid).filter(|&cell| !body.contains(cell)).collect();
    debug!("food draw {:?} hit the body, {} free cells left", candidate, free.len());

    if free.is_empty() {
        return Err(PlacementError::BoardFull { grid });
    }

    Ok(free[rng.pick(free.len())])
}

fn all_cells(grid: GridInt) -> impl Iterator<Item = Coords> {
    (0..grid).flat_map(move |y| (0..grid).map(move |x| (x, y)))
}
