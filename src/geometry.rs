use crate::{Coords, GridInt};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Indexed by orientation, so `ALL[d.orientation()] == d`.
    pub const ALL: [Direction; 4] = [Right, Down, Left, Up];

    pub fn delta(self) -> Coords {
        match self {
            Right => (1, 0),
            Down => (0, 1),
            Left => (-1, 0),
            Up => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Right => Left,
            Down => Up,
            Left => Right,
            Up => Down,
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Quarter turns clockwise from `Right` (screen coordinates, y grows downwards).
    pub fn orientation(self) -> u8 {
        match self {
            Right => 0,
            Down => 1,
            Left => 2,
            Up => 3,
        }
    }

    pub fn from_orientation(index: u8) -> Direction {
        Self::ALL[(index % 4) as usize]
    }
}

/// Brings a coordinate that left the board by at most one full width back onto it.
pub fn wrap(coord: GridInt, grid: GridInt) -> GridInt {
    if coord < 0 {
        coord + grid
    } else if coord >= grid {
        coord - grid
    } else {
        coord
    }
}

pub fn step(pos: Coords, dir: Direction, grid: GridInt) -> Coords {
    let (dx, dy) = dir.delta();
    (wrap(pos.0 + dx, grid), wrap(pos.1 + dy, grid))
}

pub fn in_bounds(pos: Coords, grid: GridInt) -> bool {
    (0..grid).contains(&pos.0) && (0..grid).contains(&pos.1)
}

/// Whether `b` is one wrapped step away from `a`. Both must already be on the board.
pub fn is_neighbour(a: Coords, b: Coords, grid: GridInt) -> bool {
    Direction::ALL.iter().any(|&dir| step(a, dir, grid) == b)
}

pub fn offset(from: Coords, to: Coords) -> Coords {
    (to.0 - from.0, to.1 - from.1)
}

/// Maps a unit step between neighbouring cells to its orientation index.
///
/// Differences taken across the board edge (magnitude `grid - 1`) are folded back to a unit
/// step first. Anything that is not one of the four unit vectors afterwards reports `3` (Up),
/// so callers must only pass differences between adjacent cells.
pub fn orientation_index(delta: Coords, grid: GridInt) -> u8 {
    match (fold(delta.0, grid), fold(delta.1, grid)) {
        (1, 0) => 0,
        (0, 1) => 1,
        (-1, 0) => 2,
        _ => 3,
    }
}

fn fold(component: GridInt, grid: GridInt) -> GridInt {
    if component > 1 {
        component - grid
    } else if component < -1 {
        component + grid
    } else {
        component
    }
}
