use std::collections::{HashSet, VecDeque};

use crate::geometry::{in_bounds, is_neighbour, offset, orientation_index, step, Direction};
use crate::shape::{body_shape, tail_shape, ShapeCode};
use crate::{Coords, GridInt};

pub const MIN_LENGTH: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub pos: Coords,
    pub shape: ShapeCode,
}

/// Segments in head-first order. Neighbouring segments are always one wrapped step apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Body {
    segments: VecDeque<Segment>,
}

impl Body {
    /// A straight body of `length` segments trailing behind `head`, everything moving in
    /// `direction`. Lengths below [`MIN_LENGTH`] are raised to it and lengths above `grid`
    /// are cut to one full row or column, so the body never folds onto itself.
    pub fn new(head: Coords, length: usize, direction: Direction, grid: GridInt) -> Self {
        let behind = direction.opposite();
        let length = length.max(MIN_LENGTH).min(grid.max(1) as usize);
        let mut positions = Vec::with_capacity(length);
        let mut pos = (head.0.rem_euclid(grid.max(1)), head.1.rem_euclid(grid.max(1)));

        for _ in 0..length {
            positions.push(pos);
            pos = step(pos, behind, grid);
        }

        Self::shaped(&positions, direction, grid)
    }

    /// Builds a body from explicit head-first positions, deriving every segment's shape from
    /// its neighbours.
    ///
    /// Returns `None` for fewer than [`MIN_LENGTH`] positions, cells off the board, a cell
    /// used twice, or consecutive cells that are not one wrapped step apart.
    pub fn from_positions(positions: &[Coords], direction: Direction, grid: GridInt) -> Option<Self> {
        if positions.len() < MIN_LENGTH || !positions.iter().all(|&pos| in_bounds(pos, grid)) {
            return None;
        }

        let distinct: HashSet<Coords> = positions.iter().copied().collect();
        if distinct.len() != positions.len() {
            return None;
        }

        if !positions.windows(2).all(|pair| is_neighbour(pair[0], pair[1], grid)) {
            return None;
        }

        Some(Self::shaped(positions, direction, grid))
    }

    fn shaped(positions: &[Coords], direction: Direction, grid: GridInt) -> Self {
        let last = positions.len() - 1;

        let segments = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| {
                let shape = if i == 0 {
                    ShapeCode::head(direction)
                } else if i == last {
                    tail_shape(positions[i - 1], pos, grid)
                } else {
                    let out = orientation_index(offset(pos, positions[i - 1]), grid);
                    let into = orientation_index(offset(positions[i + 1], pos), grid);
                    body_shape(out, into)
                };
                Segment { pos, shape }
            })
            .collect();

        Body { segments }
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &VecDeque<Segment> {
        &self.segments
    }

    pub fn positions(&self) -> impl Iterator<Item = Coords> + '_ {
        self.segments.iter().map(|s| s.pos)
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.segments.iter().any(|s| s.pos == pos)
    }

    pub(crate) fn push_head(&mut self, segment: Segment) {
        self.segments.push_front(segment);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Segment> {
        self.segments.pop_back()
    }

    pub(crate) fn set_shape(&mut self, index: usize, shape: ShapeCode) {
        if let Some(segment) = self.segments.get_mut(index) {
            segment.shape = shape;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::*;
    use crate::shape::ShapeClass;

    #[test]
    fn test_new_lays_body_behind_head() {
        let body = Body::new((15, 15), 3, Right, 30);
        let positions: Vec<Coords> = body.positions().collect();
        assert_eq!(positions, vec![(15, 15), (14, 15), (13, 15)]);
        assert_eq!(body.head().shape, ShapeCode::head(Right));
        assert_eq!(body.get(1).map(|s| s.shape.class()), Some(ShapeClass::Straight));
        assert_eq!(body.tail().shape.class(), ShapeClass::Tail);
        assert_eq!(body.tail().shape.rotation(), 0);
    }

    #[test]
    fn test_new_enforces_minimum_length_and_wraps() {
        let body = Body::new((0, 5), 1, Right, 30);
        let positions: Vec<Coords> = body.positions().collect();
        assert_eq!(positions, vec![(0, 5), (29, 5), (28, 5)]);
    }

    #[test]
    fn test_from_positions_derives_corners() {
        // moving up after coming in from the left
        let body = Body::from_positions(&[(5, 4), (5, 5), (4, 5)], Up, 30).unwrap();
        assert_eq!(body.get(1).map(|s| s.shape), Some(body_shape(3, 0)));
        assert_eq!(body.tail().shape, tail_shape((5, 5), (4, 5), 30));
    }

    #[test]
    fn test_from_positions_rejects_short_bodies() {
        assert!(Body::from_positions(&[(1, 1), (2, 1)], Left, 30).is_none());
    }

    #[test]
    fn test_new_never_exceeds_one_lap() {
        let body = Body::new((0, 0), 40, Right, 30);
        let distinct: HashSet<Coords> = body.positions().collect();
        assert_eq!(body.len(), 30);
        assert_eq!(distinct.len(), 30);
    }

    #[test]
    fn test_new_brings_head_onto_the_board() {
        let body = Body::new((31, -1), 3, Left, 30);
        assert_eq!(body.head().pos, (1, 29));
        assert!(body.positions().all(|pos| in_bounds(pos, 30)));
    }

    #[test]
    fn test_from_positions_rejects_cells_off_the_board() {
        assert!(Body::from_positions(&[(30, 5), (29, 5), (28, 5)], Right, 30).is_none());
        assert!(Body::from_positions(&[(2, 0), (2, -1), (2, -2)], Down, 30).is_none());
        assert!(Body::from_positions(&[(5, 5), (20, 20), (5, 5), (100, -7)], Right, 30).is_none());
    }

    #[test]
    fn test_from_positions_rejects_overlap() {
        let looped = [(5, 5), (5, 6), (6, 6), (6, 5), (5, 5)];
        assert!(Body::from_positions(&looped, Up, 30).is_none());
    }

    #[test]
    fn test_from_positions_rejects_gaps() {
        assert!(Body::from_positions(&[(5, 5), (4, 5), (2, 5)], Right, 30).is_none());
        assert!(Body::from_positions(&[(5, 5), (4, 4), (3, 4)], Right, 30).is_none());
    }

    #[test]
    fn test_from_positions_accepts_links_across_the_edge() {
        assert!(Body::from_positions(&[(0, 15), (29, 15), (28, 15)], Left, 30).is_some());
        assert!(Body::from_positions(&[(3, 29), (3, 0), (3, 1)], Down, 30).is_some());
    }

    #[test]
    fn test_push_and_pop() {
        let mut body = Body::new((10, 10), 3, Down, 30);
        body.push_head(Segment { pos: (10, 11), shape: ShapeCode::head(Down) });
        assert_eq!(body.len(), 4);
        assert_eq!(body.head().pos, (10, 11));
        assert_eq!(body.pop_tail().map(|s| s.pos), Some((10, 8)));
        assert!(body.contains((10, 9)));
        assert!(!body.contains((10, 8)));
    }
}
