use crate::body::Body;
use crate::geometry::{offset, orientation_index, Direction};
use crate::{Coords, GridInt};
use ShapeClass::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeClass {
    Straight,
    TurnRight,
    TurnLeft,
    Tail,
    Head,
}

impl ShapeClass {
    fn index(self) -> u8 {
        match self {
            Straight => 0,
            TurnRight => 1,
            TurnLeft => 2,
            Tail => 3,
            Head => 4,
        }
    }
}

/// Packed `class * 4 + rotation`, so heads are 16..=19 and tails 12..=15.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapeCode(u8);

impl ShapeCode {
    pub fn new(class: ShapeClass, rotation: u8) -> Self {
        ShapeCode(class.index() * 4 + rotation % 4)
    }

    pub fn head(direction: Direction) -> Self {
        Self::new(Head, direction.orientation())
    }

    pub fn from_raw(raw: u8) -> Option<Self> {
        if raw < 20 {
            Some(ShapeCode(raw))
        } else {
            None
        }
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    pub fn class(self) -> ShapeClass {
        match self.0 / 4 {
            0 => Straight,
            1 => TurnRight,
            2 => TurnLeft,
            3 => Tail,
            _ => Head,
        }
    }

    pub fn rotation(self) -> u8 {
        self.0 % 4
    }
}

/// Shape of a segment entered heading `tail_orient` and left heading `head_orient`.
pub fn body_shape(head_orient: u8, tail_orient: u8) -> ShapeCode {
    let head_orient = head_orient % 4;
    let tail_orient = tail_orient % 4;

    if head_orient == tail_orient {
        return ShapeCode::new(Straight, tail_orient);
    }

    let rotation = (tail_orient + 1) % 4;
    if (head_orient + 4 - tail_orient) % 4 == 3 {
        ShapeCode::new(TurnLeft, rotation)
    } else {
        ShapeCode::new(TurnRight, rotation)
    }
}

/// Tail rotation follows the direction of travel from the tail into the segment before it.
pub fn tail_shape(before_tail: Coords, tail: Coords, grid: GridInt) -> ShapeCode {
    ShapeCode::new(Tail, orientation_index(offset(tail, before_tail), grid))
}

/// Re-derives the shape of the segment right behind a freshly pushed head.
///
/// Needs at least three segments. Interior segments further back keep their shape.
pub fn refresh_neck(body: &mut Body, grid: GridInt) {
    let (head, neck, next) = match (body.get(0), body.get(1), body.get(2)) {
        (Some(h), Some(n), Some(x)) => (*h, *n, *x),
        _ => return,
    };

    let head_orient = head.shape.rotation();
    let tail_orient = orientation_index(offset(next.pos, neck.pos), grid);
    body.set_shape(1, body_shape(head_orient, tail_orient));
}

pub fn refresh_tail(body: &mut Body, grid: GridInt) {
    let len = body.len();
    if len < 2 {
        return;
    }

    let before = body.segments()[len - 2].pos;
    let tail = body.segments()[len - 1].pos;
    body.set_shape(len - 1, tail_shape(before, tail, grid));
}

///////////////////////////////////////////////////////////////////////////////

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpriteFrame {
    Straight,
    Corner,
    Tail,
    Head,
}

/// What a renderer draws for one segment: a sprite-sheet frame turned clockwise by
/// `rotation_degrees`, mirrored first when `flip_horizontal` is set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub frame: SpriteFrame,
    pub rotation_degrees: u16,
    pub flip_horizontal: bool,
}

impl From<ShapeCode> for Sprite {
    fn from(code: ShapeCode) -> Self {
        let frame = match code.class() {
            Straight => SpriteFrame::Straight,
            TurnRight | TurnLeft => SpriteFrame::Corner,
            Tail => SpriteFrame::Tail,
            Head => SpriteFrame::Head,
        };

        Sprite {
            frame,
            rotation_degrees: 90 * code.rotation() as u16,
            flip_horizontal: code.class() == TurnLeft,
        }
    }
}

impl Sprite {
    /// Pixel origin of a cell on a board of `tile`-sized squares.
    pub fn tile_origin(pos: Coords, tile: u32) -> (u32, u32) {
        (tile * pos.0 as u32, tile * pos.1 as u32)
    }

    /// Sides of the cell this sprite's drawn body touches.
    ///
    /// Unrotated frames: straight runs left to right, the corner joins the bottom and right
    /// edges, the tail reaches right and the head reaches back to the left.
    pub fn connections(&self) -> Vec<Direction> {
        let base: &[Direction] = match self.frame {
            SpriteFrame::Straight => &[Direction::Right, Direction::Left],
            SpriteFrame::Corner => &[Direction::Down, Direction::Right],
            SpriteFrame::Tail => &[Direction::Right],
            SpriteFrame::Head => &[Direction::Left],
        };
        let quarter_turns = (self.rotation_degrees / 90) as u8;

        base.iter()
            .map(|side| match (self.flip_horizontal, side) {
                (true, Direction::Right) => Direction::Left,
                (true, Direction::Left) => Direction::Right,
                (_, side) => *side,
            })
            .map(|side| Direction::from_orientation(side.orientation() + quarter_turns))
            .collect()
    }
}
