//! Action encoding: one integer per `(cell, direction)` pair.
//!
//! The dense policy vector indexes actions as
//! `(y * board_length + x) * 4 + direction`, raster-scan over cells then
//! the four movement directions. [`Move`] is the decoded form used by
//! the rules.

use serde::{Deserialize, Serialize};

/// A movement direction on the board.
///
/// The discriminant is the direction's index in the action encoding and
/// in the trailing axis of the reshaped policy tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `(+1, 0)` — towards larger x.
    Right = 0,
    /// `(0, +1)` — towards larger y.
    Down = 1,
    /// `(-1, 0)` — towards smaller x.
    Left = 2,
    /// `(0, -1)` — towards smaller y.
    Up = 3,
}

impl Direction {
    /// Number of directions.
    pub const COUNT: usize = 4;

    /// All directions in action-index order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Index of this direction in the action encoding.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decode a direction index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    #[must_use]
    pub fn from_index(index: usize) -> Direction {
        assert!(index < Self::COUNT, "direction index out of range: {index}");
        Self::ALL[index]
    }

    /// `(dx, dy)` offset of one step in this direction.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }

    /// Cyclic shift by `quarter_turns` steps in index order.
    ///
    /// `symmetries` uses this to realign the policy's direction axis
    /// after rotating the board geometry.
    #[must_use]
    pub fn rotated(self, quarter_turns: usize) -> Direction {
        Self::ALL[(self.index() + quarter_turns) % Self::COUNT]
    }

    /// Mirror across the y axis: swaps `Right`/`Left`, keeps `Down`/`Up`.
    #[must_use]
    pub const fn mirrored_x(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Down,
            Direction::Up => Direction::Up,
        }
    }
}

/// A decoded action: source cell plus movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Source column.
    pub x: usize,
    /// Source row.
    pub y: usize,
    /// Movement direction.
    pub direction: Direction,
}

impl Move {
    /// Decode an action index.
    ///
    /// # Panics
    ///
    /// Panics if `action >= board_length² * 4`.
    #[must_use]
    pub fn from_index(action: usize, board_length: usize) -> Move {
        let action_size = board_length * board_length * Direction::COUNT;
        assert!(
            action < action_size,
            "action index {action} out of range (action size {action_size})"
        );
        let cell = action / Direction::COUNT;
        let direction = Direction::from_index(action % Direction::COUNT);
        Move {
            x: cell % board_length,
            y: cell / board_length,
            direction,
        }
    }

    /// Encode back to an action index.
    #[must_use]
    pub fn to_index(self, board_length: usize) -> usize {
        (self.y * board_length + self.x) * Direction::COUNT + self.direction.index()
    }

    /// Target cell, or `None` if the step leaves the board.
    #[must_use]
    pub fn target(self, board_length: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.direction.offset();
        let tx = self.x as isize + dx;
        let ty = self.y as isize + dy;
        let bound = board_length as isize;
        if tx < 0 || tx >= bound || ty < 0 || ty >= bound {
            None
        } else {
            Some((tx as usize, ty as usize))
        }
    }
}
