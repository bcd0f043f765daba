//! Dihedral symmetry expansion for training-data augmentation.
//!
//! The square board has 8 symmetries (4 rotations x optional x-flip).
//! Each transform is applied identically to the board's spatial axes
//! and to the policy vector viewed as a `(y, x, direction)` tensor.
//! Rotation additionally cycles the direction axis by the same number
//! of quarter turns, and the x-flip swaps the `Right`/`Left` entries,
//! so "which way the ball rolls" stays aligned with the transformed
//! geometry.

use smallvec::SmallVec;

use crate::core::{Board, Direction};

use super::engine::GameEngine;

/// Number of symmetries of the square.
pub const SYMMETRY_COUNT: usize = 8;

/// One `(board, policy)` training pair.
pub type PolicyPair = (Board, Vec<f32>);

/// Rotate every plane a quarter turn counter-clockwise:
/// `new[p][y][x] = old[p][x][n-1-y]`.
#[must_use]
pub fn rotate_board(board: &Board) -> Board {
    let n = board.board_length();
    let mut rotated = board.clone();
    for plane in 0..board.plane_count() {
        for y in 0..n {
            for x in 0..n {
                rotated.set(plane, y, x, board.get(plane, x, n - 1 - y));
            }
        }
    }
    rotated
}

/// Mirror every plane across the y axis: `new[p][y][x] = old[p][y][n-1-x]`.
#[must_use]
pub fn flip_board(board: &Board) -> Board {
    let n = board.board_length();
    let mut flipped = board.clone();
    for plane in 0..board.plane_count() {
        for y in 0..n {
            for x in 0..n {
                flipped.set(plane, y, x, board.get(plane, y, n - 1 - x));
            }
        }
    }
    flipped
}

#[inline]
fn policy_index(y: usize, x: usize, direction: Direction, n: usize) -> usize {
    (y * n + x) * Direction::COUNT + direction.index()
}

/// Rotate a policy a quarter turn counter-clockwise.
///
/// The spatial grid rotates like a board plane; each cell's direction
/// entries shift one step so that, e.g., mass on `Right` lands on the
/// direction that points right in the rotated geometry.
#[must_use]
pub fn rotate_policy(pi: &[f32], board_length: usize) -> Vec<f32> {
    let n = board_length;
    debug_assert_eq!(pi.len(), n * n * Direction::COUNT);
    let mut rotated = vec![0.0; pi.len()];
    for y in 0..n {
        for x in 0..n {
            for direction in Direction::ALL {
                rotated[policy_index(y, x, direction, n)] =
                    pi[policy_index(x, n - 1 - y, direction.rotated(1), n)];
            }
        }
    }
    rotated
}

/// Mirror a policy across the y axis, swapping `Right` and `Left`
/// entries per cell (`Down`/`Up` adjacency is unaffected by an x-flip).
#[must_use]
pub fn flip_policy(pi: &[f32], board_length: usize) -> Vec<f32> {
    let n = board_length;
    debug_assert_eq!(pi.len(), n * n * Direction::COUNT);
    let mut flipped = vec![0.0; pi.len()];
    for y in 0..n {
        for x in 0..n {
            for direction in Direction::ALL {
                flipped[policy_index(y, x, direction, n)] =
                    pi[policy_index(y, n - 1 - x, direction.mirrored_x(), n)];
            }
        }
    }
    flipped
}

impl GameEngine {
    /// All 8 symmetric `(board, policy)` pairs.
    ///
    /// Enumeration order is rotation 0..3, each followed by its x-flip,
    /// starting from the identity. Every output is an independent copy.
    ///
    /// # Panics
    ///
    /// Panics if `pi` does not match the engine's action space.
    #[must_use]
    pub fn symmetries(&self, board: &Board, pi: &[f32]) -> SmallVec<[PolicyPair; SYMMETRY_COUNT]> {
        assert_eq!(
            pi.len(),
            self.config().action_size(),
            "policy length must match the action space"
        );
        let length = self.config().board_length();
        let mut pairs = SmallVec::new();

        let mut sym_board = board.clone();
        let mut sym_pi = pi.to_vec();
        for rotation in 0..4 {
            if rotation > 0 {
                sym_board = rotate_board(&sym_board);
                sym_pi = rotate_policy(&sym_pi, length);
            }
            pairs.push((sym_board.clone(), sym_pi.clone()));
            pairs.push((flip_board(&sym_board), flip_policy(&sym_pi, length)));
        }
        pairs
    }
}
