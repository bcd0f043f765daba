//! Game configuration: board geometry and snowman height.
//!
//! A single `GameConfig` replaces the per-size rule tables of earlier
//! prototypes: every plane offset and action index is computed from
//! `(board_length, layer_count)` instead of being hard-coded.

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::player::Player;

/// Minimum board side length.
pub const BOARD_LENGTH_MIN: usize = 3;
/// Default board side length.
pub const BOARD_LENGTH_DEF: usize = 6;
/// Minimum number of stacked tiers in a completed snowman.
pub const LAYER_COUNT_MIN: usize = 2;
/// Maximum number of stacked tiers in a completed snowman.
pub const LAYER_COUNT_MAX: usize = 4;
/// Default number of stacked tiers.
pub const LAYER_COUNT_DEF: usize = 3;

/// Immutable game configuration.
///
/// Fixes the board side length and the number of tiers a completed
/// snowman requires. All tensor shapes and the action space are derived
/// from these two values.
///
/// ## Board tensor layout
///
/// `(2 * layer_count + 1, board_length, board_length)`:
/// - planes `0..layer_count`: the mover-relative player's tiers
///   (tier 0 placed first, tier `layer_count - 1` completes a snowman)
/// - planes `layer_count..2 * layer_count`: the opponent's tiers
/// - last plane: snow-coverage mask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    board_length: usize,
    layer_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(BOARD_LENGTH_DEF, LAYER_COUNT_DEF)
    }
}

impl GameConfig {
    /// Create a configuration.
    ///
    /// # Panics
    ///
    /// Panics if `board_length < 3` or `layer_count` is outside `2..=4`.
    /// Bad configuration is a construction-time bug, not a runtime
    /// condition, so the engine is never built from it.
    #[must_use]
    pub fn new(board_length: usize, layer_count: usize) -> Self {
        assert!(
            board_length >= BOARD_LENGTH_MIN,
            "board_length must be at least {BOARD_LENGTH_MIN}, got {board_length}"
        );
        assert!(
            (LAYER_COUNT_MIN..=LAYER_COUNT_MAX).contains(&layer_count),
            "layer_count must be in {LAYER_COUNT_MIN}..={LAYER_COUNT_MAX}, got {layer_count}"
        );
        Self {
            board_length,
            layer_count,
        }
    }

    /// Board side length.
    #[must_use]
    pub const fn board_length(&self) -> usize {
        self.board_length
    }

    /// Number of tiers in a completed snowman.
    #[must_use]
    pub const fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Index of the topmost tier (`layer_count - 1`).
    ///
    /// A ball on this tier is anchored and never moves again.
    #[must_use]
    pub const fn top_tier(&self) -> usize {
        self.layer_count - 1
    }

    /// Total number of board planes: one per tier per player, plus snow.
    #[must_use]
    pub const fn plane_count(&self) -> usize {
        2 * self.layer_count + 1
    }

    /// Index of the snow-coverage plane (always the last plane).
    #[must_use]
    pub const fn snow_plane(&self) -> usize {
        2 * self.layer_count
    }

    /// First tier plane of a player's block.
    #[must_use]
    pub const fn plane_base(&self, player: Player) -> usize {
        match player {
            Player::First => 0,
            Player::Second => self.layer_count,
        }
    }

    /// Number of cells on the board.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.board_length * self.board_length
    }

    /// Board tensor shape as `(planes, rows, columns)`.
    #[must_use]
    pub const fn board_shape(&self) -> (usize, usize, usize) {
        (self.plane_count(), self.board_length, self.board_length)
    }

    /// Total number of actions: one per `(cell, direction)` pair.
    #[must_use]
    pub const fn action_size(&self) -> usize {
        self.cell_count() * Direction::COUNT
    }

    /// Policy tensor shape as `(rows, columns, directions)`.
    #[must_use]
    pub const fn action_shape(&self) -> (usize, usize, usize) {
        (self.board_length, self.board_length, Direction::COUNT)
    }
}
