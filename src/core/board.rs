//! Board tensor: binary planes for each player's tiers plus snow cover.
//!
//! A `Board` is a dense 0/1 tensor of shape
//! `(2 * layer_count + 1, board_length, board_length)` that carries its
//! own dimensions, so downstream consumers never need the originating
//! configuration to index it. Boards are plain values: the engine hands
//! out copies and never retains one.

use serde::{Deserialize, Serialize};

use super::config::GameConfig;

/// Glyphs for the mover-relative player's loose balls, by tier.
const PLAYER_TIER_GLYPHS: [char; 4] = ['o', 'C', 'O', 'D'];
/// Glyphs for the opponent's loose balls, by tier.
const OPPONENT_TIER_GLYPHS: [char; 4] = ['x', 'Y', 'X', 'K'];
/// Glyphs for the player's stacked balls (a higher tier is present).
const PLAYER_STACK_GLYPHS: [char; 3] = ['8', 'S', '3'];
/// Glyphs for the opponent's stacked balls.
const OPPONENT_STACK_GLYPHS: [char; 3] = ['Z', '7', '/'];

/// Game board as a flat plane-major tensor of 0/1 cells.
///
/// Plane semantics (see [`GameConfig`]): the leading `layer_count`
/// planes are the mover-relative player's tiers, the next `layer_count`
/// the opponent's, and the last plane is the snow-coverage mask.
///
/// Per cell and player, the occupied tiers are either empty, a single
/// tier (a loose ball), or a contiguous run ending at the top tier.
/// Snow and balls are mutually exclusive at a cell, and the two players
/// never share a cell. [`crate::rules::GameEngine`] preserves these
/// invariants; fixtures built by hand through [`Board::set`] are
/// responsible for them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    data: Vec<u8>,
    board_length: usize,
    layer_count: usize,
}

impl Board {
    /// Create an all-zero board (no snow, no balls).
    ///
    /// Gameplay starts from `GameEngine::init_board`, which also raises
    /// the snow mask; the zero board exists for building fixtures.
    #[must_use]
    pub fn empty(config: &GameConfig) -> Self {
        let (planes, rows, cols) = config.board_shape();
        Self {
            data: vec![0; planes * rows * cols],
            board_length: config.board_length(),
            layer_count: config.layer_count(),
        }
    }

    /// Board side length.
    #[must_use]
    pub const fn board_length(&self) -> usize {
        self.board_length
    }

    /// Number of tiers per player.
    #[must_use]
    pub const fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Total number of planes.
    #[must_use]
    pub const fn plane_count(&self) -> usize {
        2 * self.layer_count + 1
    }

    /// Index of the snow plane.
    #[must_use]
    pub const fn snow_plane(&self) -> usize {
        2 * self.layer_count
    }

    #[inline]
    fn index(&self, plane: usize, y: usize, x: usize) -> usize {
        debug_assert!(plane < self.plane_count(), "plane out of range: {plane}");
        debug_assert!(y < self.board_length, "row out of range: {y}");
        debug_assert!(x < self.board_length, "column out of range: {x}");
        (plane * self.board_length + y) * self.board_length + x
    }

    /// Read one cell of one plane.
    #[inline]
    #[must_use]
    pub fn get(&self, plane: usize, y: usize, x: usize) -> bool {
        self.data[self.index(plane, y, x)] != 0
    }

    /// Write one cell of one plane.
    #[inline]
    pub fn set(&mut self, plane: usize, y: usize, x: usize, value: bool) {
        let index = self.index(plane, y, x);
        self.data[index] = u8::from(value);
    }

    /// Is the cell still covered in undisturbed snow?
    #[inline]
    #[must_use]
    pub fn is_snow(&self, y: usize, x: usize) -> bool {
        self.get(self.snow_plane(), y, x)
    }

    /// Raw tensor data in plane-major order (read-only).
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Stable byte-exact serialization of the board.
    ///
    /// Two boards compare equal exactly when their keys are equal, which
    /// is what search-side transposition tables and evaluation caches
    /// key on. In-process use only; no cross-version stability.
    #[must_use]
    pub fn key(&self) -> Vec<u8> {
        bincode::serialize(self).expect("board serialization is infallible")
    }
}

/// Renders the board with one glyph per cell.
///
/// `*` is snow, lowercase-family glyphs are the mover-relative player,
/// x-family glyphs the opponent; stacked balls switch to the snowman
/// glyph of their highest hidden tier. A development aid, not a stable
/// format.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.board_length;

        write!(f, "   ")?;
        for x in 0..length {
            write!(f, " {}", x + 1)?;
        }
        writeln!(f)?;
        write!(f, "   ")?;
        for _ in 0..length {
            write!(f, " -")?;
        }
        writeln!(f)?;

        for y in 0..length {
            let row = char::from(b'A' + y as u8);
            write!(f, "{row} |")?;
            for x in 0..length {
                write!(f, " {}", self.cell_glyph(y, x))?;
            }
            writeln!(f, " |")?;
        }

        write!(f, "   ")?;
        for _ in 0..length {
            write!(f, " -")?;
        }
        writeln!(f)
    }
}

impl Board {
    fn cell_glyph(&self, y: usize, x: usize) -> char {
        if self.is_snow(y, x) {
            return '*';
        }
        let mut glyph = None;
        for (base, tier_glyphs, stack_glyphs) in [
            (0, PLAYER_TIER_GLYPHS, PLAYER_STACK_GLYPHS),
            (self.layer_count, OPPONENT_TIER_GLYPHS, OPPONENT_STACK_GLYPHS),
        ] {
            for tier in (0..self.layer_count).rev() {
                if self.get(base + tier, y, x) {
                    glyph = Some(match glyph {
                        None => tier_glyphs[tier],
                        Some(_) => stack_glyphs[tier],
                    });
                }
            }
        }
        glyph.unwrap_or(' ')
    }
}
