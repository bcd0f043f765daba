//! Game rules: legality, state transition, terminal detection.
//!
//! The engine is stateless apart from its immutable [`GameConfig`]:
//! every method takes a caller-owned [`Board`]. `next_state` is the only
//! public state-advancing entry point; it deep-copies before mutating,
//! so no caller-visible board is ever aliased across successive states.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Direction, GameConfig, Move, Player};

/// Result of scanning a cell for a movable ball.
///
/// Only the non-top tiers `0..layer_count-1` are scanned: a ball on the
/// top tier is anchored and never moves again. Used by both legality
/// and execution so the two can never disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierScan {
    /// No occupied non-top tier (virgin cell, or only the anchored top).
    None,
    /// Exactly one occupied non-top tier: a loose, movable ball.
    Unique(usize),
    /// More than one occupied non-top tier: an immobile partial stack.
    Ambiguous,
}

/// Terminal status of a board from the side to move's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The side to move still has at least one legal move.
    InProgress,
    /// The side to move has a completed snowman.
    Win,
    /// The opponent has a completed snowman.
    Loss,
    /// Neither side has a snowman and the side to move cannot move.
    Draw,
}

impl GameOutcome {
    /// Scalar value a draw maps to, kept distinct from both win values
    /// so value targets can tell a draw from an unfinished game.
    pub const DRAW_VALUE: f32 = 1e-4;

    /// Has the game ended?
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// The same outcome seen from the other player.
    #[must_use]
    pub const fn flipped(self) -> GameOutcome {
        match self {
            GameOutcome::Win => GameOutcome::Loss,
            GameOutcome::Loss => GameOutcome::Win,
            other => other,
        }
    }

    /// Scalar training value: `0` in progress, `±1` win/loss,
    /// [`Self::DRAW_VALUE`] for a draw.
    #[must_use]
    pub const fn value(self) -> f32 {
        match self {
            GameOutcome::InProgress => 0.0,
            GameOutcome::Win => 1.0,
            GameOutcome::Loss => -1.0,
            GameOutcome::Draw => Self::DRAW_VALUE,
        }
    }
}

/// The snowman game engine.
///
/// Owns the board-shape configuration and implements move enumeration,
/// execution, terminal detection and player canonicalization. Purely
/// synchronous and safe to share across threads; boards themselves must
/// not be mutated concurrently.
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
}

impl GameEngine {
    /// Create an engine for the given configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh starting board: fully snow-covered, no balls.
    #[must_use]
    pub fn init_board(&self) -> Board {
        let mut board = Board::empty(&self.config);
        let snow = self.config.snow_plane();
        for y in 0..self.config.board_length() {
            for x in 0..self.config.board_length() {
                board.set(snow, y, x, true);
            }
        }
        board
    }

    fn check_board(&self, board: &Board) {
        debug_assert_eq!(
            (board.board_length(), board.layer_count()),
            (self.config.board_length(), self.config.layer_count()),
            "board shape does not match engine configuration"
        );
    }

    /// Scan a cell for a movable ball of `player`.
    #[must_use]
    pub fn tier_scan(&self, board: &Board, player: Player, y: usize, x: usize) -> TierScan {
        let base = self.config.plane_base(player);
        let mut found = TierScan::None;
        for tier in 0..self.config.top_tier() {
            if board.get(base + tier, y, x) {
                found = match found {
                    TierScan::None => TierScan::Unique(tier),
                    _ => return TierScan::Ambiguous,
                };
            }
        }
        found
    }

    /// Is this `(cell, direction)` move legal for `player`?
    fn is_legal(&self, board: &Board, player: Player, mv: Move) -> bool {
        let Some((tx, ty)) = mv.target(self.config.board_length()) else {
            return false;
        };

        if board.is_snow(mv.y, mv.x) {
            // Virgin cells only roll snow onto adjacent snow.
            return board.is_snow(ty, tx);
        }

        let TierScan::Unique(tier) = self.tier_scan(board, player, mv.y, mv.x) else {
            return false;
        };

        if board.is_snow(ty, tx) {
            // Snow excludes balls, so the grown ball's slot is free.
            return true;
        }

        // Bare target: the ball may only slot into an own stack whose
        // single gap is exactly this tier. Opponent-held cells never
        // match the own-plane pattern, so they fall out here.
        let base = self.config.plane_base(player);
        if board.get(base + tier, ty, tx) {
            return false;
        }
        (tier + 1..self.config.layer_count()).all(|t| board.get(base + t, ty, tx))
    }

    /// Dense legality mask over the whole action space.
    ///
    /// One 0/1 entry per action, raster-scan over cells then the four
    /// directions, matching the policy vector layout.
    #[must_use]
    pub fn valid_moves(&self, board: &Board, player: Player) -> Vec<u8> {
        self.check_board(board);
        let length = self.config.board_length();
        let mut valids = vec![0u8; self.config.action_size()];
        for y in 0..length {
            for x in 0..length {
                for direction in Direction::ALL {
                    let mv = Move { x, y, direction };
                    if self.is_legal(board, player, mv) {
                        valids[mv.to_index(length)] = 1;
                    }
                }
            }
        }
        valids
    }

    /// Does `player` have at least one legal move?
    ///
    /// Short-circuits on the first match; the fast path for terminal
    /// checks.
    #[must_use]
    pub fn has_valid_moves(&self, board: &Board, player: Player) -> bool {
        self.check_board(board);
        let length = self.config.board_length();
        for y in 0..length {
            for x in 0..length {
                for direction in Direction::ALL {
                    if self.is_legal(board, player, Move { x, y, direction }) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Apply an action in place.
    ///
    /// Internal by design: external callers advance state through
    /// [`Self::next_state`], which operates on an exclusively-held copy.
    ///
    /// # Panics
    ///
    /// Panics if the action index is out of range or the decoded move
    /// violates the board's structural invariants. Both indicate a
    /// caller bug - a correct driver only submits actions reported
    /// legal by [`Self::valid_moves`].
    pub(crate) fn execute_action(&self, board: &mut Board, player: Player, action: usize) {
        self.check_board(board);
        let length = self.config.board_length();
        let mv = Move::from_index(action, length);
        let (tx, ty) = mv
            .target(length)
            .unwrap_or_else(|| panic!("action {action} steps off the board"));

        let snow = self.config.snow_plane();
        let base = self.config.plane_base(player);

        if board.is_snow(mv.y, mv.x) {
            assert!(
                board.is_snow(ty, tx),
                "snow roll requires snow at the target cell"
            );
            board.set(snow, mv.y, mv.x, false);
            board.set(snow, ty, tx, false);
            board.set(base, ty, tx, true);
            return;
        }

        let tier = match self.tier_scan(board, player, mv.y, mv.x) {
            TierScan::Unique(tier) => tier,
            other => panic!("source cell holds no movable ball: {other:?}"),
        };
        board.set(base + tier, mv.y, mv.x, false);

        if board.is_snow(ty, tx) {
            board.set(snow, ty, tx, false);
            debug_assert!(!board.get(base + tier + 1, ty, tx));
            board.set(base + tier + 1, ty, tx, true);
        } else {
            for t in tier + 1..self.config.layer_count() {
                assert!(
                    board.get(base + t, ty, tx),
                    "target stack is missing tier {t}, cannot slot tier {tier}"
                );
            }
            assert!(
                !board.get(base + tier, ty, tx),
                "target already holds tier {tier}"
            );
            board.set(base + tier, ty, tx, true);
        }
    }

    /// Successor state: copy the board, apply the action, flip the turn.
    #[must_use]
    pub fn next_state(&self, board: &Board, player: Player, action: usize) -> (Board, Player) {
        let mut next = board.clone();
        self.execute_action(&mut next, player, action);
        (next, player.opponent())
    }

    /// Does `player` have a completed snowman anywhere?
    #[must_use]
    pub fn is_player_win(&self, board: &Board, player: Player) -> bool {
        self.check_board(board);
        let base = self.config.plane_base(player);
        let length = self.config.board_length();
        for y in 0..length {
            for x in 0..length {
                if (0..self.config.layer_count()).all(|tier| board.get(base + tier, y, x)) {
                    return true;
                }
            }
        }
        false
    }

    /// Terminal status from `player`'s perspective.
    ///
    /// Precedence when several conditions hold at once: the mover's own
    /// completed snowman wins first, then the opponent's, then a draw
    /// if the mover has no legal move.
    #[must_use]
    pub fn game_result(&self, board: &Board, player: Player) -> GameOutcome {
        if self.is_player_win(board, player) {
            return GameOutcome::Win;
        }
        if self.is_player_win(board, player.opponent()) {
            return GameOutcome::Loss;
        }
        if self.has_valid_moves(board, player) {
            GameOutcome::InProgress
        } else {
            GameOutcome::Draw
        }
    }

    /// Player-agnostic view: the side to move always occupies the
    /// leading plane block.
    ///
    /// For `Player::First` this is a plain copy; for `Player::Second`
    /// the own and opponent plane blocks are swapped element-wise, snow
    /// untouched. Applying it twice with alternating players restores
    /// the original board.
    #[must_use]
    pub fn canonical_form(&self, board: &Board, player: Player) -> Board {
        self.check_board(board);
        let mut canonical = board.clone();
        if player == Player::Second {
            let layers = self.config.layer_count();
            let length = self.config.board_length();
            for tier in 0..layers {
                for y in 0..length {
                    for x in 0..length {
                        let own = board.get(tier, y, x);
                        let opp = board.get(layers + tier, y, x);
                        canonical.set(tier, y, x, opp);
                        canonical.set(layers + tier, y, x, own);
                    }
                }
            }
        }
        canonical
    }
}
