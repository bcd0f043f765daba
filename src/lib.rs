//! # snowman-engine
//!
//! A two-player, perfect-information board game ("snowman building")
//! packaged as an environment for search-based and learned agents.
//!
//! ## Design Principles
//!
//! 1. **One engine, any size**: board length and snowman height are
//!    configuration, not variants. All plane and action indexing is
//!    computed from `GameConfig`.
//!
//! 2. **Caller-owned state**: the engine holds no board. `next_state`
//!    copies before mutating, so search branches never alias.
//!
//! 3. **Mover-relative boards**: `canonical_form` puts the side to move
//!    in the leading plane block, so search and evaluator code never
//!    branch on player identity.
//!
//! ## The game
//!
//! The board starts fully snow-covered. Rolling snow onto adjacent snow
//! creates a tier-0 ball; rolling a loose ball onto snow grows it one
//! tier; rolling it onto an own partial stack whose only gap is that
//! tier slots it in. A ball on the top tier is anchored forever. The
//! first player to stack all tiers on one cell has built a snowman and
//! wins; a side to move with no legal move draws the game.
//!
//! ## Modules
//!
//! - `core`: configuration, players, boards, actions, deterministic RNG
//! - `rules`: move legality, state transition, terminal detection,
//!   dihedral symmetry expansion
//! - `nn`: evaluator traits for learned models, plus a caching wrapper
//! - `arena`: agents and a match runner

pub mod arena;
pub mod core;
pub mod nn;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{Board, Direction, GameConfig, GameRng, Move, Player};

pub use crate::rules::{
    flip_board, flip_policy, rotate_board, rotate_policy, GameEngine, GameOutcome, PolicyPair,
    TierScan, SYMMETRY_COUNT,
};

pub use crate::nn::{CachingEvaluator, Evaluator, UniformEvaluator};

pub use crate::arena::{Agent, Arena, GreedyAgent, MatchStats, RandomAgent};
