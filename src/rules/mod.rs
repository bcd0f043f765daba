//! Game rules: the engine plus the symmetry expansion.

pub mod engine;
pub mod symmetry;

pub use engine::{GameEngine, GameOutcome, TierScan};
pub use symmetry::{flip_board, flip_policy, rotate_board, rotate_policy, PolicyPair, SYMMETRY_COUNT};
