//! Core types: configuration, players, boards, actions, RNG.
//!
//! Everything here is a plain value; game semantics live in
//! [`crate::rules`].

pub mod action;
pub mod board;
pub mod config;
pub mod player;
pub mod rng;

pub use action::{Direction, Move};
pub use board::Board;
pub use config::{
    GameConfig, BOARD_LENGTH_DEF, BOARD_LENGTH_MIN, LAYER_COUNT_DEF, LAYER_COUNT_MAX,
    LAYER_COUNT_MIN,
};
pub use player::Player;
pub use rng::GameRng;
