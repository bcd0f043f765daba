//! Evaluator interface between the engine and learned models.
//!
//! The network itself lives outside this crate; these traits define the
//! contract it must satisfy, plus a uniform baseline and a caching
//! wrapper. Evaluators always see canonical boards: the side to move
//! occupies the leading plane block.

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::core::Board;

/// Maps a canonical board to `(policy, value)`.
///
/// `policy` is a probability vector over the whole action space (length
/// `GameConfig::action_size()`); `value` is the expected outcome in
/// `[-1, 1]` from the side to move's perspective.
pub trait Evaluator: Send + Sync {
    /// Evaluate a canonical board.
    fn evaluate(&self, board: &Board) -> (Vec<f32>, f32);
}

/// Uniform policy and neutral value: the baseline every trained model
/// must beat.
#[derive(Clone, Debug)]
pub struct UniformEvaluator {
    action_size: usize,
}

impl UniformEvaluator {
    /// Create a uniform evaluator for the given action space size.
    #[must_use]
    pub fn new(action_size: usize) -> Self {
        assert!(action_size > 0, "action space must be non-empty");
        Self { action_size }
    }
}

impl Evaluator for UniformEvaluator {
    fn evaluate(&self, _board: &Board) -> (Vec<f32>, f32) {
        let p = 1.0 / self.action_size as f32;
        (vec![p; self.action_size], 0.0)
    }
}

/// Memoizes an inner evaluator by board key.
///
/// Search revisits the same positions constantly; model inference is
/// the expensive step, so predictions are cached per
/// [`Board::key`]. The cache is behind a mutex so the wrapper stays
/// shareable across search threads.
pub struct CachingEvaluator<E> {
    inner: E,
    cache: Mutex<FxHashMap<Vec<u8>, (Vec<f32>, f32)>>,
}

impl<E: Evaluator> CachingEvaluator<E> {
    /// Wrap an evaluator with a cache.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// Number of cached positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().expect("evaluation cache poisoned").len()
    }

    /// Is the cache empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached predictions.
    pub fn clear(&self) {
        self.cache.lock().expect("evaluation cache poisoned").clear();
    }
}

impl<E: Evaluator> Evaluator for CachingEvaluator<E> {
    fn evaluate(&self, board: &Board) -> (Vec<f32>, f32) {
        let key = board.key();
        let mut cache = self.cache.lock().expect("evaluation cache poisoned");
        if let Some(hit) = cache.get(&key) {
            return hit.clone();
        }
        let prediction = self.inner.evaluate(board);
        cache.insert(key, prediction.clone());
        prediction
    }
}
