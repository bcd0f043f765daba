//! Interfaces consumed by the evaluator/training pipeline.

pub mod traits;

pub use traits::{CachingEvaluator, Evaluator, UniformEvaluator};
