//! Problem generation engine: one module per family group, the shared
//! helpers, the distractor builder, dedup keys and the batch orchestrator.

pub mod advanced;
pub mod arithmetic;
pub mod batch;
pub mod dedup;
pub mod geometry;
pub mod helpers;
pub mod options;
pub mod review;
pub mod tables;
pub mod visual;
pub mod word_problems;

pub use self::batch::{generate_problem, generate_random_problem, generate_unique_problems, BatchLimits, EngineError};
