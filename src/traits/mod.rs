pub mod engine;
pub mod executor;

pub use engine::ReasoningEngine;
pub use executor::BatchExecutor;
