//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! rule sources, the AI provider and the review store.

mod batch;
mod optimizer;
mod prompt_builder;

pub use batch::BatchProcessor;
pub use optimizer::{RuleOptimizer, ERROR_MARKER};
pub use prompt_builder::PromptBuilder;
