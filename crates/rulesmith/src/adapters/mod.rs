//! Adapters
//!
//! Concrete implementations of the ports.

mod fs_review_store;
mod gemini;
mod mock;
mod rule_sources;

#[cfg(test)]
pub(crate) mod stub_server;

pub use fs_review_store::{sanitize_category, FsReviewStore};
pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use rule_sources::{StaticRuleSource, SyntheticRuleSource, WazuhRuleSource};
