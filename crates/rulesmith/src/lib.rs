//! Rulesmith Library
//!
//! AI-assisted tuning of Wazuh detection rules. Alert groups are paired
//! with the rules deployed for their category, sent to a generative
//! model, and the proposals are written to a review directory.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): rules, alerts, prompts, outcomes, errors
//! - **Ports** (`ports/`): `LlmProvider`, `RuleSource`, `ReviewStore`
//! - **Application** (`application/`): `PromptBuilder`, `RuleOptimizer`,
//!   `BatchProcessor`
//! - **Adapters** (`adapters/`): Gemini, Wazuh, filesystem
//!
//! # Usage
//!
//! ```rust,ignore
//! use rulesmith::{BatchProcessor, FsReviewStore, GeminiProvider, RuleOptimizer};
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use adapters::{
    FsReviewStore, GeminiProvider, MockProvider, StaticRuleSource, SyntheticRuleSource,
    WazuhRuleSource,
};
pub use application::{BatchProcessor, PromptBuilder, RuleOptimizer, ERROR_MARKER};
pub use config::{GeminiConfig, RulesmithConfig, WazuhConfig};
pub use domain::{
    AlertGroup, AlertObservation, BatchReport, DomainError, GroupOutcome, OptimizationPrompt,
    RuleDefinition,
};
pub use ports::{LlmProvider, ReviewStore, RuleSource};
