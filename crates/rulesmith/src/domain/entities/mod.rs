//! Domain Entities
//!
//! Request-scoped types flowing through the optimization pipeline.

mod alert;
mod outcome;
mod prompt;
mod rule;

pub use alert::{AlertGroup, AlertObservation};
pub use outcome::{BatchReport, GroupOutcome};
pub use prompt::OptimizationPrompt;
pub use rule::{RuleDefinition, MAX_RULE_LEVEL};
