//! Batch outcomes - per-group results of a processing run

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Result for one alert group in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GroupOutcome {
    Saved {
        index: usize,
        category: String,
        path: String,
    },
    Error {
        index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        error_kind: String,
        error: String,
    },
}

impl GroupOutcome {
    pub fn saved(index: usize, category: impl Into<String>, path: impl Into<String>) -> Self {
        GroupOutcome::Saved {
            index,
            category: category.into(),
            path: path.into(),
        }
    }

    pub fn failed(index: usize, category: Option<String>, err: &DomainError) -> Self {
        GroupOutcome::Error {
            index,
            category,
            error_kind: err.kind().to_string(),
            error: err.to_string(),
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, GroupOutcome::Saved { .. })
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            GroupOutcome::Saved { path, .. } => Some(path),
            GroupOutcome::Error { .. } => None,
        }
    }
}

/// Outcomes of a whole batch, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<GroupOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: GroupOutcome) {
        self.outcomes.push(outcome);
    }

    /// Paths of every saved review file, in input order
    pub fn saved_files(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|o| o.path().map(str::to_string))
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_saved()).count()
    }
}
