//! OptimizationPrompt - A composed request for one alert category

use serde::Serialize;

/// Fully composed prompt text for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationPrompt {
    pub category: String,
    pub text: String,
}

impl OptimizationPrompt {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for OptimizationPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
