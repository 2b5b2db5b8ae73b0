//! Prompt Builder
//!
//! Composes the rule optimization request for one alert category.

use crate::domain::{errors::DomainError, AlertObservation, OptimizationPrompt, RuleDefinition};

const ITEM_SEPARATOR: &str = ", ";

pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the prompt for `category`.
    ///
    /// Rules and alerts keep their input order. Fails with `MissingInput`
    /// when either list is empty.
    pub fn build(
        category: &str,
        rules: &[RuleDefinition],
        alerts: &[AlertObservation],
    ) -> Result<OptimizationPrompt, DomainError> {
        if rules.is_empty() || alerts.is_empty() {
            return Err(DomainError::missing_input(
                "No rules or alerts provided for optimization.",
            ));
        }

        let rules_text = rules
            .iter()
            .map(RuleDefinition::markup)
            .collect::<Vec<_>>()
            .join(ITEM_SEPARATOR);
        let alerts_text = alerts
            .iter()
            .map(AlertObservation::text)
            .collect::<Vec<_>>()
            .join(ITEM_SEPARATOR);

        let text = format!(
            r#"You are a cybersecurity AI expert specializing in Wazuh XDR rules.

Alert category: **{category}**

Given the following **Wazuh rules**:
{rules_text}

And the **security alerts triggered** for this category:
{alerts_text}

🔹 **Your Task:**
- Analyze which rules are **generating too many false positives**.
- Identify **new attack patterns** that require stricter rules.
- Suggest **rule improvements** (adjust severity, add new conditions).
- If a rule is too broad, provide a **more specific version**.

🚀 **Output Format:**
- List of **optimized Wazuh rules** in XML format.
- Explanation of why each rule was adjusted."#
        );

        Ok(OptimizationPrompt::new(category, text))
    }
}
