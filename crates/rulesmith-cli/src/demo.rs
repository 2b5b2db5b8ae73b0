//! Built-in example data for the demo run

use rulesmith::{AlertObservation, DomainError, RuleDefinition};

pub const CATEGORY: &str = "weekly";

pub fn rules() -> Result<Vec<RuleDefinition>, DomainError> {
    Ok(vec![
        RuleDefinition::new("5710", 10, "Multiple failed SSH logins")?.with_decoded_as("json"),
        RuleDefinition::new("5720", 8, "High CPU usage by unknown process")?
            .with_decoded_as("json"),
    ])
}

pub fn alerts() -> Result<Vec<AlertObservation>, DomainError> {
    Ok(vec![
        AlertObservation::new("5710", 50, "SSH brute force attempt")?,
        AlertObservation::new("5720", 30, "Possible malware activity")?,
    ])
}

/// One-line summary of a rule for the console
pub fn describe(rule: &RuleDefinition) -> String {
    let mut line = rule.id().unwrap_or("?").to_string();
    if let Some(level) = rule.level() {
        line.push_str(&format!(" [level {level}]"));
    }
    if let Some(decoder) = rule.decoded_as() {
        line.push_str(&format!(" [decoder {decoder}]"));
    }
    if let Some(description) = rule.description() {
        line.push_str(&format!(" {description}"));
    }
    line
}
