//! Alert observations and alert groups

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// A triggered alert, as reported to the optimizer
///
/// The prompt text is kept verbatim; `rule_id`, `count` and `label` are
/// filled when the text follows `Alert: <id> triggered <n> times (<label>)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct AlertObservation {
    rule_id: Option<String>,
    count: Option<u64>,
    label: Option<String>,
    text: String,
}

impl AlertObservation {
    /// Build an observation from structured fields
    pub fn new(
        rule_id: impl Into<String>,
        count: u64,
        label: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let rule_id = rule_id.into().trim().to_string();
        let label = label.into().trim().to_string();

        if rule_id.is_empty() {
            return Err(DomainError::Validation(
                "alert rule reference must not be empty".into(),
            ));
        }
        if label.is_empty() {
            return Err(DomainError::Validation(format!(
                "alert for rule {rule_id} has an empty label"
            )));
        }

        Ok(Self {
            text: format!("Alert: {rule_id} triggered {count} times ({label})"),
            rule_id: Some(rule_id),
            count: Some(count),
            label: Some(label),
        })
    }

    /// Wrap a free-text alert description
    pub fn from_text(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::Validation(
                "alert text must not be empty".into(),
            ));
        }

        let (rule_id, count, label) = match parse_summary(&text) {
            Some((rule_id, count, label)) => (Some(rule_id), Some(count), label),
            None => (None, None, None),
        };

        Ok(Self {
            rule_id,
            count,
            label,
            text,
        })
    }

    pub fn rule_id(&self) -> Option<&str> {
        self.rule_id.as_deref()
    }

    pub fn count(&self) -> Option<u64> {
        self.count
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Text embedded in optimization prompts
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TryFrom<String> for AlertObservation {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_text(value)
    }
}

impl Serialize for AlertObservation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl std::fmt::Display for AlertObservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

fn parse_summary(text: &str) -> Option<(String, u64, Option<String>)> {
    let rest = text.trim().strip_prefix("Alert:")?.trim_start();
    let (rule_id, rest) = rest.split_once(char::is_whitespace)?;
    let rest = rest.trim_start().strip_prefix("triggered")?.trim_start();
    let (count, rest) = rest.split_once(char::is_whitespace)?;
    let count = count.parse().ok()?;
    let rest = rest.trim_start().strip_prefix("times")?.trim();

    let label = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    Some((rule_id.to_string(), count, label))
}

/// Alerts sharing a category, submitted together for analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AlertGroup {
    /// Category label, e.g. "ssh"
    pub category: String,
    /// Alert descriptions, in order of importance
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub alerts: Vec<AlertObservation>,
}

impl AlertGroup {
    /// Decode one element of an incoming batch.
    ///
    /// Shape problems (not an object, missing or mistyped keys, blank
    /// category or alert text) become `MalformedRequest`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DomainError> {
        let group: AlertGroup = serde_json::from_value(value)
            .map_err(|e| DomainError::MalformedRequest(e.to_string()))?;

        if group.category.trim().is_empty() {
            return Err(DomainError::MalformedRequest(
                "category must not be empty".into(),
            ));
        }

        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_alert_text() {
        let alert = AlertObservation::new("5710", 50, "SSH brute force attempt").unwrap();
        assert_eq!(
            alert.text(),
            "Alert: 5710 triggered 50 times (SSH brute force attempt)"
        );
    }

    #[test]
    fn test_from_text_parses_summary() {
        let alert =
            AlertObservation::from_text("Alert: 5720 triggered 30 times (Possible malware activity)")
                .unwrap();
        assert_eq!(alert.rule_id(), Some("5720"));
        assert_eq!(alert.count(), Some(30));
        assert_eq!(alert.label(), Some("Possible malware activity"));
    }

    #[test]
    fn test_from_text_without_label() {
        let alert = AlertObservation::from_text("Alert: 1 triggered 10 times").unwrap();
        assert_eq!(alert.rule_id(), Some("1"));
        assert_eq!(alert.count(), Some(10));
        assert_eq!(alert.label(), None);
        assert_eq!(alert.text(), "Alert: 1 triggered 10 times");
    }

    #[test]
    fn test_from_text_free_form() {
        let alert = AlertObservation::from_text("sshd: too many auth failures").unwrap();
        assert_eq!(alert.rule_id(), None);
        assert_eq!(alert.text(), "sshd: too many auth failures");
    }

    #[test]
    fn test_blank_alert_rejected() {
        assert!(AlertObservation::from_text(" ").is_err());
        assert!(AlertObservation::new("5710", 1, "").is_err());
    }

    #[test]
    fn test_group_from_value() {
        let group = AlertGroup::from_value(json!({
            "category": "ssh",
            "alerts": ["Alert: 5710 triggered 50 times"]
        }))
        .unwrap();
        assert_eq!(group.category, "ssh");
        assert_eq!(group.alerts.len(), 1);
    }

    #[test]
    fn test_group_missing_alerts_is_malformed() {
        let err = AlertGroup::from_value(json!({ "category": "ssh" })).unwrap_err();
        assert_eq!(err.kind(), "malformed_request");
    }

    #[test]
    fn test_group_blank_category_is_malformed() {
        let err = AlertGroup::from_value(json!({ "category": "  ", "alerts": [] })).unwrap_err();
        assert_eq!(err.kind(), "malformed_request");
    }

    #[test]
    fn test_group_blank_alert_is_malformed() {
        let err =
            AlertGroup::from_value(json!({ "category": "ssh", "alerts": [""] })).unwrap_err();
        assert_eq!(err.kind(), "malformed_request");
    }
}
