//! Rule Source implementations
//!
//! - `SyntheticRuleSource`: placeholder rules derived from the category
//! - `StaticRuleSource`: fixed in-memory rule sets
//! - `WazuhRuleSource`: live rules from the Wazuh manager API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::WazuhConfig;
use crate::domain::{errors::DomainError, RuleDefinition};
use crate::ports::RuleSource;

/// First rule id handed out by the synthetic source
const SYNTHETIC_BASE_ID: u32 = 5710;
const SYNTHETIC_RULE_COUNT: u32 = 3;

/// Stand-in used when no Wazuh manager is configured
#[derive(Debug, Clone, Default)]
pub struct SyntheticRuleSource;

#[async_trait]
impl RuleSource for SyntheticRuleSource {
    async fn fetch(&self, category: &str) -> Result<Vec<RuleDefinition>, DomainError> {
        (0..SYNTHETIC_RULE_COUNT)
            .map(|i| {
                RuleDefinition::from_markup(format!(
                    "<rule id='{}' level='10'><description>Rule for {} event {}</description></rule>",
                    SYNTHETIC_BASE_ID + i,
                    category,
                    i
                ))
            })
            .collect()
    }

    fn source_name(&self) -> &str {
        "synthetic"
    }
}

/// Fixed rule sets keyed by category
#[derive(Debug, Clone, Default)]
pub struct StaticRuleSource {
    rules: HashMap<String, Vec<RuleDefinition>>,
}

impl StaticRuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, category: impl Into<String>, rules: Vec<RuleDefinition>) -> Self {
        self.rules.insert(category.into(), rules);
        self
    }
}

#[async_trait]
impl RuleSource for StaticRuleSource {
    async fn fetch(&self, category: &str) -> Result<Vec<RuleDefinition>, DomainError> {
        Ok(self.rules.get(category).cloned().unwrap_or_default())
    }

    fn source_name(&self) -> &str {
        "static"
    }
}

/// Rules fetched from `GET {api_url}/rules?group={category}`
pub struct WazuhRuleSource {
    client: Client,
    api_url: String,
    api_token: Option<String>,
}

impl WazuhRuleSource {
    pub fn new(config: &WazuhConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                DomainError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl RuleSource for WazuhRuleSource {
    async fn fetch(&self, category: &str) -> Result<Vec<RuleDefinition>, DomainError> {
        let url = format!("{}/rules", self.api_url);
        let mut request = self.client.get(&url).query(&[("group", category)]);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Wazuh request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::ExternalService(format!(
                "Wazuh API error ({}): {}",
                status.as_u16(),
                body
            )));
        }

        let payload: WazuhRulesResponse = response.json().await.map_err(|e| {
            DomainError::ExternalService(format!("Malformed Wazuh response: {e}"))
        })?;

        let rules = payload.into_rules()?;
        tracing::debug!("Fetched {} Wazuh rules for '{}'", rules.len(), category);
        Ok(rules)
    }

    fn source_name(&self) -> &str {
        "wazuh"
    }
}

// ============================================
// Wazuh API Types
// ============================================

#[derive(Debug, Deserialize)]
struct WazuhRulesResponse {
    data: WazuhRulesData,
}

#[derive(Debug, Deserialize)]
struct WazuhRulesData {
    #[serde(default)]
    affected_items: Vec<WazuhRule>,
}

#[derive(Debug, Deserialize)]
struct WazuhRule {
    id: u64,
    level: u8,
    #[serde(default)]
    description: String,
}

impl WazuhRulesResponse {
    fn into_rules(self) -> Result<Vec<RuleDefinition>, DomainError> {
        self.data
            .affected_items
            .into_iter()
            .map(|r| {
                RuleDefinition::new(r.id.to_string(), r.level, r.description).map_err(|e| {
                    DomainError::ExternalService(format!("Wazuh returned an invalid rule: {e}"))
                })
            })
            .collect()
    }
}
