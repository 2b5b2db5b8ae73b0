//! Rulesmith API Client

use anyhow::{bail, Context, Result};
use reqwest::Client;
use rulesmith::GroupOutcome;
use serde::Deserialize;
use serde_json::Value;

/// API Client for a running Rulesmith server
pub struct RulesmithClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProcessAlertsResponse {
    pub batch_id: String,
    pub message: String,
    pub saved_files: Vec<String>,
    #[serde(default)]
    pub results: Vec<GroupOutcome>,
}

impl RulesmithClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    /// Post a batch of alert groups
    pub async fn process_alerts(&self, batch: &Value) -> Result<ProcessAlertsResponse> {
        let url = format!("{}/process_alerts", self.base_url);
        let mut request = self.client.post(&url).json(batch);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .context("Failed to connect to Rulesmith API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        resp.json().await.context("Failed to parse response")
    }
}
