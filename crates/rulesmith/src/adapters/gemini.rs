//! Google Gemini provider
//!
//! Single-shot `generateContent` calls against the Generative Language API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::config::GeminiConfig;
use crate::domain::errors::DomainError;
use crate::ports::LlmProvider;

/// Gemini implementation of `LlmProvider`
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(config: &GeminiConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors embed the URL, which carries the key
                DomainError::ExternalService(format!(
                    "Gemini request failed: {}",
                    e.without_url()
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, &body));
        }

        let payload: Value = response.json().await.map_err(|e| {
            DomainError::ExternalService(format!("Malformed Gemini response: {e}"))
        })?;

        extract_text(&payload).ok_or_else(|| {
            DomainError::ExternalService(format!(
                "Gemini returned an empty response{}",
                block_reason(&payload)
            ))
        })
    }

    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ============================================
// Request Types
// ============================================

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

// ============================================
// Helper Functions
// ============================================

fn extract_text(root: &Value) -> Option<String> {
    let candidates = root.get("candidates")?.as_array()?;

    let collected: Vec<&str> = candidates
        .iter()
        .filter_map(|c| c.get("content")?.get("parts")?.as_array())
        .flatten()
        .filter_map(|part| part.get("text")?.as_str())
        .filter(|text| !text.trim().is_empty())
        .collect();

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n\n"))
    }
}

fn block_reason(root: &Value) -> String {
    root.get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|r| r.as_str())
        .map(|r| format!(" (blocked: {r})"))
        .unwrap_or_default()
}

fn map_http_error(status: StatusCode, body: &str) -> DomainError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| body.to_string());

    if status == StatusCode::TOO_MANY_REQUESTS {
        return DomainError::ExternalService(format!("Gemini rate limited: {message}"));
    }

    DomainError::ExternalService(format!("Gemini API error ({}): {}", status.as_u16(), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stub_server::StubServer;
    use serde_json::json;

    #[test]
    fn test_extract_text_joins_parts() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "<group name=\"ssh\">...</group>" },
                    { "text": "  " },
                    { "text": "Rule 5710 was narrowed." }
                ]}
            }]
        });

        assert_eq!(
            extract_text(&payload).unwrap(),
            "<group name=\"ssh\">...</group>\n\nRule 5710 was narrowed."
        );
    }

    #[test]
    fn test_extract_text_empty() {
        assert!(extract_text(&json!({ "candidates": [] })).is_none());
        assert!(extract_text(&json!({})).is_none());
    }

    #[test]
    fn test_block_reason() {
        let payload = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert_eq!(block_reason(&payload), " (blocked: SAFETY)");
        assert_eq!(block_reason(&json!({})), "");
    }

    #[test]
    fn test_map_http_error_uses_api_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid."}}"#;
        let err = map_http_error(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            err,
            DomainError::ExternalService("Gemini API error (400): API key not valid.".into())
        );
    }

    #[test]
    fn test_map_http_error_rate_limited() {
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_endpoint_uses_model() {
        let provider = GeminiProvider::new(
            &GeminiConfig::new("k").with_base_url("http://localhost:1/models/"),
        )
        .unwrap();
        assert_eq!(
            provider.endpoint(),
            "http://localhost:1/models/gemini-1.5-flash:generateContent?key=k"
        );
        assert_eq!(provider.model_id(), "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_external_error() {
        let provider =
            GeminiProvider::new(&GeminiConfig::new("k").with_base_url("http://127.0.0.1:9"))
                .unwrap();

        let err = provider.generate("hello").await.unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(_)));
        assert!(!err.to_string().contains("key=k"));
    }

    #[tokio::test]
    async fn test_generate_round_trip() {
        let stub = StubServer::start(
            StatusCode::OK,
            json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "<rule id=\"5710\" level=\"12\"/>" }] }
                }]
            }),
        )
        .await;
        let provider = GeminiProvider::new(
            &GeminiConfig::new("k")
                .with_model("gemini-test")
                .with_base_url(stub.base_url.clone()),
        )
        .unwrap();

        let text = provider.generate("Optimize these rules").await.unwrap();
        assert_eq!(text, "<rule id=\"5710\" level=\"12\"/>");

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].target, "/gemini-test:generateContent?key=k");

        let body: Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": "Optimize these rules" }]
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_generate_maps_rate_limit() {
        let stub = StubServer::start(
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "error": { "code": 429, "message": "Resource has been exhausted" } }),
        )
        .await;
        let provider =
            GeminiProvider::new(&GeminiConfig::new("k").with_base_url(stub.base_url.clone()))
                .unwrap();

        let err = provider.generate("hello").await.unwrap_err();
        assert_eq!(
            err,
            DomainError::ExternalService(
                "Gemini rate limited: Resource has been exhausted".into()
            )
        );
    }

    #[tokio::test]
    async fn test_generate_blocked_prompt() {
        let stub = StubServer::start(
            StatusCode::OK,
            json!({ "candidates": [], "promptFeedback": { "blockReason": "SAFETY" } }),
        )
        .await;
        let provider =
            GeminiProvider::new(&GeminiConfig::new("k").with_base_url(stub.base_url.clone()))
                .unwrap();

        let err = provider.generate("hello").await.unwrap_err();
        assert!(err.to_string().contains("blocked: SAFETY"));
    }
}
