//! Runtime configuration
//!
//! Built once at startup from a key lookup (process environment, shuttle
//! secrets, ...) and handed to components explicitly.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::errors::DomainError;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_RULES_DIR: &str = "optimized_rules";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Gemini connection settings
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Live Wazuh manager API
#[derive(Debug, Clone)]
pub struct WazuhConfig {
    pub api_url: String,
    pub api_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RulesmithConfig {
    pub gemini: GeminiConfig,
    pub rules_dir: PathBuf,
    pub wazuh: Option<WazuhConfig>,
    /// Bearer key guarding the HTTP API (server only)
    pub api_key: Option<String>,
}

impl RulesmithConfig {
    /// Build from an arbitrary key lookup.
    ///
    /// `GOOGLE_API_KEY` is required; everything else has a default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("GOOGLE_API_KEY").ok_or_else(|| {
            DomainError::Configuration("GOOGLE_API_KEY is not set".to_string())
        })?;

        let mut gemini = GeminiConfig::new(api_key);
        if let Some(model) = get("GEMINI_MODEL") {
            gemini = gemini.with_model(model);
        }
        if let Some(base_url) = get("GEMINI_BASE_URL") {
            gemini.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = get("GEMINI_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                DomainError::Configuration(format!(
                    "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{secs}'"
                ))
            })?;
            gemini.timeout = Duration::from_secs(secs);
        }

        let rules_dir = get("RULES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RULES_DIR));

        let wazuh = get("WAZUH_API_URL").map(|url| WazuhConfig {
            api_url: url.trim_end_matches('/').to_string(),
            api_token: get("WAZUH_API_TOKEN"),
        });

        Ok(Self {
            gemini,
            rules_dir,
            wazuh,
            api_key: get("RULESMITH_API_KEY"),
        })
    }

    /// Build from the process environment, loading `.env` first if present
    pub fn from_env() -> Result<Self, DomainError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
