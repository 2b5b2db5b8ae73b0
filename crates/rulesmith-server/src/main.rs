use axum::{extract::DefaultBodyLimit, middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod auth;
mod routes;

use rulesmith::{
    BatchProcessor, FsReviewStore, GeminiProvider, RuleOptimizer, RuleSource, RulesmithConfig,
    SyntheticRuleSource, WazuhRuleSource,
};

/// Upper bound for an alert batch body
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub batch: BatchProcessor,
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    /// Wire the production adapters from configuration
    pub fn from_config(config: &RulesmithConfig) -> anyhow::Result<Self> {
        let provider = Arc::new(GeminiProvider::new(&config.gemini)?);

        let rule_source: Arc<dyn RuleSource> = match &config.wazuh {
            Some(wazuh) => {
                tracing::info!("🛡️  Fetching live rules from {}", wazuh.api_url);
                Arc::new(WazuhRuleSource::new(wazuh)?)
            }
            None => {
                tracing::warn!("⚠️  No WAZUH_API_URL set - using synthetic rules");
                Arc::new(SyntheticRuleSource)
            }
        };

        let store = Arc::new(FsReviewStore::new(&config.rules_dir));
        tracing::info!("📂 Review directory: {}", store.dir().display());

        Ok(Self {
            batch: BatchProcessor::new(rule_source, RuleOptimizer::new(provider), store),
            api_key: config.api_key.as_deref().map(Arc::from),
        })
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Rulesmith API is running - alerts in, rule proposals out".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the router with all routes and layers
pub fn app(state: AppState) -> Router {
    // Protected routes (require authentication when a key is configured)
    let protected_routes = Router::new()
        .merge(routes::alerts::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🛠️  Rulesmith API initializing...");

    let config =
        RulesmithConfig::from_lookup(|key| secrets.get(key)).map_err(anyhow::Error::from)?;

    if config.api_key.is_some() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No RULESMITH_API_KEY set - authentication disabled");
    }

    let state = AppState::from_config(&config)?;
    tracing::info!("🤖 Gemini model: {}", config.gemini.model);

    let router = app(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Rulesmith API ready - POST /process_alerts");

    Ok(router.into())
}
