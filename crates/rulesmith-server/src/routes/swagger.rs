//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use rulesmith::AlertGroup;

use super::alerts::{ErrorResponse, ProcessAlertsResponse};

#[derive(OpenApi)]
#[openapi(
    paths(super::alerts::process_alerts),
    components(schemas(AlertGroup, ProcessAlertsResponse, ErrorResponse)),
    tags(
        (name = "Alerts", description = "Alert batch intake and AI rule optimization")
    ),
    info(
        title = "Rulesmith API",
        description = "Turns grouped Wazuh alerts into AI-proposed rule updates for human review"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_process_alerts() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/process_alerts"));

        let schemas = doc.components.unwrap().schemas;
        assert!(schemas.contains_key("AlertGroup"));
    }
}
