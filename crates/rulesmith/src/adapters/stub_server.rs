//! Local HTTP stand-in for the remote APIs used by the adapters

use axum::{
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A request as seen by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path plus query string
    pub target: String,
    pub authorization: Option<String>,
    pub body: String,
}

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Answer every request with `status` and the JSON `reply`
    pub async fn start(status: StatusCode, reply: Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        let app = Router::new().fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, body: String| {
                let log = log.clone();
                let reply = reply.clone();
                async move {
                    log.lock().unwrap().push(RecordedRequest {
                        method,
                        target: uri
                            .path_and_query()
                            .map(|pq| pq.as_str().to_string())
                            .unwrap_or_default(),
                        authorization: headers
                            .get(header::AUTHORIZATION)
                            .and_then(|h| h.to_str().ok())
                            .map(str::to_string),
                        body,
                    });
                    (status, Json(reply))
                }
            },
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}
