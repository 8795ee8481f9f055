//! HTTP Server
//!
//! Binds the router on localhost; the dashboard talks to it cross-origin, so
//! CORS is permissive.

use crate::handler::{self, AppState};
use axum::routing::{get, post};
use axum::Router;
use jarvis_core::error::{AppError, Result};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 3001;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handler::health))
        .route("/api/analyse", post(handler::analyse))
        .route("/api/evolution", post(handler::evolution))
        .route("/api/validation", post(handler::validation))
        .route(
            "/api/memory",
            get(handler::list_memory).post(handler::record_memory),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Serve until `shutdown` resolves
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid HTTP address: {}", e)))?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(addr = %addr, "HTTP API listening");

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("HTTP API stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use jarvis_core::application::{MemoryService, OperationService};
    use jarvis_core::port::id_provider::UuidProvider;
    use jarvis_core::port::memory_store::mocks::InMemoryMemoryStore;
    use jarvis_core::port::process_runner::mocks::MockProcessRunner;
    use jarvis_core::port::time_provider::FixedTimeProvider;
    use jarvis_core::PipelineConfig;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(runner: MockProcessRunner) -> Router {
        let time = Arc::new(FixedTimeProvider(1_700_000_000_000));
        let operations = Arc::new(OperationService::new(
            Arc::new(runner),
            time.clone(),
            PipelineConfig::default(),
        ));
        let memory = Arc::new(MemoryService::new(
            Arc::new(InMemoryMemoryStore::new()),
            Arc::new(UuidProvider),
            time,
        ));
        router(Arc::new(AppState::new(operations, memory)))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let resp = app(MockProcessRunner::with_stdout(""))
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["version"], jarvis_core::VERSION);
    }

    #[tokio::test]
    async fn test_validation_success_envelope() {
        let runner = MockProcessRunner::with_output(
            "Build terminé\n✅ Build réussi\nDurée: 12.5s\n",
            "warn: deprecated\n",
        );
        let resp = app(runner)
            .oneshot(post_json(
                "/api/validation",
                r#"{"action":"test-build","testType":"build"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["resultats"]["statut"], "reussi");
        assert_eq!(body["resultats"]["duree"], 12.5);
        assert_eq!(body["resultats"]["test_type"], "build");
        assert_eq!(body["erreurs"], "warn: deprecated\n");
    }

    #[tokio::test]
    async fn test_business_failure_is_still_http_200() {
        let runner = MockProcessRunner::with_stdout("Fichiers analysés: 3\nERREUR: parse\n");
        let resp = app(runner)
            .oneshot(post_json(
                "/api/analyse",
                r#"{"action":"analyser","dossierCible":"src"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["resultats"]["statut"], "erreur");
        assert_eq!(body["resultats"]["fichiers_analyses"], 3);
    }

    #[tokio::test]
    async fn test_unknown_action_is_bad_request() {
        let resp = app(MockProcessRunner::with_stdout(""))
            .oneshot(post_json("/api/validation", r#"{"action":"test-tout"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("test-tout"));
    }

    #[tokio::test]
    async fn test_missing_dossier_cible_is_bad_request() {
        let resp = app(MockProcessRunner::with_stdout(""))
            .oneshot(post_json("/api/analyse", r#"{"action":"analyser"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("dossierCible"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let resp = app(MockProcessRunner::with_stdout(""))
            .oneshot(post_json("/api/evolution", "{not json"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_spawn_failure_is_server_error() {
        let resp = app(MockProcessRunner::spawn_failing("node: not found"))
            .oneshot(post_json("/api/evolution", r#"{"action":"rollback"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("node: not found"));
    }

    #[tokio::test]
    async fn test_timeout_is_server_error() {
        let resp = app(MockProcessRunner::timing_out("Fichiers analysés: 1\n"))
            .oneshot(post_json("/api/analyse", r#"{"action":"analyser-tout"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("timeout"));
    }

    #[tokio::test]
    async fn test_memory_record_then_list() {
        let app = app(MockProcessRunner::with_stdout(""));

        let resp = app
            .clone()
            .oneshot(post_json(
                "/api/memory",
                r#"{"kind":"feedback","content":"rollback worked","metadata":{"run":1}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let recorded = body_json(resp).await;
        assert_eq!(recorded["entry"]["kind"], "feedback");

        let resp = app
            .oneshot(
                Request::get("/api/memory?kind=feedback&limit=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["entries"], json!([recorded["entry"].clone()]));
    }

    #[tokio::test]
    async fn test_memory_unknown_kind_is_bad_request() {
        let resp = app(MockProcessRunner::with_stdout(""))
            .oneshot(
                Request::get("/api/memory?kind=dream")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
