//! LabelForge API: REST endpoints
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use axum::{
    routing::{get, post},
    Router,
};
use labelforge_core::{GenerationContext, DEFAULT_GENERATION_TIMEOUT};
use labelforge_gen::{GenerationClient, HttpCapability, RetryPolicy};
use labelforge_orchestrator::Orchestrator;
use labelforge_store::{LabelStore, MemoryLabelStore};
use metrics::ApiMetrics;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// Shared handler state. The orchestrator and store are injected so tests can
/// substitute capability and store doubles.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub store: Arc<dyn LabelStore>,
    pub metrics: Arc<ApiMetrics>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, store: Arc<dyn LabelStore>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            store,
            metrics: Arc::new(ApiMetrics::new()),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(handlers::generate))
        .route("/labels", get(handlers::list_labels))
        .route(
            "/labels/{id}",
            get(handlers::get_label).delete(handlers::delete_label),
        )
        .route("/labels/{id}/score", get(handlers::score_label))
        .route("/compare", post(handlers::compare_labels))
        .route("/crisis", post(handlers::crisis))
        .route("/markets", get(handlers::markets))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the default production state from environment variables and serve.
pub async fn run(addr: &str) {
    let model_id =
        std::env::var("LABELFORGE_MODEL_ID").unwrap_or_else(|_| "labelforge-std-1".to_string());
    let endpoint = std::env::var("LABELFORGE_GEN_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8791/v1/complete".to_string());
    let timeout = std::env::var("LABELFORGE_GEN_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_GENERATION_TIMEOUT);

    let capability =
        Arc::new(HttpCapability::new(endpoint, RetryPolicy::default()).with_timeout(timeout));
    let context = GenerationContext::new(model_id).with_timeout(timeout);
    let orchestrator = Orchestrator::new(GenerationClient::new(capability, context));
    let state = AppState::new(orchestrator, Arc::new(MemoryLabelStore::new()));

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    tracing::info!("LabelForge API listening on {}", addr);
    axum::serve(listener, app).await.expect("Server error");
}
