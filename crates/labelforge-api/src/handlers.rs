//! API Handlers
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use labelforge_core::{Label, ValidationError, LABELFORGE_VERSION};
use labelforge_markets::{all_markets, config_for};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub product_data: Value,
    pub market: Option<String>,
    pub markets: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub label_ids: Vec<String>,
}

/// `POST /generate` with either a single `market` or a `markets` batch.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let product = labelforge_schema::validate_product(request.product_data)?;

    if let Some(markets) = request.markets.filter(|m| !m.is_empty()) {
        let result = state
            .orchestrator
            .generate_for_markets(&product, &markets)
            .await?;
        for label in result.labels.values() {
            persist(&state, label).await;
        }
        state.metrics.observe_batch(&result);
        return Ok(Json(json!({ "success": true, "data": result })));
    }

    let market = request.market.ok_or_else(|| {
        ValidationError::single("market", "either 'market' or 'markets' is required")
    })?;
    let label = state.orchestrator.generate_single(&product, &market).await?;
    persist(&state, &label).await;
    state.metrics.observe_label(&label);
    Ok(Json(json!({ "success": true, "data": label })))
}

// Best effort: a storage outage degrades the read-back surface but does not
// fail the generation response.
async fn persist(state: &AppState, label: &Label) {
    if let Err(err) = state.store.put(label).await {
        warn!(label_id = %label.label_id, error = %err, "failed to persist label");
    }
}

/// `GET /labels`
pub async fn list_labels(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let labels = state.store.list().await?;
    Ok(Json(json!({ "success": true, "data": labels })))
}

/// `GET /labels/{id}`
pub async fn get_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let label = state.store.get(&id).await?;
    Ok(Json(json!({ "success": true, "data": label })))
}

/// `DELETE /labels/{id}`
pub async fn delete_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}

/// `GET /labels/{id}/score`
pub async fn score_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let label = state.store.get(&id).await?;
    let score = labelforge_compliance::score(&label);
    Ok(Json(json!({ "success": true, "data": score })))
}

/// `POST /compare` over stored label ids.
pub async fn compare_labels(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut labels = Vec::with_capacity(request.label_ids.len());
    for id in &request.label_ids {
        labels.push(state.store.get(id).await?);
    }
    let comparison = labelforge_compliance::compare(&labels);
    Ok(Json(json!({ "success": true, "data": comparison })))
}

/// `POST /crisis`
pub async fn crisis(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let scenario = labelforge_schema::validate_crisis(payload)?;
    let response = state.orchestrator.client().generate_crisis(&scenario).await;
    Ok(Json(json!({ "success": true, "data": response })))
}

/// `GET /markets` for UI pickers.
pub async fn markets() -> (StatusCode, Json<Value>) {
    let configs: Vec<_> = all_markets().iter().map(|m| config_for(*m)).collect();
    (StatusCode::OK, Json(json!({ "success": true, "data": configs })))
}

/// `GET /health`
pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": LABELFORGE_VERSION })),
    )
}

/// `GET /metrics` in Prometheus text format.
pub async fn metrics(State(state): State<AppState>) -> (StatusCode, String) {
    match state.metrics.encode() {
        Ok(body) => (StatusCode::OK, body),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}
