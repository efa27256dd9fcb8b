//! Error-to-response mapping for the HTTP surface.
//!
//! Status codes are assigned here and nowhere else: validation and unknown
//! markets are the caller's fault (400), missing labels are 404, storage
//! outages are 500. Generation failures never reach this mapping in normal
//! operation because the fallback path absorbs them.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use labelforge_core::{LabelError, ValidationError};
use labelforge_store::StoreError;
use serde_json::json;

#[derive(Debug)]
pub struct ApiError(pub LabelError);

impl From<LabelError> for ApiError {
    fn from(err: LabelError) -> Self {
        ApiError(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(LabelError::Validation(err))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => {
                ApiError(LabelError::NotFound(format!("no label with id '{id}'")))
            }
            StoreError::Unavailable(msg) => ApiError(LabelError::Store(msg)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, violations) = match &self.0 {
            LabelError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                err.to_string(),
                Some(err.violations.clone()),
            ),
            LabelError::UnknownMarket(market) => (
                StatusCode::BAD_REQUEST,
                "UNKNOWN_MARKET",
                format!("unknown market code '{market}'"),
                None,
            ),
            LabelError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None)
            }
            LabelError::Generation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GENERATION_FAILURE",
                msg.clone(),
                None,
            ),
            LabelError::Store(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
                msg.clone(),
                None,
            ),
        };

        let mut body = json!({ "error": code, "message": message });
        if let Some(violations) = violations {
            body["violations"] = json!(violations);
        }
        (status, Json(body)).into_response()
    }
}
