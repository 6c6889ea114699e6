//! HTTP surface: `POST /fuse` and `GET /health`
//!
//! Thin axum layer over the fusion engine. Length violations and upstream
//! failures both map to 502 but carry distinct error kinds so callers can
//! tell backend unavailability from prompt non-compliance.

use crate::engine::FusionEngine;
use crate::models::{FusionRequest, FusionResult, HealthResponse};
use crate::Error;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            Error::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Error::LengthViolation { .. } => (StatusCode::BAD_GATEWAY, "length_violation"),
            _ => (StatusCode::BAD_GATEWAY, "upstream_failure"),
        };

        let body = ErrorBody {
            error: kind.to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application router around a shared engine.
pub fn router(engine: Arc<FusionEngine>) -> Router {
    Router::new()
        .route("/fuse", post(fuse_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

async fn fuse_handler(
    State(engine): State<Arc<FusionEngine>>,
    Json(request): Json<FusionRequest>,
) -> Result<Json<FusionResult>, ApiError> {
    let result = engine.fuse(&request).await?;
    Ok(Json(result))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
