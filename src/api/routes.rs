//! Axum application: API endpoints and health.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use super::webhooks;
use crate::core::message::{Message, PipelineResult};
use crate::errors::AgentError;
use crate::router::AgentRouter;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<AgentRouter>,
}

/// Builds the application router with permissive CORS.
pub fn build_app(state: AppState) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    axum::Router::new()
        .route("/health", get(health))
        .route("/api/v1/content/create", post(create_content))
        .route("/api/v1/trip/customize", post(customize_trip))
        .route("/webhook/whatsapp", post(webhooks::whatsapp))
        .route("/webhook/telegram", post(webhooks::telegram))
        .layer(cors)
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    pub content_url: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub schedule_time: Option<String>,
}

/// Accepts the request and runs the pipeline detached. The reply only
/// acknowledges receipt; the spawned task's outcome is logged and cannot be
/// queried or cancelled.
async fn create_content(
    State(state): State<AppState>,
    Json(request): Json<CreateContentRequest>,
) -> Json<Value> {
    let mut message = Message::content_creation(&request.content_url);
    if let Some(platform) = &request.platform {
        message = message.with_field("platform", Value::String(platform.clone()));
    }
    if let Some(schedule_time) = &request.schedule_time {
        message = message.with_field("schedule_time", Value::String(schedule_time.clone()));
    }

    let router = state.router.clone();
    tokio::spawn(async move {
        let result = router.dispatch(&message).await;
        match &result.error {
            None => info!("Detached content pipeline finished"),
            Some(e) => error!(kind = e.kind(), "Detached content pipeline failed: {}", e),
        }
    });

    Json(json!({
        "status": "processing",
        "message": "Content creation initiated",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CustomizeTripRequest {
    pub tour_id: String,
    #[serde(default)]
    pub customization_needs: Map<String, Value>,
}

async fn customize_trip(
    State(state): State<AppState>,
    Json(request): Json<CustomizeTripRequest>,
) -> Response {
    let message = Message::trip_customization(&request.tour_id, request.customization_needs);
    let result = state.router.dispatch(&message).await;
    (status_for(&result), Json(result)).into_response()
}

/// Maps the envelope's failure kind to an HTTP status. Caller mistakes are
/// 4xx; upstream stage failures are gateway errors.
pub(crate) fn status_for(result: &PipelineResult) -> StatusCode {
    match &result.error {
        None => StatusCode::OK,
        Some(AgentError::Validation(_)) => StatusCode::BAD_REQUEST,
        Some(AgentError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(AgentError::Routing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        Some(_) => StatusCode::BAD_GATEWAY,
    }
}
