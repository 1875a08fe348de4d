use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use weather_core::ViewModel;

use crate::{error::ApiError, state::AppState};

const RENDER_FAILED_PAGE: &str = "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<title>Weather</title></head><body><h2>Something went wrong</h2>\
<p role=\"alert\">An error occurred processing your request</p></body></html>";

#[derive(Debug, Default, Deserialize)]
pub struct LocationParams {
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/weather", get(weather_json))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The weather page. A failed lookup still renders the page, with the error status.
async fn index(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> (StatusCode, Html<String>) {
    let view_state = state.service.lookup(params.location.as_deref()).await;

    let status = view_state
        .error()
        .map_or(StatusCode::OK, |err| ApiError::from(err.clone()).status());

    page_response(status, state.renderer.page(&view_state))
}

/// The page route answers in HTML even when the template itself fails.
fn page_response(
    status: StatusCode,
    rendered: Result<String, tera::Error>,
) -> (StatusCode, Html<String>) {
    match rendered {
        Ok(html) => (status, Html(html)),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render weather page");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(RENDER_FAILED_PAGE.to_string()))
        }
    }
}

async fn weather_json(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> Result<Json<ViewModel>, ApiError> {
    match state.service.lookup(params.location.as_deref()).await.into_result() {
        Some(Ok(view)) => Ok(Json(view)),
        Some(Err(err)) => Err(err.into()),
        None => Err(ApiError::Internal("lookup did not complete".to_string())),
    }
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
