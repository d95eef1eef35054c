use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    config::Config,
    lookup::{LookupResponse, LookupService},
};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub lookup: Arc<LookupService>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    // An absent `q` searches for the empty string.
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub cache_backend: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache_backend: state.lookup.cache_backend().to_string(),
    })
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<LookupResponse>, StatusCode> {
    match state
        .lookup
        .lookup_with_deadline(&params.q, state.config.lookup_timeout())
        .await
    {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!(query = %params.q, error = %e, "Lookup failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api", get(search))
        .with_state(state)
}
