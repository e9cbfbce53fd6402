use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::{handlers, AppState};

pub fn create_router(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Contract analysis
        .route(
            "/api/check-contract",
            post(handlers::check_contract).options(handlers::preflight),
        )
        .route(
            "/api/check-contract/narrative",
            post(handlers::check_contract_narrative).options(handlers::preflight),
        )

        // Static frontend
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}
