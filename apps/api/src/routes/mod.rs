pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::evaluation::handlers as evaluation;
use crate::positions::handlers as positions;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Positions API
        .route("/api/v1/positions", get(positions::handle_list_positions))
        .route("/api/v1/positions/:key", get(positions::handle_get_position))
        // Evaluation API
        .route("/api/v1/evaluations", post(evaluation::handle_evaluate))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
