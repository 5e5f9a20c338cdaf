pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Interview pack API
        .route(
            "/api/generate-questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/generate-questions/upload",
            post(handlers::handle_upload_resume),
        )
        // Browser client
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
