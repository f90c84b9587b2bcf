pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::feedback::handlers as feedback_handlers;
use crate::generation::handlers as generation_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        // Generation API
        .route(
            "/api/v1/generate",
            post(generation_handlers::handle_generate),
        )
        .route("/api/v1/improve", post(generation_handlers::handle_improve))
        // Feedback API
        .route(
            "/api/v1/feedback",
            post(feedback_handlers::handle_submit_feedback)
                .get(feedback_handlers::handle_list_feedback),
        )
        .route(
            "/api/v1/feedback/export",
            post(feedback_handlers::handle_export),
        )
        .with_state(state)
}
