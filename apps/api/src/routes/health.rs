use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, the generation mode fixed at startup, and the
/// model probe failure reason when running in template mode.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "sred-api",
        "mode": state.model.mode(),
        "model_error": state.model.error(),
    }))
}

/// GET /
/// Service banner with an endpoint directory.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "name": "SR&ED Report API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /health": "Server and model status",
            "POST /api/v1/generate": "Generate T661 descriptions",
            "POST /api/v1/improve": "Improve existing T661 text",
            "POST /api/v1/feedback": "Submit paragraph or word feedback",
            "GET /api/v1/feedback": "List all recorded feedback",
            "POST /api/v1/feedback/export": "Rebuild the DPO/SFT datasets",
        },
    }))
}
