use std::sync::Arc;

use crate::config::Config;
use crate::feedback::FeedbackService;
use crate::llm_client::ModelState;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text-generation capability, decided once at startup.
    pub model: ModelState,
    /// Feedback log plus dataset exporter behind a single lock.
    pub feedback: Arc<FeedbackService>,
    pub config: Config,
}
