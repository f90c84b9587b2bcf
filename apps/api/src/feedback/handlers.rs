//! Axum route handlers for the Feedback API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::feedback::FeedbackEntry;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Feedback arrives either as a single entry or a batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeedbackSubmission {
    Batch(Vec<FeedbackEntry>),
    One(Box<FeedbackEntry>),
}

#[derive(Debug, Serialize)]
pub struct SubmitFeedbackResponse {
    pub accepted: usize,
    pub pairs_written: usize,
    pub examples_written: usize,
    pub total_feedback_seen: usize,
}

#[derive(Debug, Serialize)]
pub struct ListFeedbackResponse {
    pub count: usize,
    pub entries: Vec<FeedbackEntry>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub pairs_written: usize,
    pub examples_written: usize,
    pub total_feedback_seen: usize,
    pub dpo_path: String,
    pub sft_path: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/feedback
///
/// Appends the submitted entries to the durable log, then rebuilds both
/// datasets inline. The response reports what the rebuild produced.
pub async fn handle_submit_feedback(
    State(state): State<AppState>,
    Json(submission): Json<FeedbackSubmission>,
) -> Result<Json<SubmitFeedbackResponse>, AppError> {
    let entries: Vec<FeedbackEntry> = match submission {
        FeedbackSubmission::One(entry) => vec![*entry],
        FeedbackSubmission::Batch(entries) => entries,
    };
    if entries.is_empty() {
        return Err(AppError::Validation(
            "feedback batch cannot be empty".to_string(),
        ));
    }

    let report = state.feedback.submit(&entries).await?;
    info!(
        "accepted {} feedback entr{}, datasets now {} pair(s) / {} example(s)",
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" },
        report.pairs_written,
        report.examples_written
    );

    Ok(Json(SubmitFeedbackResponse {
        accepted: entries.len(),
        pairs_written: report.pairs_written,
        examples_written: report.examples_written,
        total_feedback_seen: report.total_feedback_seen,
    }))
}

/// GET /api/v1/feedback
///
/// Returns every well-formed entry in arrival order.
pub async fn handle_list_feedback(
    State(state): State<AppState>,
) -> Result<Json<ListFeedbackResponse>, AppError> {
    let entries = state.feedback.list().await?;
    Ok(Json(ListFeedbackResponse {
        count: entries.len(),
        entries,
    }))
}

/// POST /api/v1/feedback/export
///
/// Rebuilds both datasets from the full log and reports counts and locations.
pub async fn handle_export(
    State(state): State<AppState>,
) -> Result<Json<ExportResponse>, AppError> {
    let report = state.feedback.export().await?;
    Ok(Json(ExportResponse {
        pairs_written: report.pairs_written,
        examples_written: report.examples_written,
        total_feedback_seen: report.total_feedback_seen,
        dpo_path: state.feedback.dpo_path().display().to_string(),
        sft_path: state.feedback.sft_path().display().to_string(),
    }))
}
