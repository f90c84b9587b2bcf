//! Axum route handlers for the Generation API.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{generate, improve};
use crate::llm_client::SamplingParams;
use crate::models::project::ProjectFacts;
use crate::models::section::{SectionId, SectionSelector};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub section: SectionSelector,
    #[serde(default)]
    pub project: ProjectFacts,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Correlates this generation with later feedback submissions.
    pub generation_id: Uuid,
    pub mode: &'static str,
    pub sections: BTreeMap<SectionId, String>,
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub text: String,
    #[serde(default = "default_improve_section")]
    pub section: SectionId,
}

fn default_improve_section() -> SectionId {
    SectionId::Line242
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    pub mode: &'static str,
    pub improved: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate
///
/// Generates the requested T661 sections from project facts, via the model
/// when one is loaded, otherwise from templates.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let defaults = SamplingParams::default();
    let params = SamplingParams {
        max_tokens: request.max_tokens.unwrap_or(defaults.max_tokens),
        temperature: request.temperature.unwrap_or(defaults.temperature),
    };

    let outcome = generate(&state.model, &request.project, request.section, params).await?;

    let generation_id = Uuid::new_v4();
    info!(
        "generated {:?} as {} ({} section(s), id {generation_id})",
        request.section,
        outcome.mode,
        outcome.sections.len()
    );

    Ok(Json(GenerateResponse {
        generation_id,
        mode: outcome.mode,
        sections: outcome.sections,
    }))
}

/// POST /api/v1/improve
///
/// Rewrites (AI) or annotates (template checklist) existing section text.
/// An empty `text` fails validation before anything else runs.
pub async fn handle_improve(
    State(state): State<AppState>,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let (mode, improved) = improve(&state.model, &request.text, request.section).await?;

    Ok(Json(ImproveResponse { mode, improved }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_defaults() {
        let request: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.section, SectionSelector::All);
        assert!(request.project.objective.is_none());
        assert!(request.max_tokens.is_none());
    }

    #[test]
    fn test_generate_request_full_deserialization() {
        let request: GenerateRequest = serde_json::from_str(
            r#"{
                "section": "242",
                "project": {"objective": "a faster planner", "whyNotStandard": "none existed"},
                "max_tokens": 512,
                "temperature": 0.2
            }"#,
        )
        .unwrap();
        assert_eq!(request.section, SectionSelector::Line242);
        assert_eq!(request.project.objective.as_deref(), Some("a faster planner"));
        assert_eq!(request.max_tokens, Some(512));
    }

    #[test]
    fn test_improve_request_section_defaults_to_242() {
        let request: ImproveRequest =
            serde_json::from_str(r#"{"text": "Some description."}"#).unwrap();
        assert_eq!(request.section, SectionId::Line242);
    }

    #[test]
    fn test_improve_request_accepts_bare_section_number() {
        let request: ImproveRequest =
            serde_json::from_str(r#"{"text": "x", "section": "246"}"#).unwrap();
        assert_eq!(request.section, SectionId::Line246);
    }
}
