//! Generation routing: AI model vs deterministic templates.
//!
//! The route is decided solely by the process-lifetime `ModelState`. Once the
//! AI path is chosen for a request, a model failure surfaces to the caller;
//! there is no silent downgrade to templates and the state is not flipped.

use std::collections::BTreeMap;

use tracing::info;

use crate::errors::AppError;
use crate::generation::improve::apply_checklist;
use crate::generation::prompts::{build_generation_prompt, build_improve_prompt};
use crate::generation::template;
use crate::llm_client::prompts::SYSTEM_PROMPT;
use crate::llm_client::{ModelState, SamplingParams};
use crate::models::project::ProjectFacts;
use crate::models::section::{SectionId, SectionSelector};

/// Temperature for improvement calls; lower than generation to keep the
/// model close to the submitted text.
const IMPROVE_TEMPERATURE: f32 = 0.5;

/// Result of a generation or improvement request: which path produced it and
/// the per-section text.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub mode: &'static str,
    pub sections: BTreeMap<SectionId, String>,
}

/// Generates the requested sections from project facts.
pub async fn generate(
    model: &ModelState,
    facts: &ProjectFacts,
    selector: SectionSelector,
    params: SamplingParams,
) -> Result<GenerationOutcome, AppError> {
    match model {
        ModelState::Ready(model) => {
            let prompt = build_generation_prompt(facts, selector);
            let reply = model
                .complete(SYSTEM_PROMPT, &prompt, params)
                .await
                .map_err(|e| AppError::Llm(format!("generation failed: {e}")))?;

            let sections = match selector.single() {
                Some(id) => BTreeMap::from([(id, reply.trim().to_string())]),
                None => split_sections(&reply),
            };
            Ok(GenerationOutcome {
                mode: "ai",
                sections,
            })
        }
        ModelState::Offline { .. } => {
            info!("model offline, composing {:?} from templates", selector);
            Ok(GenerationOutcome {
                mode: "template",
                sections: template::compose(facts, selector),
            })
        }
    }
}

/// Improves existing section text: model rewrite when available, otherwise
/// the phrase checklist appends suggestions.
pub async fn improve(
    model: &ModelState,
    text: &str,
    section: SectionId,
) -> Result<(&'static str, String), AppError> {
    match model {
        ModelState::Ready(model) => {
            let prompt = build_improve_prompt(text, section);
            let params = SamplingParams {
                temperature: IMPROVE_TEMPERATURE,
                ..SamplingParams::default()
            };
            let improved = model
                .complete(SYSTEM_PROMPT, &prompt, params)
                .await
                .map_err(|e| AppError::Llm(format!("improvement failed: {e}")))?;
            Ok(("ai", improved))
        }
        ModelState::Offline { .. } => Ok(("template", apply_checklist(text, section))),
    }
}

/// Partitions a combined model reply into the three sections by locating the
/// literal markers `LINE 242`, `LINE 244`, `LINE 246` in that order.
///
/// Strict contract: all three markers must appear in order. When any marker
/// is missing, or a later marker only appears before an earlier one, the
/// entire reply is returned under `line242` alone. Text preceding the first
/// marker stays attached to the 242 part.
pub fn split_sections(reply: &str) -> BTreeMap<SectionId, String> {
    let in_order = || {
        let start_242 = reply.find(SectionId::Line242.marker())?;
        let start_244 = reply[start_242..]
            .find(SectionId::Line244.marker())
            .map(|i| i + start_242)?;
        let start_246 = reply[start_244..]
            .find(SectionId::Line246.marker())
            .map(|i| i + start_244)?;
        Some((start_244, start_246))
    };

    match in_order() {
        Some((start_244, start_246)) => BTreeMap::from([
            (SectionId::Line242, reply[..start_244].trim().to_string()),
            (
                SectionId::Line244,
                reply[start_244..start_246].trim().to_string(),
            ),
            (SectionId::Line246, reply[start_246..].trim().to_string()),
        ]),
        None => BTreeMap::from([(SectionId::Line242, reply.trim().to_string())]),
    }
}
