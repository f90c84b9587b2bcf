/// LLM Client: the single point of entry for all model calls in this service.
///
/// ARCHITECTURAL RULE: no other module may talk to the inference server
/// directly. All model interactions MUST go through this module.
///
/// The fine-tuned model is served by a local OpenAI-compatible inference
/// server (vLLM, llama.cpp server, or similar). Availability is decided by a
/// single probe at process start and never re-evaluated mid-session; a failed
/// request later does not flip the mode. Calls are single-attempt: a failure
/// is reported to the caller once, never retried here.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod prompts;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const MODELS_PATH: &str = "/v1/models";

/// Model calls may block for minutes on CPU-only hosts.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Per-call sampling knobs. Defaults match the fine-tuning setup.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference server error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned empty content")]
    EmptyContent,
}

/// The text-generation capability: given a system prompt and a user prompt,
/// produce text or fail. Carried in `AppState` behind `ModelState`.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        params: SamplingParams,
    ) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (OpenAI-compatible chat completions)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// InferenceClient
// ────────────────────────────────────────────────────────────────────────────

/// HTTP client for the local inference server hosting the fine-tuned model.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    model: String,
}

impl InferenceClient {
    pub fn new(base_url: &str, model: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// One-shot availability check against the server's models endpoint.
    pub async fn probe(&self) -> Result<(), LlmError> {
        let url = format!("{}{}", self.base_url, MODELS_PATH);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TextModel for InferenceClient {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        params: SamplingParams,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH);
        let response = self.client.post(&url).json(&request_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ChatResponse = response.json().await?;
        let text = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(LlmError::EmptyContent)?;

        debug!("model call succeeded ({} chars)", text.len());
        Ok(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ModelState
// ────────────────────────────────────────────────────────────────────────────

/// Availability of the text-generation capability, fixed at process start.
///
/// `Offline` carries the diagnostic reason surfaced via `/health`. Routing
/// never re-probes: an `Offline` process stays in template mode for its
/// lifetime, and a `Ready` process surfaces call failures without downgrading.
#[derive(Clone)]
pub enum ModelState {
    Ready(Arc<dyn TextModel>),
    Offline { reason: String },
}

impl ModelState {
    pub fn mode(&self) -> &'static str {
        match self {
            ModelState::Ready(_) => "ai",
            ModelState::Offline { .. } => "template",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ModelState::Ready(_) => None,
            ModelState::Offline { reason } => Some(reason),
        }
    }
}

/// Builds the process-lifetime `ModelState` from config: constructs the
/// client and probes it once. Any failure downgrades to template mode with
/// the failure recorded as the reason.
pub async fn startup_probe(config: &Config) -> ModelState {
    let Some(base_url) = config.model_url.as_deref() else {
        return ModelState::Offline {
            reason: "SRED_MODEL_URL is not set. Train a model and point SRED_MODEL_URL at its \
                     inference server to enable AI mode."
                .to_string(),
        };
    };

    let client = match InferenceClient::new(base_url, &config.model_name) {
        Ok(client) => client,
        Err(e) => {
            return ModelState::Offline {
                reason: format!("failed to build inference client: {e}"),
            }
        }
    };

    match client.probe().await {
        Ok(()) => ModelState::Ready(Arc::new(client)),
        Err(e) => ModelState::Offline {
            reason: format!("model server at {base_url} is unreachable: {e}"),
        },
    }
}
