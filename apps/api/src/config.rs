use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default: the service boots with zero configuration
/// in template mode, writing under `./data`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the inference server hosting the fine-tuned model.
    /// Unset means template mode for the process lifetime.
    pub model_url: Option<String>,
    pub model_name: String,
    /// Directory for the feedback log and the exported datasets.
    pub data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            model_url: std::env::var("SRED_MODEL_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            model_name: std::env::var("SRED_MODEL_NAME")
                .unwrap_or_else(|_| "sred-mistral-7b-qlora".to_string()),
            data_dir: std::env::var("SRED_DATA_DIR")
                .unwrap_or_else(|_| "./data".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn feedback_log_path(&self) -> PathBuf {
        self.data_dir.join("feedback.jsonl")
    }

    pub fn dpo_dataset_path(&self) -> PathBuf {
        self.data_dir.join("dpo_pairs.jsonl")
    }

    pub fn sft_dataset_path(&self) -> PathBuf {
        self.data_dir.join("sft_examples.jsonl")
    }
}
