//! Feedback collection and dataset curation.
//!
//! `FeedbackService` owns the append-only log and the dataset exporter
//! behind one async mutex: if the host ever serves requests concurrently,
//! appends and the full-file dataset rewrites stay serialized, so an export
//! never reads a log another request is mid-way through growing.

pub mod export;
pub mod handlers;
pub mod store;

use std::path::Path;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::errors::AppError;
use crate::feedback::export::{DatasetExporter, ExportReport};
use crate::feedback::store::FeedbackStore;
use crate::models::feedback::FeedbackEntry;

pub struct FeedbackService {
    store: FeedbackStore,
    exporter: DatasetExporter,
    lock: Mutex<()>,
}

impl FeedbackService {
    pub fn new(config: &Config) -> Self {
        Self {
            store: FeedbackStore::new(config.feedback_log_path()),
            exporter: DatasetExporter::new(config.dpo_dataset_path(), config.sft_dataset_path()),
            lock: Mutex::new(()),
        }
    }

    pub fn log_path(&self) -> &Path {
        self.store.path()
    }

    pub fn dpo_path(&self) -> &Path {
        self.exporter.dpo_path()
    }

    pub fn sft_path(&self) -> &Path {
        self.exporter.sft_path()
    }

    /// Appends the submitted entries, then rebuilds both datasets from the
    /// full log. Appended entries stay durable even when the rebuild fails;
    /// the failure is reported to this submission's caller.
    pub async fn submit(&self, entries: &[FeedbackEntry]) -> Result<ExportReport, AppError> {
        let _guard = self.lock.lock().await;
        for entry in entries {
            self.store
                .append(entry)
                .map_err(|e| AppError::Storage(format!("failed to append feedback: {e:#}")))?;
        }
        self.rebuild()
    }

    /// Rebuilds both datasets from the full log on explicit request.
    pub async fn export(&self) -> Result<ExportReport, AppError> {
        let _guard = self.lock.lock().await;
        self.rebuild()
    }

    /// Number of well-formed records. Reporting only.
    pub async fn count(&self) -> Result<usize, AppError> {
        let _guard = self.lock.lock().await;
        self.store
            .count()
            .map_err(|e| AppError::Storage(format!("failed to read feedback log: {e:#}")))
    }

    /// All well-formed entries in arrival order.
    pub async fn list(&self) -> Result<Vec<FeedbackEntry>, AppError> {
        let _guard = self.lock.lock().await;
        self.store
            .load_all()
            .map_err(|e| AppError::Storage(format!("failed to read feedback log: {e:#}")))
    }

    fn rebuild(&self) -> Result<ExportReport, AppError> {
        let entries = self
            .store
            .load_all()
            .map_err(|e| AppError::Storage(format!("failed to read feedback log: {e:#}")))?;
        self.exporter
            .export(&entries)
            .map_err(|e| AppError::Storage(format!("dataset export failed: {e:#}")))
    }
}
