//! Append-only feedback log: one JSON record per line, arrival order.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::models::feedback::FeedbackEntry;

/// Durable log of feedback entries. Records are appended, never rewritten or
/// deleted in place; the log is the sole source of truth for the datasets.
pub struct FeedbackStore {
    path: PathBuf,
}

impl FeedbackStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry, creating the directory and file on first use.
    /// A full line is written in a single call so concurrent appends cannot
    /// interleave partial records. No validation happens here.
    pub fn append(&self, entry: &FeedbackEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut line = serde_json::to_string(entry).context("failed to serialize feedback entry")?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .context("failed to append feedback entry")?;
        Ok(())
    }

    /// Full scan in arrival order. Lines that fail to parse are dropped with
    /// a warning; a missing file reads as an empty log.
    pub fn load_all(&self) -> Result<Vec<FeedbackEntry>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read {}", self.path.display()))
            }
        };

        let mut entries = Vec::new();
        for (index, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<FeedbackEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(
                    "skipping corrupt feedback record at line {}: {e}",
                    index + 1
                ),
            }
        }
        Ok(entries)
    }

    /// Number of well-formed records. Reporting only.
    pub fn count(&self) -> Result<usize> {
        Ok(self.load_all()?.len())
    }
}
