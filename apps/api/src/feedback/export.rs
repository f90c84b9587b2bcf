//! Dataset export: turns the raw feedback log into DPO preference pairs and
//! SFT supervised examples.
//!
//! Both datasets are pure views over the log, recomputed from scratch and
//! fully rewritten on every export. Rerunning with an unchanged log produces
//! byte-identical files, so exports are idempotent and safe under replays.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::llm_client::prompts::SYSTEM_PROMPT;
use crate::models::feedback::{FeedbackEntry, FeedbackKind, Rating};
use crate::models::section::SectionId;

/// A ranked preference between two candidate outputs for the same prompt.
#[derive(Debug, Clone, Serialize)]
pub struct PreferencePair {
    pub prompt: String,
    pub chosen: String,
    pub rejected: String,
}

/// An instruction-tuning row in Axolotl style.
#[derive(Debug, Clone, Serialize)]
pub struct SupervisedExample {
    pub system: String,
    pub instruction: String,
    pub output: String,
}

/// Counts returned to the caller of an export.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExportReport {
    pub pairs_written: usize,
    pub examples_written: usize,
    pub total_feedback_seen: usize,
}

/// Rating texts and avoid-words accumulated for one (generation, section) key.
#[derive(Default)]
struct SectionGroup {
    up: Vec<String>,
    down: Vec<String>,
    avoid: BTreeSet<String>,
}

pub struct DatasetExporter {
    dpo_path: PathBuf,
    sft_path: PathBuf,
}

impl DatasetExporter {
    pub fn new(dpo_path: PathBuf, sft_path: PathBuf) -> Self {
        Self { dpo_path, sft_path }
    }

    pub fn dpo_path(&self) -> &Path {
        &self.dpo_path
    }

    pub fn sft_path(&self) -> &Path {
        &self.sft_path
    }

    /// Recomputes both datasets from the full log and overwrites the output
    /// files.
    pub fn export(&self, entries: &[FeedbackEntry]) -> Result<ExportReport> {
        let (pairs, examples) = build_datasets(entries);
        write_jsonl(&self.dpo_path, &pairs)?;
        write_jsonl(&self.sft_path, &examples)?;
        Ok(ExportReport {
            pairs_written: pairs.len(),
            examples_written: examples.len(),
            total_feedback_seen: entries.len(),
        })
    }
}

/// Groups feedback by (generation, section) and derives the two datasets.
///
/// A group emits a PreferencePair only when it saw both an up and a down
/// paragraph, and a SupervisedExample whenever it saw at least one up,
/// independent of pairing. Groups are emitted in first-arrival order; texts
/// within a group keep arrival order.
fn build_datasets(entries: &[FeedbackEntry]) -> (Vec<PreferencePair>, Vec<SupervisedExample>) {
    let mut order: Vec<(String, SectionId)> = Vec::new();
    let mut groups: HashMap<(String, SectionId), SectionGroup> = HashMap::new();

    for entry in entries {
        let key = (entry.generation_id.clone(), entry.section);
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        let group = groups.entry(key).or_default();

        match entry.kind {
            FeedbackKind::Paragraph => {
                // A paragraph rating is unusable without its text and verdict.
                let text = entry.para_text.as_deref().map(str::trim);
                let (Some(text), Some(rating)) = (text.filter(|t| !t.is_empty()), entry.rating)
                else {
                    continue;
                };
                match rating {
                    Rating::Up => group.up.push(text.to_string()),
                    Rating::Down => group.down.push(text.to_string()),
                }
            }
            FeedbackKind::Word => {
                if let Some(word) = entry.word.as_deref().map(str::trim) {
                    if !word.is_empty() {
                        group.avoid.insert(word.to_string());
                    }
                }
            }
        }
    }

    let mut pairs = Vec::new();
    let mut examples = Vec::new();

    for key in &order {
        let group = &groups[key];
        let prompt = build_prompt(key.1, &group.avoid);

        if !group.up.is_empty() && !group.down.is_empty() {
            pairs.push(PreferencePair {
                prompt: prompt.clone(),
                chosen: group.up.join("\n\n"),
                rejected: group.down.join("\n\n"),
            });
        }

        if !group.up.is_empty() {
            examples.push(SupervisedExample {
                system: SYSTEM_PROMPT.to_string(),
                instruction: prompt,
                output: group.up.join("\n\n"),
            });
        }
    }

    (pairs, examples)
}

/// The training prompt for a group. Avoid-words are sorted so that reruns
/// over the same log produce identical files.
fn build_prompt(section: SectionId, avoid: &BTreeSet<String>) -> String {
    let mut prompt = format!("Write a T661 {} description.", section.prompt_label());
    if !avoid.is_empty() {
        let words: Vec<&str> = avoid.iter().map(String::as_str).collect();
        prompt.push_str(&format!(
            " Avoid using the following words: {}.",
            words.join(", ")
        ));
    }
    prompt
}

fn write_jsonl<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut buf = String::new();
    for row in rows {
        buf.push_str(&serde_json::to_string(row).context("failed to serialize dataset row")?);
        buf.push('\n');
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, buf).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn para(generation_id: &str, section: &str, text: &str, rating: &str) -> FeedbackEntry {
        serde_json::from_value(serde_json::json!({
            "generationId": generation_id,
            "section": section,
            "paraText": text,
            "rating": rating,
        }))
        .unwrap()
    }

    fn word(generation_id: &str, section: &str, word: &str) -> FeedbackEntry {
        serde_json::from_value(serde_json::json!({
            "generationId": generation_id,
            "section": section,
            "type": "word",
            "word": word,
        }))
        .unwrap()
    }

    fn exporter_in(dir: &TempDir) -> DatasetExporter {
        DatasetExporter::new(
            dir.path().join("dpo_pairs.jsonl"),
            dir.path().join("sft_examples.jsonl"),
        )
    }

    #[test]
    fn test_pairing_two_up_one_down() {
        let entries = vec![
            para("g1", "242", "strong paragraph", "up"),
            para("g1", "242", "weak paragraph", "down"),
            para("g1", "242", "another strong one", "up"),
        ];
        let (pairs, examples) = build_datasets(&entries);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].chosen, "strong paragraph\n\nanother strong one");
        assert_eq!(pairs[0].rejected, "weak paragraph");

        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].output, pairs[0].chosen);
        assert_eq!(examples[0].system, SYSTEM_PROMPT);
    }

    #[test]
    fn test_up_only_group_yields_example_but_no_pair() {
        let entries = vec![
            para("g1", "244", "good", "up"),
            para("g1", "244", "also good", "up"),
        ];
        let (pairs, examples) = build_datasets(&entries);
        assert!(pairs.is_empty());
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].output, "good\n\nalso good");
    }

    #[test]
    fn test_down_only_group_yields_nothing() {
        let entries = vec![para("g1", "242", "bad", "down")];
        let (pairs, examples) = build_datasets(&entries);
        assert!(pairs.is_empty());
        assert!(examples.is_empty());
    }

    #[test]
    fn test_groups_are_keyed_by_generation_and_section() {
        let entries = vec![
            para("g1", "242", "a-up", "up"),
            para("g1", "244", "b-down", "down"),
            para("g2", "242", "c-up", "up"),
            para("g2", "242", "c-down", "down"),
        ];
        let (pairs, examples) = build_datasets(&entries);
        // Only (g2, 242) has both ratings.
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].chosen, "c-up");
        // (g1, 242) and (g2, 242) each have an up.
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].output, "a-up");
    }

    #[test]
    fn test_avoid_words_deduplicated_sorted_in_prompt() {
        let entries = vec![
            para("g1", "246", "solid work description", "up"),
            word("g1", "246", "synergy"),
            word("g1", "246", "leverage"),
            word("g1", "246", "synergy"),
        ];
        let (_, examples) = build_datasets(&entries);
        assert_eq!(
            examples[0].instruction,
            "Write a T661 Line 246 (Work Performed) description. \
             Avoid using the following words: leverage, synergy."
        );
    }

    #[test]
    fn test_word_feedback_in_other_section_does_not_leak() {
        let entries = vec![
            para("g1", "242", "text", "up"),
            word("g1", "244", "robustly"),
        ];
        let (_, examples) = build_datasets(&entries);
        assert_eq!(
            examples[0].instruction,
            "Write a T661 Line 242 (Scientific or Technological Advancement) description."
        );
    }

    #[test]
    fn test_paragraph_without_text_or_rating_is_skipped() {
        let no_rating: FeedbackEntry = serde_json::from_value(serde_json::json!({
            "generationId": "g1", "section": "242", "paraText": "text"
        }))
        .unwrap();
        let no_text: FeedbackEntry = serde_json::from_value(serde_json::json!({
            "generationId": "g1", "section": "242", "rating": "up"
        }))
        .unwrap();
        let (pairs, examples) = build_datasets(&[no_rating, no_text]);
        assert!(pairs.is_empty());
        assert!(examples.is_empty());
    }

    #[test]
    fn test_export_is_idempotent_byte_for_byte() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter_in(&dir);
        let entries = vec![
            para("g1", "242", "keep this", "up"),
            para("g1", "242", "drop this", "down"),
            word("g1", "242", "utilize"),
        ];

        exporter.export(&entries).unwrap();
        let dpo_first = fs::read(exporter.dpo_path()).unwrap();
        let sft_first = fs::read(exporter.sft_path()).unwrap();

        exporter.export(&entries).unwrap();
        assert_eq!(fs::read(exporter.dpo_path()).unwrap(), dpo_first);
        assert_eq!(fs::read(exporter.sft_path()).unwrap(), sft_first);
    }

    #[test]
    fn test_export_overwrites_stale_content() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter_in(&dir);

        exporter
            .export(&[
                para("g1", "242", "up text", "up"),
                para("g1", "242", "down text", "down"),
            ])
            .unwrap();
        assert!(!fs::read_to_string(exporter.dpo_path()).unwrap().is_empty());

        // Derived views shrink when the log they are rebuilt from does.
        let report = exporter.export(&[]).unwrap();
        assert_eq!(report.pairs_written, 0);
        assert_eq!(report.examples_written, 0);
        assert!(fs::read_to_string(exporter.dpo_path()).unwrap().is_empty());
    }

    #[test]
    fn test_report_counts() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter_in(&dir);
        let entries = vec![
            para("g1", "242", "a", "up"),
            para("g1", "242", "b", "down"),
            para("g2", "244", "c", "up"),
            word("g2", "244", "very"),
        ];
        let report = exporter.export(&entries).unwrap();
        assert_eq!(report.pairs_written, 1);
        assert_eq!(report.examples_written, 2);
        assert_eq!(report.total_feedback_seen, 4);
    }

    #[test]
    fn test_output_is_one_json_object_per_line() {
        let dir = TempDir::new().unwrap();
        let exporter = exporter_in(&dir);
        exporter
            .export(&[
                para("g1", "242", "a", "up"),
                para("g2", "244", "b", "up"),
            ])
            .unwrap();
        let sft = fs::read_to_string(exporter.sft_path()).unwrap();
        assert_eq!(sft.lines().count(), 2);
        for line in sft.lines() {
            let row: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(row.get("instruction").is_some());
            assert!(row.get("output").is_some());
        }
    }
}
