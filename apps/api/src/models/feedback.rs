//! Feedback records appended to the durable log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::section::SectionId;

/// Kind of a feedback entry. An entry that does not explicitly declare
/// `"type": "word"` is treated as paragraph feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    #[default]
    Paragraph,
    Word,
}

/// Paragraph-level verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Up,
    Down,
}

/// One rating event, as submitted by the client and as stored on disk
/// (one JSON object per log line, arrival order, never rewritten).
///
/// Paragraph entries carry `para_text`, `full_section_text`, and `rating`;
/// word entries carry `word`. The store does not validate the combination;
/// the exporter skips entries it cannot use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub generation_id: String,
    pub section: SectionId,
    #[serde(rename = "type", default)]
    pub kind: FeedbackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub para_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_section_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default = "Utc::now")]
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_type_defaults_to_paragraph() {
        let entry: FeedbackEntry = serde_json::from_str(
            r#"{"generationId": "g1", "section": "242", "paraText": "p", "rating": "up"}"#,
        )
        .unwrap();
        assert_eq!(entry.kind, FeedbackKind::Paragraph);
        assert_eq!(entry.rating, Some(Rating::Up));
        assert_eq!(entry.section, SectionId::Line242);
    }

    #[test]
    fn test_word_entry_deserializes() {
        let entry: FeedbackEntry = serde_json::from_str(
            r#"{"generationId": "g1", "section": "246", "type": "word", "word": "leverage"}"#,
        )
        .unwrap();
        assert_eq!(entry.kind, FeedbackKind::Word);
        assert_eq!(entry.word.as_deref(), Some("leverage"));
        assert!(entry.rating.is_none());
    }

    #[test]
    fn test_round_trips_through_log_line() {
        let entry: FeedbackEntry = serde_json::from_str(
            r#"{"generationId": "g2", "section": "244", "paraText": "p", "fullSectionText": "full", "rating": "down"}"#,
        )
        .unwrap();
        let line = serde_json::to_string(&entry).unwrap();
        let back: FeedbackEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back.generation_id, "g2");
        assert_eq!(back.rating, Some(Rating::Down));
        assert_eq!(back.full_section_text.as_deref(), Some("full"));
    }

    #[test]
    fn test_absent_option_fields_not_serialized() {
        let entry: FeedbackEntry = serde_json::from_str(
            r#"{"generationId": "g1", "section": "242", "type": "word", "word": "synergy"}"#,
        )
        .unwrap();
        let line = serde_json::to_string(&entry).unwrap();
        assert!(!line.contains("paraText"));
        assert!(!line.contains("rating"));
    }
}
