//! Structured project facts submitted with a generation request.

use serde::{Deserialize, Serialize};

/// Free-text facts about an SR&ED project. Every field is optional; a missing
/// or blank field means the corresponding narrative clause is omitted, never
/// an error. Wire names are camelCase to match the client payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectFacts {
    pub title: Option<String>,
    pub field: Option<String>,
    pub objective: Option<String>,
    pub baseline: Option<String>,
    pub advancement: Option<String>,
    pub why_not_standard: Option<String>,
    pub uncertainties: Option<String>,
    pub why_uncertain: Option<String>,
    pub hypotheses: Option<String>,
    pub experiments: Option<String>,
    pub iterations: Option<String>,
    pub results: Option<String>,
    pub personnel: Option<String>,
}

/// Returns the trimmed value when the field carries any non-whitespace text.
pub fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_optional() {
        let facts: ProjectFacts = serde_json::from_str("{}").unwrap();
        assert!(facts.objective.is_none());
        assert!(facts.why_not_standard.is_none());
    }

    #[test]
    fn test_camel_case_wire_names() {
        let facts: ProjectFacts = serde_json::from_str(
            r#"{"whyNotStandard": "no published approach", "whyUncertain": "novel workload"}"#,
        )
        .unwrap();
        assert_eq!(facts.why_not_standard.as_deref(), Some("no published approach"));
        assert_eq!(facts.why_uncertain.as_deref(), Some("novel workload"));
    }

    #[test]
    fn test_non_empty_rejects_whitespace() {
        assert_eq!(non_empty(&Some("  ".to_string())), None);
        assert_eq!(non_empty(&Some(" x ".to_string())), Some("x"));
        assert_eq!(non_empty(&None), None);
    }
}
