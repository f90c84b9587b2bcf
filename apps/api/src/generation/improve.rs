//! Rule-based improvement pass used when no model is available.
//!
//! Each section has a static table of required-phrase checks. A check passes
//! when any of its phrases occurs in the text (case-insensitive substring);
//! failed checks contribute suggestion bullets appended below the original
//! text. Compliant text is returned unchanged.

use crate::models::section::SectionId;

/// One checklist row: the check passes when any listed phrase is present.
pub struct PhraseCheck {
    pub any_of: &'static [&'static str],
    pub suggestion: &'static str,
}

const LINE_242_CHECKS: &[PhraseCheck] = &[
    PhraseCheck {
        any_of: &["technological advancement"],
        suggestion: "Consider adding: 'The technological advancement sought was...'",
    },
    PhraseCheck {
        any_of: &["standard practice", "competent professional"],
        suggestion: "Consider adding: 'This could not be achieved through standard practice because...'",
    },
    PhraseCheck {
        any_of: &["state of technology", "baseline"],
        suggestion: "Consider adding: 'At the outset of this project, the state of technology was...'",
    },
];

const LINE_244_CHECKS: &[PhraseCheck] = &[
    PhraseCheck {
        any_of: &["it was uncertain"],
        suggestion: "Frame uncertainties as: 'It was uncertain whether...'",
    },
    PhraseCheck {
        any_of: &["competent professional"],
        suggestion: "Add: 'A competent professional could not resolve these through standard practice because...'",
    },
    PhraseCheck {
        any_of: &["hypothes"],
        suggestion: "Consider adding hypotheses: 'H1: ...'",
    },
];

const LINE_246_CHECKS: &[PhraseCheck] = &[
    PhraseCheck {
        any_of: &["systematic"],
        suggestion: "Add: 'A systematic investigation was conducted...'",
    },
    PhraseCheck {
        any_of: &["experiment", "test"],
        suggestion: "Describe specific experiments and tests performed",
    },
    PhraseCheck {
        any_of: &["iteration", "modif"],
        suggestion: "Describe iterations/modifications made based on results",
    },
];

pub fn checks_for(section: SectionId) -> &'static [PhraseCheck] {
    match section {
        SectionId::Line242 => LINE_242_CHECKS,
        SectionId::Line244 => LINE_244_CHECKS,
        SectionId::Line246 => LINE_246_CHECKS,
    }
}

/// Runs the section's checklist and appends a suggestions block when at
/// least one check failed.
pub fn apply_checklist(text: &str, section: SectionId) -> String {
    let lower = text.to_lowercase();
    let suggestions: Vec<&str> = checks_for(section)
        .iter()
        .filter(|check| !check.any_of.iter().any(|phrase| lower.contains(phrase)))
        .map(|check| check.suggestion)
        .collect();

    if suggestions.is_empty() {
        return text.to_string();
    }

    let mut out = String::from(text);
    out.push_str("\n\n--- SUGGESTED IMPROVEMENTS ---\n");
    for suggestion in suggestions {
        out.push_str(&format!("• {suggestion}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_has_three_checks() {
        for id in [SectionId::Line242, SectionId::Line244, SectionId::Line246] {
            assert_eq!(checks_for(id).len(), 3);
        }
    }

    #[test]
    fn test_compliant_242_text_unchanged() {
        let text = "The technological advancement sought was X. Standard practice failed. \
                    The state of technology was Y.";
        assert_eq!(apply_checklist(text, SectionId::Line242), text);
    }

    #[test]
    fn test_missing_phrases_append_suggestions() {
        let out = apply_checklist("We made the app faster.", SectionId::Line242);
        assert!(out.starts_with("We made the app faster."));
        assert!(out.contains("--- SUGGESTED IMPROVEMENTS ---"));
        assert!(out.contains("• Consider adding: 'The technological advancement sought was...'"));
        assert!(out.contains("state of technology"));
    }

    #[test]
    fn test_phrase_match_is_case_insensitive() {
        let out = apply_checklist(
            "IT WAS UNCERTAIN whether... A Competent Professional could not... Hypotheses: H1",
            SectionId::Line244,
        );
        assert!(!out.contains("SUGGESTED IMPROVEMENTS"));
    }

    #[test]
    fn test_any_of_alternatives_satisfy_a_check() {
        // "test" alone satisfies the experiments check for 246.
        let out = apply_checklist(
            "A systematic investigation ran a test and made modifications.",
            SectionId::Line246,
        );
        assert!(!out.contains("SUGGESTED IMPROVEMENTS"));
    }

    #[test]
    fn test_partial_compliance_appends_only_failed_rows() {
        let out = apply_checklist("A systematic investigation took place.", SectionId::Line246);
        assert!(!out.contains("• Add: 'A systematic investigation was conducted...'"));
        assert!(out.contains("• Describe specific experiments and tests performed"));
        assert!(out.contains("• Describe iterations/modifications made based on results"));
    }
}
