//! Prompt builders for the generation and improvement model calls.

use crate::models::project::{non_empty, ProjectFacts};
use crate::models::section::{SectionId, SectionSelector};

/// Request label when all three sections are generated in one call.
const ALL_SECTIONS_LABEL: &str = "all three sections (Lines 242, 244, and 246)";

/// Builds the generation prompt: the section request line followed by one
/// labeled line per present project fact. Title and industry always appear
/// (with `N/A` placeholders) so the model sees a stable frame; the remaining
/// facts are included only when non-blank.
pub fn build_generation_prompt(facts: &ProjectFacts, selector: SectionSelector) -> String {
    let requested = match selector.single() {
        Some(id) => id.prompt_label(),
        None => ALL_SECTIONS_LABEL,
    };

    let mut prompt = format!("Write a T661 {requested} for the following project:\n\n");
    prompt.push_str(&format!(
        "Project Title: {}\n",
        non_empty(&facts.title).unwrap_or("N/A")
    ));
    prompt.push_str(&format!(
        "Industry: {}\n",
        non_empty(&facts.field).unwrap_or("N/A")
    ));

    let labeled: [(&str, &Option<String>); 11] = [
        ("Objective", &facts.objective),
        ("Baseline Technology", &facts.baseline),
        ("Advancement Sought", &facts.advancement),
        ("Why Not Standard Practice", &facts.why_not_standard),
        ("Uncertainties", &facts.uncertainties),
        ("Why Uncertain", &facts.why_uncertain),
        ("Hypotheses", &facts.hypotheses),
        ("Experiments", &facts.experiments),
        ("Iterations", &facts.iterations),
        ("Results", &facts.results),
        ("Personnel", &facts.personnel),
    ];
    for (label, value) in labeled {
        if let Some(value) = non_empty(value) {
            prompt.push_str(&format!("{label}: {value}\n"));
        }
    }

    prompt
}

/// Wraps existing section text in the fixed improvement instruction.
pub fn build_improve_prompt(text: &str, section: SectionId) -> String {
    format!(
        "Improve the following T661 Line {} description to be more CRA-compliant. Fix any weak \
        language, add missing required elements, and ensure proper SR&ED terminology is used. \
        Keep the technical content accurate but strengthen the SR&ED compliance.\n\n\
        Original text:\n{text}\n\nImproved version:",
        section.number()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_requests_single_section_by_label() {
        let prompt = build_generation_prompt(&ProjectFacts::default(), SectionSelector::Line244);
        assert!(prompt.starts_with(
            "Write a T661 Line 244 (Scientific or Technological Uncertainty) for the following project:"
        ));
    }

    #[test]
    fn test_prompt_requests_all_sections() {
        let prompt = build_generation_prompt(&ProjectFacts::default(), SectionSelector::All);
        assert!(prompt.contains("all three sections (Lines 242, 244, and 246)"));
    }

    #[test]
    fn test_title_and_industry_default_to_na() {
        let prompt = build_generation_prompt(&ProjectFacts::default(), SectionSelector::All);
        assert!(prompt.contains("Project Title: N/A\n"));
        assert!(prompt.contains("Industry: N/A\n"));
    }

    #[test]
    fn test_absent_facts_are_omitted() {
        let facts = ProjectFacts {
            objective: Some("faster codec".to_string()),
            results: Some("   ".to_string()),
            ..ProjectFacts::default()
        };
        let prompt = build_generation_prompt(&facts, SectionSelector::All);
        assert!(prompt.contains("Objective: faster codec\n"));
        assert!(!prompt.contains("Results:"));
        assert!(!prompt.contains("Hypotheses:"));
    }

    #[test]
    fn test_improve_prompt_embeds_text_and_line_number() {
        let prompt = build_improve_prompt("Our team did stuff.", SectionId::Line246);
        assert!(prompt.contains("T661 Line 246 description"));
        assert!(prompt.contains("Original text:\nOur team did stuff."));
        assert!(prompt.ends_with("Improved version:"));
    }
}
