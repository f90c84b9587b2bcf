//! Template composition: deterministic fallback generation of the three T661
//! narrative sections from structured project facts.
//!
//! Pure functions, no I/O. Each section is a fixed prose skeleton; clauses
//! backed by absent or blank facts are omitted rather than rendered empty.

use std::collections::BTreeMap;

use crate::generation::sanitize::{split_items, strip_hypothesis_label};
use crate::models::project::{non_empty, ProjectFacts};
use crate::models::section::{SectionId, SectionSelector};

/// Composes the requested sections. `All` yields all three keys; a single
/// selector yields exactly that key.
pub fn compose(facts: &ProjectFacts, selector: SectionSelector) -> BTreeMap<SectionId, String> {
    selector
        .sections()
        .iter()
        .map(|&id| {
            let text = match id {
                SectionId::Line242 => advancement(facts),
                SectionId::Line244 => uncertainty(facts),
                SectionId::Line246 => work_performed(facts),
            };
            (id, text)
        })
        .collect()
}

/// Line 242: objective, baseline technology, advancement sought, and the
/// standard-practice rebuttal, in that order.
fn advancement(facts: &ProjectFacts) -> String {
    let mut out = format!("{}\n\n", SectionId::Line242.header());
    let field = non_empty(&facts.field).unwrap_or("technology");

    match non_empty(&facts.objective) {
        Some(objective) => out.push_str(&format!(
            "The objective of this project was to achieve a technological advancement in the field of {field} through {}.\n\n",
            trim_trailing_periods(objective)
        )),
        None => out.push_str(&format!(
            "The objective of this project was to achieve a technological advancement in the field of {field}.\n\n"
        )),
    }

    if let Some(baseline) = non_empty(&facts.baseline) {
        out.push_str(&format!(
            "At the outset of this project, the state of technology was as follows: {baseline}\n\n"
        ));
    }

    if let Some(advancement) = non_empty(&facts.advancement) {
        out.push_str(&format!(
            "The technological advancement sought was {}.\n\n",
            trim_trailing_periods(advancement)
        ));
    }

    if let Some(why) = non_empty(&facts.why_not_standard) {
        out.push_str(&format!(
            "This advancement could not be achieved through standard practice because {}. \
            A competent professional in the field would not have been able to achieve this \
            advancement using existing knowledge, publicly available information, or standard \
            industry methodologies.",
            trim_trailing_periods(why)
        ));
    }

    out.trim().to_string()
}

/// Line 244: fixed preamble, enumerated uncertainties, why standard practice
/// could not resolve them, and labeled hypotheses.
fn uncertainty(facts: &ProjectFacts) -> String {
    let mut out = format!("{}\n\n", SectionId::Line244.header());
    out.push_str(
        "At the commencement of this project, the following technological uncertainties existed \
        that could not be resolved by a competent professional in the field using standard \
        practice, publicly available knowledge, or existing technical literature:\n\n",
    );

    if let Some(uncertainties) = non_empty(&facts.uncertainties) {
        for (i, item) in split_items(uncertainties).iter().enumerate() {
            // Inject the framing phrase unless the line already carries it.
            let clause = if item.to_lowercase().starts_with("it was uncertain") {
                item.clone()
            } else {
                format!("it was uncertain {item}")
            };
            out.push_str(&format!("{}. {}\n\n", i + 1, capitalize_first(&clause)));
        }
    }

    if let Some(why) = non_empty(&facts.why_uncertain) {
        out.push_str(&format!(
            "These uncertainties could not be resolved by a competent professional through \
            standard practice because {}.\n\n",
            trim_trailing_periods(why)
        ));
    }

    if let Some(hypotheses) = non_empty(&facts.hypotheses) {
        out.push_str("To address these uncertainties, the following hypotheses were formulated:\n\n");
        for (i, item) in split_items(hypotheses).iter().enumerate() {
            out.push_str(&format!("H{}: {}\n", i + 1, strip_hypothesis_label(item)));
        }
    }

    out.trim().to_string()
}

/// Line 246: investigation summary, experiment and iteration bullet lists,
/// results, and the fixed closing compliance sentence.
fn work_performed(facts: &ProjectFacts) -> String {
    let mut out = format!("{}\n\n", SectionId::Line246.header());

    match non_empty(&facts.personnel) {
        Some(personnel) => out.push_str(&format!(
            "A systematic investigation was conducted by a team of {personnel} to address the \
            technological uncertainties identified above.\n\n"
        )),
        None => out.push_str(
            "A systematic investigation was conducted to address the technological uncertainties \
            identified above.\n\n",
        ),
    }

    if let Some(experiments) = non_empty(&facts.experiments) {
        let items = split_items(experiments);
        if !items.is_empty() {
            out.push_str(
                "The following experiments and tests were designed and performed as part of the \
                systematic investigation:\n\n",
            );
            for item in &items {
                out.push_str(&format!("• {item}\n"));
            }
            out.push('\n');
        }
    }

    if let Some(iterations) = non_empty(&facts.iterations) {
        let items = split_items(iterations);
        if !items.is_empty() {
            out.push_str(
                "Based on experimental results, the following iterations and modifications were \
                made:\n\n",
            );
            for item in &items {
                out.push_str(&format!("• {item}\n"));
            }
            out.push('\n');
        }
    }

    if let Some(results) = non_empty(&facts.results) {
        out.push_str(&format!(
            "The systematic investigation yielded the following results and conclusions: {results}\n\n"
        ));
    }

    out.push_str(
        "The work described above constitutes a systematic investigation carried out in a field \
        of science or technology by means of experiment or analysis.",
    );

    out.trim().to_string()
}

/// Strips redundant trailing periods from an injected fact so the clause's
/// own punctuation does not double up.
fn trim_trailing_periods(s: &str) -> &str {
    s.trim_end_matches('.')
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
