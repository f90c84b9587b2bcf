//! Sanitation of free-form multi-line fact fields into enumerable item lists.

/// Leading characters treated as enumeration markers, alongside ASCII digits.
const MARKER_CHARS: &[char] = &['.', '-', ')', '•', '*', ' ', '\t'];

fn strip_enumeration(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_ascii_digit() || MARKER_CHARS.contains(&c))
}

/// Splits raw multi-line text into ordered, non-empty, trimmed items with
/// leading enumeration markers (`1.`, `-`, `•`, `3)` ...) stripped.
///
/// Empty input yields an empty vec. Idempotent: feeding the output back in
/// returns it unchanged, because a stripped item never starts with a marker.
pub fn split_items(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_enumeration(line).trim_end().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Removes a pre-existing `H<n>:`-style label from a hypothesis line so the
/// composer can relabel in input order. A word that merely starts with `H`
/// ("Higher throughput ...") is left intact.
pub fn strip_hypothesis_label(line: &str) -> &str {
    let Some(rest) = line.strip_prefix(['H', 'h']) else {
        return line;
    };
    let after_digits = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    let after_punct = after_digits.trim_start_matches([':', '.', ')', '-']);
    if after_digits.len() < rest.len() || after_punct.len() < after_digits.len() {
        after_punct.trim_start()
    } else {
        line
    }
}
