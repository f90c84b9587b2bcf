//! T661 narrative section identifiers and request selectors.

use serde::{Deserialize, Serialize};

/// One of the three fixed T661 narrative line items.
///
/// Serializes to the response keys (`"line242"` ...); accepts the bare line
/// number (`"242"` ...) on input, which is what feedback submissions carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionId {
    #[serde(rename = "line242", alias = "242")]
    Line242,
    #[serde(rename = "line244", alias = "244")]
    Line244,
    #[serde(rename = "line246", alias = "246")]
    Line246,
}

impl SectionId {
    /// The bare CRA line number.
    pub fn number(self) -> &'static str {
        match self {
            SectionId::Line242 => "242",
            SectionId::Line244 => "244",
            SectionId::Line246 => "246",
        }
    }

    /// Display header placed at the top of a composed section.
    pub fn header(self) -> &'static str {
        match self {
            SectionId::Line242 => "LINE 242 - SCIENTIFIC OR TECHNOLOGICAL ADVANCEMENT",
            SectionId::Line244 => "LINE 244 - SCIENTIFIC OR TECHNOLOGICAL UNCERTAINTY",
            SectionId::Line246 => "LINE 246 - WORK PERFORMED",
        }
    }

    /// Literal marker used to partition a combined model reply.
    pub fn marker(self) -> &'static str {
        match self {
            SectionId::Line242 => "LINE 242",
            SectionId::Line244 => "LINE 244",
            SectionId::Line246 => "LINE 246",
        }
    }

    /// Human-readable label used in prompts.
    pub fn prompt_label(self) -> &'static str {
        match self {
            SectionId::Line242 => "Line 242 (Scientific or Technological Advancement)",
            SectionId::Line244 => "Line 244 (Scientific or Technological Uncertainty)",
            SectionId::Line246 => "Line 246 (Work Performed)",
        }
    }
}

/// Section selector carried by generation requests. Defaults to `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionSelector {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "242")]
    Line242,
    #[serde(rename = "244")]
    Line244,
    #[serde(rename = "246")]
    Line246,
}

impl SectionSelector {
    /// The section ids this selector expands to, in fixed line order.
    pub fn sections(self) -> &'static [SectionId] {
        match self {
            SectionSelector::All => &[SectionId::Line242, SectionId::Line244, SectionId::Line246],
            SectionSelector::Line242 => &[SectionId::Line242],
            SectionSelector::Line244 => &[SectionId::Line244],
            SectionSelector::Line246 => &[SectionId::Line246],
        }
    }

    /// `Some(id)` when exactly one section is requested.
    pub fn single(self) -> Option<SectionId> {
        match self.sections() {
            [id] => Some(*id),
            _ => None,
        }
    }
}
