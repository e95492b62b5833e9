//! # Recipe Data Model
//!
//! Data structures produced by the caption parsing engine. Every value is
//! created and discarded within one synchronous call; the engine keeps no
//! state between invocations.
//!
//! ## Core Concepts
//!
//! - **IngredientCandidate**: a sanitized, not-yet-accepted ingredient line
//! - **IngredientSection**: a named group of ingredients ("For the ganache:")
//! - **ParseResult**: the full engine output with a confidence signal
//! - **RecipeDraft**: the caller-facing shape combining parse output with
//!   retrieval hints (title fallbacks, hero image, source)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse trust signal derived from output sizes and guess usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Too little structure recovered to trust the result.
    Low,
    /// A usable but possibly incomplete extraction.
    Medium,
    /// Both lists look well populated.
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// A sanitized ingredient line that has not yet been accepted into the
/// final list. Section headers are excluded from the final ingredients but
/// may name an [`IngredientSection`].
///
/// The low-confidence flag is a value-level tag: a guessed repair (e.g. a
/// leading "spoon" rewritten to "1 tablespoon") marks only its own
/// candidate, so repeated or concurrent calls compose cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientCandidate {
    /// The cleaned line text.
    pub text: String,
    /// True when the line names a sub-section rather than an ingredient.
    pub is_section_header: bool,
    /// True when a repair guessed at missing content.
    pub is_low_confidence: bool,
}

impl IngredientCandidate {
    pub fn ingredient(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_section_header: false,
            is_low_confidence: false,
        }
    }

    pub fn section_header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_section_header: true,
            is_low_confidence: false,
        }
    }

    pub fn low_confidence(mut self) -> Self {
        self.is_low_confidence = true;
        self
    }
}

/// A named group of ingredients. A `None` name holds ingredients that
/// precede any sub-section header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientSection {
    pub name: Option<String>,
    pub ingredients: Vec<String>,
}

/// Normalized text sliced at the located section headers. Header positions
/// are `-1` when the corresponding header is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSlice {
    pub ingredient_blob: String,
    pub step_blob: String,
    pub ingredient_header_pos: isize,
    pub step_header_pos: isize,
}

impl SectionSlice {
    pub fn has_ingredient_header(&self) -> bool {
        self.ingredient_header_pos >= 0
    }

    pub fn has_step_header(&self) -> bool {
        self.step_header_pos >= 0
    }
}

/// Full engine output.
///
/// Invariant: flattening `ingredient_sections` in order reproduces
/// `ingredients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Ordered ingredient lines.
    pub ingredients: Vec<String>,
    /// Named groups, present only when a sub-section header was detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient_sections: Option<Vec<IngredientSection>>,
    /// Ordered instruction lines.
    pub steps: Vec<String>,
    /// Coarse trust signal.
    pub confidence: Confidence,
    /// One line per pipeline stage describing what it kept or dropped.
    pub debug_trace: Vec<String>,
}

impl ParseResult {
    pub fn empty() -> Self {
        Self {
            ingredients: Vec::new(),
            ingredient_sections: None,
            steps: Vec::new(),
            confidence: Confidence::Low,
            debug_trace: Vec::new(),
        }
    }
}

/// Where a winning title candidate came from. Order is the tie-break
/// preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TitleSource {
    Caption,
    PageTitle,
    Description,
    Fallback,
}

/// Optional inputs for the title-only entry point. All fields may be
/// absent; the extractor scores whatever is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleSources<'a> {
    /// The post caption.
    pub caption: Option<&'a str>,
    /// A page or video description.
    pub description: Option<&'a str>,
    /// The page `<title>`, usually carrying a site suffix.
    pub page_title: Option<&'a str>,
    /// Free fallback text supplied by the caller.
    pub text: Option<&'a str>,
}

/// Caller-supplied hints merged into a [`RecipeDraft`]; the engine passes
/// them through untouched.
#[derive(Debug, Clone, Default)]
pub struct DraftHints {
    pub page_title: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<String>,
    pub source: Option<String>,
}

/// The assembled shape external callers consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: Option<String>,
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient_sections: Option<Vec<IngredientSection>>,
    pub steps: Vec<String>,
    pub servings: Option<String>,
    pub hero_image: Option<String>,
    pub source: Option<String>,
    pub confidence: Confidence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_ordering_and_display() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        assert_eq!(Confidence::Medium.to_string(), "medium");
    }

    #[test]
    fn test_confidence_serialization() {
        assert_eq!(serde_json::to_string(&Confidence::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_candidate_builders() {
        let c = IngredientCandidate::ingredient("2 cups flour");
        assert!(!c.is_section_header);
        assert!(!c.is_low_confidence);

        let h = IngredientCandidate::section_header("Ganache");
        assert!(h.is_section_header);

        let g = IngredientCandidate::ingredient("1 tablespoon sugar").low_confidence();
        assert!(g.is_low_confidence);
    }

    #[test]
    fn test_section_slice_header_flags() {
        let slice = SectionSlice {
            ingredient_blob: String::new(),
            step_blob: String::new(),
            ingredient_header_pos: 12,
            step_header_pos: -1,
        };
        assert!(slice.has_ingredient_header());
        assert!(!slice.has_step_header());
    }
}
