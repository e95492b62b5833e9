//! # Recipe Caption Parser
//!
//! The top-level glue: normalize the caption, slice it into blobs, run the
//! ingredient and step pipelines, and score the result. Also assembles the
//! caller-facing [`RecipeDraft`] shape from the parse output plus
//! retrieval hints.
//!
//! The engine is stateless and never raises on malformed input: empty or
//! pathological strings short-circuit to empty lists with low confidence.

use log::{debug, info};

use crate::confidence::score_confidence;
use crate::ingredient_pipeline::extract_ingredients;
use crate::model::{DraftHints, ParseResult, RecipeDraft, TitleSources};
use crate::normalizer::normalize_caption;
use crate::section_locator::locate_sections;
use crate::step_pipeline::extract_steps;
use crate::title_extractor::extract_recipe_title;
use crate::vocabulary::SERVINGS_RE;

/// Parse a raw caption into a structured recipe.
///
/// # Examples
///
/// ```rust
/// use caption_recipes::parse_recipe_text;
///
/// let caption = "Ingredients:\n1 cup flour\n2 eggs\nInstructions:\n1. Mix flour and eggs.";
/// let result = parse_recipe_text(caption);
/// assert_eq!(result.ingredients, vec!["1 cup flour", "2 eggs"]);
/// assert_eq!(result.steps, vec!["Mix flour and eggs."]);
/// ```
pub fn parse_recipe_text(text: &str) -> ParseResult {
    let normalized = normalize_caption(text);
    if normalized.is_empty() {
        debug!("Empty caption, returning empty result");
        let mut result = ParseResult::empty();
        result.debug_trace.push("empty input".to_string());
        return result;
    }

    let mut trace: Vec<String> = Vec::new();
    trace.push(format!("normalized: {} chars", normalized.len()));

    let slice = locate_sections(&normalized);
    trace.push(format!(
        "sections: ingredients header at {}, steps header at {}",
        slice.ingredient_header_pos, slice.step_header_pos
    ));

    let extraction = extract_ingredients(
        &slice.ingredient_blob,
        slice.has_ingredient_header(),
        &normalized,
        &mut trace,
    );
    let steps = extract_steps(&slice.step_blob, &extraction.step_seeds, &mut trace);

    let confidence = score_confidence(
        extraction.ingredients.len(),
        steps.len(),
        extraction.used_low_confidence_guess,
    );
    info!(
        "Parsed caption: {} ingredients, {} steps, {} confidence",
        extraction.ingredients.len(),
        steps.len(),
        confidence
    );

    ParseResult {
        ingredients: extraction.ingredients,
        ingredient_sections: extraction.sections,
        steps,
        confidence,
        debug_trace: trace,
    }
}

/// Find a literal serving label ("Serves 4", "Makes 12") in the caption.
/// The matched text is passed through verbatim; no quantity semantics.
pub fn detect_servings(text: &str) -> Option<String> {
    let normalized = normalize_caption(text);
    SERVINGS_RE
        .find(&normalized)
        .map(|m| m.as_str().trim().to_string())
}

/// Assemble the caller-facing recipe shape from a caption plus retrieval
/// hints. Hero image and source hints are passed through untouched.
pub fn build_recipe_draft(caption: &str, hints: &DraftHints) -> RecipeDraft {
    let result = parse_recipe_text(caption);
    let title = extract_recipe_title(&TitleSources {
        caption: Some(caption),
        description: hints.description.as_deref(),
        page_title: hints.page_title.as_deref(),
        text: None,
    });

    RecipeDraft {
        title,
        ingredients: result.ingredients,
        ingredient_sections: result.ingredient_sections,
        steps: result.steps,
        servings: detect_servings(caption),
        hero_image: hints.hero_image.clone(),
        source: hints.source.clone(),
        confidence: result.confidence,
    }
}
