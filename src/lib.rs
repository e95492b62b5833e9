//! # Caption Recipes
//!
//! Extracts a structured recipe - a title, an ordered ingredient list, and
//! an ordered step list - from an unstructured social-media caption string,
//! using layered lexical heuristics instead of a grammar or trained model.
//! Wrong extractions are expected and surfaced through a coarse confidence
//! signal rather than prevented.
//!
//! The engine is purely synchronous and stateless: in-memory input to
//! in-memory output, no I/O, safe to call concurrently.

pub mod confidence;
pub mod ingredient_pipeline;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod section_locator;
pub mod step_pipeline;
pub mod title_extractor;
pub mod vocabulary;

// Re-export the public entry points and result types for easier access
pub use ingredient_pipeline::sanitize_and_split_ingredient_candidates;
pub use model::{
    Confidence, DraftHints, IngredientCandidate, IngredientSection, ParseResult, RecipeDraft,
    TitleSources,
};
pub use parser::{build_recipe_draft, detect_servings, parse_recipe_text};
pub use title_extractor::extract_recipe_title;
