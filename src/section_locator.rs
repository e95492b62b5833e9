//! # Section Locator
//!
//! Finds the ingredients and steps header positions in normalized caption
//! text and slices it into an ingredient blob and a step blob. Both blobs
//! are cut short at the first trailing hashtag block or collapsed "less"
//! marker, which end the useful part of a social caption.

use log::debug;

use crate::model::SectionSlice;
use crate::vocabulary::{HASHTAG_BLOCK_RE, INGREDIENTS_HEADER_RE, LESS_MARKER_RE, STEPS_HEADER_RE};

/// Cut a blob at the first trailing hashtag block or "less" marker.
fn trim_trailing_noise(blob: &str) -> String {
    let mut cut = blob.len();
    if let Some(m) = HASHTAG_BLOCK_RE.find(blob) {
        cut = cut.min(m.start());
    }
    if let Some(m) = LESS_MARKER_RE.find(blob) {
        cut = cut.min(m.start());
    }
    blob[..cut].trim().to_string()
}

/// Slice normalized text into ingredient and step blobs.
///
/// Four cases:
/// - both headers found in order: the ingredient blob is the span between
///   them, the step blob the remainder after the steps header;
/// - both found out of order: the span between them belongs to the steps,
///   and the remainder after the (later) ingredients header is recovered
///   as the ingredient blob;
/// - only one header found: the labeled region is sliced off and the rest
///   of the text is assumed to be the other section;
/// - neither found: the entire text becomes the ingredient blob, and steps
///   are recovered later from misplaced-line fallbacks.
pub fn locate_sections(text: &str) -> SectionSlice {
    let ing = INGREDIENTS_HEADER_RE.find(text);
    let step = STEPS_HEADER_RE.find(text);

    let ingredient_header_pos = ing.map_or(-1, |m| m.start() as isize);
    let step_header_pos = step.map_or(-1, |m| m.start() as isize);

    let (ingredient_blob, step_blob) = match (ing, step) {
        (Some(i), Some(s)) if i.start() < s.start() => {
            (text[i.end()..s.start()].to_string(), text[s.end()..].to_string())
        }
        (Some(i), Some(s)) => {
            // Headers out of order: keep the labeled content on both sides.
            (text[i.end()..].to_string(), text[s.end()..i.start()].to_string())
        }
        (Some(i), None) => (text[i.end()..].to_string(), String::new()),
        (None, Some(s)) => {
            // Everything before the steps header is assumed ingredient-shaped.
            (text[..s.start()].to_string(), text[s.end()..].to_string())
        }
        (None, None) => (text.to_string(), String::new()),
    };

    debug!(
        "Located sections: ingredients header at {}, steps header at {}",
        ingredient_header_pos, step_header_pos
    );

    SectionSlice {
        ingredient_blob: trim_trailing_noise(&ingredient_blob),
        step_blob: trim_trailing_noise(&step_blob),
        ingredient_header_pos,
        step_header_pos,
    }
}
