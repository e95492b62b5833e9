//! # Caption Normalizer
//!
//! Removes structural noise from a raw caption without altering its
//! semantic content: line-ending variants, encoded artifacts left by the
//! upstream retrieval step, zero-width and bidi control characters, and a
//! small safe set of HTML entities.
//!
//! Normalization is idempotent and never adds alphanumeric content: every
//! replacement maps noise to whitespace, to punctuation, or to nothing.

use lazy_static::lazy_static;
use log::trace;
use regex::{Captures, Regex};

/// Editor/scraper placeholder tokens that carry no content.
const PLACEHOLDER_TOKENS: &[&str] = &["[object Object]", "\u{FFFC}"];

lazy_static! {
    /// Zero-width and bidi control characters still encoded as numeric
    /// character references, possibly with stray internal whitespace
    /// ("&# 8203 ;") from the retrieval step.
    static ref ENCODED_ZERO_WIDTH_RE: Regex =
        Regex::new(r"&#\s*(?:8203|8204|8205|8206|8207|8288|65279)\s*;")
            .expect("encoded zero-width pattern should be valid");

    /// `&amp;` with an optional trailing entity. When the tail is present
    /// the match is left untouched so that decoding cannot manufacture a
    /// new entity; re-running the normalizer then changes nothing.
    static ref AMP_ENTITY_RE: Regex =
        Regex::new(r"&amp;((?:amp|lt|gt|quot|apos|nbsp);|#\d+;)?")
            .expect("amp entity pattern should be valid");

    static ref SPACE_RUN_RE: Regex =
        Regex::new(r"[ \t]{2,}").expect("space run pattern should be valid");
    static ref LINE_EDGE_SPACE_RE: Regex =
        Regex::new(r"(?m)^[ \t]+|[ \t]+$").expect("line edge pattern should be valid");
    static ref BLANK_RUN_RE: Regex =
        Regex::new(r"\n{3,}").expect("blank run pattern should be valid");
}

/// True for zero-width, joiner, and bidi control characters that survive
/// copy-paste from social apps.
fn is_invisible_control(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}'
            | '\u{00AD}'
    )
}

/// True for non-breaking and typographic space variants unified to a plain
/// space.
fn is_space_variant(c: char) -> bool {
    matches!(
        c,
        '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

/// Normalize a raw caption string.
///
/// # Examples
///
/// ```rust
/// use caption_recipes::normalizer::normalize_caption;
///
/// let raw = "1\u{00A0}cup flour&#8203;\r\nBake in a 9\u{00D7}13 pan";
/// let clean = normalize_caption(raw);
/// assert_eq!(clean, "1 cup flour\nBake in a 9x13 pan");
/// // Idempotent:
/// assert_eq!(normalize_caption(&clean), clean);
/// ```
pub fn normalize_caption(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Escaped-newline artifacts from JSON metadata, then real line endings.
    let mut out = text.replace("\\n", "\n");
    out = out.replace("\r\n", "\n").replace('\r', "\n");

    out = ENCODED_ZERO_WIDTH_RE.replace_all(&out, "").into_owned();

    // Safe entity set. `&amp;` goes last, guarded against forming a new
    // entity out of its own tail.
    out = out
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    out = AMP_ENTITY_RE
        .replace_all(&out, |caps: &Captures| {
            if caps.get(1).is_some() {
                caps[0].to_string()
            } else {
                "&".to_string()
            }
        })
        .into_owned();

    for token in PLACEHOLDER_TOKENS {
        if out.contains(token) {
            trace!("Stripping placeholder token {:?}", token);
            out = out.replace(token, "");
        }
    }

    out = out
        .chars()
        .filter(|c| !is_invisible_control(*c))
        .map(|c| {
            if is_space_variant(c) {
                ' '
            } else if c == '\u{00D7}' || c == '\u{2715}' || c == '\u{2716}' {
                'x'
            } else {
                c
            }
        })
        .collect();

    out = SPACE_RUN_RE.replace_all(&out, " ").into_owned();
    out = LINE_EDGE_SPACE_RE.replace_all(&out, "").into_owned();
    out = BLANK_RUN_RE.replace_all(&out, "\n\n").into_owned();

    out.trim().to_string()
}
