//! # Step Pipeline
//!
//! Turns the step blob into an ordered instruction list. Inline numbering
//! and transition words are first converted into line breaks, each line is
//! cleaned of markers and social decoration, meta and promotional noise is
//! filtered, and the survivors are kept when they look instruction-shaped.
//!
//! A low-yield fallback re-explodes the blob at sentence boundaries, and
//! misplaced instructions found by the ingredient pipeline are promoted
//! through the same cleaning and filtering.

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use crate::vocabulary::{
    is_emoji_char, COOKING_VERB_RE, LEADING_MARKER_RE, LEADING_QUANTITY_RE, LEADING_VERB_RE,
    MAX_OUTPUT_ITEMS, META_LABEL_RE, PROMO_RE, SOCIAL_META_RE, URL_RE,
};

lazy_static! {
    /// Inline numbering appearing mid-text ("... oven. 2. Mix ...").
    static ref INLINE_NUMBER_RE: Regex =
        Regex::new(r"\s+(\d{1,2})[.)]\s+").expect("inline number pattern should be valid");

    /// Inline bullets appearing mid-text.
    static ref INLINE_BULLET_RE: Regex =
        Regex::new(r"\s+[•▪‣◦]\s+").expect("inline bullet pattern should be valid");

    /// Transition words that start a new step, but only after a
    /// sentence-ending period; ordinary periods are left alone.
    static ref TRANSITION_BREAK_RE: Regex = Regex::new(
        r"([.!?])\s+((?i:step\s*\d|then|next|meanwhile|finally|lastly|after that|now)\b)"
    )
    .expect("transition break pattern should be valid");

    /// Trailing hashtag run on a step line.
    static ref TRAILING_HASHTAGS_RE: Regex =
        Regex::new(r"(?:\s*#[A-Za-z0-9_]+)+\s*$").expect("trailing hashtag pattern should be valid");

    /// Entity remnants that survived normalization inside step text.
    static ref ENTITY_REMNANT_RE: Regex =
        Regex::new(r"&(?:amp|lt|gt|quot|apos|nbsp);|&#\d+;")
            .expect("entity remnant pattern should be valid");

    /// Dangling ampersand at the end of a line.
    static ref DANGLING_AMP_RE: Regex =
        Regex::new(r"\s*&\s*$").expect("dangling ampersand pattern should be valid");

    /// A pan-dimension fragment left hanging by a line wrap ("...a 9x").
    static ref PAN_FRAGMENT_RE: Regex =
        Regex::new(r"(?i)\d\s*x$").expect("pan fragment pattern should be valid");

    /// Start of a pan-dimension continuation ("13 inch pan", "9x13 ...").
    static ref PAN_CONTINUATION_RE: Regex =
        Regex::new(r"(?i)^(?:\d|inch\b)").expect("pan continuation pattern should be valid");
}

/// Roughly how long a sentence can get before the fallback splitter cuts
/// it at cue-verb boundaries.
const LONG_SENTENCE_LEN: usize = 140;

/// Stage 1: convert inline structure into line breaks.
fn normalize_inline_breaks(text: &str) -> String {
    let mut out = INLINE_NUMBER_RE.replace_all(text, "\n${1}. ").into_owned();
    out = INLINE_BULLET_RE.replace_all(&out, "\n").into_owned();
    out = out.replace([';', '|'], "\n");
    TRANSITION_BREAK_RE.replace_all(&out, "${1}\n${2}").into_owned()
}

/// Stage 2: clean one line. Returns the cleaned text and whether the line
/// carried an explicit numbering/bullet marker.
fn clean_step_line(line: &str) -> (String, bool) {
    let had_marker = LEADING_MARKER_RE.is_match(line);
    let mut s = LEADING_MARKER_RE.replace(line, "").into_owned();
    s = TRAILING_HASHTAGS_RE.replace(&s, "").into_owned();
    s = ENTITY_REMNANT_RE.replace_all(&s, "").into_owned();
    s = s.chars().filter(|c| !is_emoji_char(*c)).collect();
    s = DANGLING_AMP_RE.replace(&s, "").into_owned();
    s = s.replace(" :", ":");
    let s = s.split_whitespace().collect::<Vec<_>>().join(" ");
    (s, had_marker)
}

/// Stages 1-3: explode a text into cleaned lines. The safety split re-runs
/// break normalization on each cleaned line to catch numbering tokens that
/// only became visible after marker stripping.
fn explode_and_clean(text: &str) -> Vec<(String, bool)> {
    let mut out = Vec::new();
    for raw in normalize_inline_breaks(text).lines() {
        let (cleaned, marker) = clean_step_line(raw);
        if cleaned.is_empty() {
            continue;
        }
        let rebroken = normalize_inline_breaks(&cleaned);
        let pieces: Vec<&str> = rebroken.lines().filter(|l| !l.trim().is_empty()).collect();
        if pieces.len() > 1 {
            for (i, piece) in pieces.iter().enumerate() {
                let (c, piece_marker) = clean_step_line(piece);
                if !c.is_empty() {
                    out.push((c, piece_marker || (i == 0 && marker)));
                }
            }
        } else {
            out.push((cleaned, marker));
        }
    }
    out
}

/// Stage 4 filter: serving/time labels, promotional noise, and bare
/// "quantity + product noun" lines that leaked over from the ingredients.
fn is_step_noise(text: &str) -> bool {
    if META_LABEL_RE.is_match(text)
        || PROMO_RE.is_match(text)
        || SOCIAL_META_RE.is_match(text)
        || URL_RE.is_match(text)
    {
        return true;
    }
    LEADING_QUANTITY_RE.is_match(text)
        && !text.ends_with(['.', '!', '?'])
        && !COOKING_VERB_RE.is_match(text)
        && text.split_whitespace().count() <= 6
}

/// Stage 5 predicate, in priority order: explicit marker, imperative
/// shape, period-terminated sentence with a cue verb, cue verb anywhere.
fn is_instruction_shaped(text: &str, had_marker: bool) -> bool {
    if had_marker {
        return true;
    }
    if LEADING_VERB_RE.is_match(text) {
        return true;
    }
    if text.ends_with('.') && COOKING_VERB_RE.is_match(text) {
        return true;
    }
    COOKING_VERB_RE.is_match(text)
}

fn filter_steps(lines: Vec<(String, bool)>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|(text, _)| !is_step_noise(text))
        .filter(|(text, marker)| is_instruction_shaped(text, *marker))
        .map(|(text, _)| text)
        .collect()
}

/// Split text into sentences at terminal punctuation followed by
/// whitespace.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if matches!(b, b'.' | b'!' | b'?')
            && bytes.get(i + 1).map_or(true, |n| n.is_ascii_whitespace())
        {
            let sentence = text[start..=i].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = i + 1;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

/// Fallback splitter for a long run-on sentence: cut before each later cue
/// verb, keeping segments long enough to stand alone.
fn split_at_cue_verbs(sentence: &str) -> Vec<String> {
    let positions: Vec<usize> = COOKING_VERB_RE
        .find_iter(sentence)
        .map(|m| m.start())
        .collect();
    if positions.len() < 2 {
        return vec![sentence.to_string()];
    }
    let mut segments = Vec::new();
    let mut start = 0;
    for &pos in &positions[1..] {
        if pos.saturating_sub(start) >= 25 && sentence.is_char_boundary(pos) {
            let piece = sentence[start..pos].trim();
            if !piece.is_empty() {
                segments.push(piece.to_string());
            }
            start = pos;
        }
    }
    let tail = sentence[start..].trim();
    if !tail.is_empty() {
        segments.push(tail.to_string());
    }
    segments
}

/// Stage 6: sentence-level re-explosion of the blob, adopted by the caller
/// only when it strictly beats the direct result.
fn explode_sentences(blob: &str) -> Vec<String> {
    let mut lines: Vec<(String, bool)> = Vec::new();
    for sentence in split_sentences(blob) {
        let needs_split = sentence.len() > LONG_SENTENCE_LEN
            || COOKING_VERB_RE.find_iter(&sentence).count() >= 2;
        let pieces = if needs_split {
            split_at_cue_verbs(&sentence)
        } else {
            vec![sentence]
        };
        for piece in pieces {
            let (cleaned, marker) = clean_step_line(&piece);
            if !cleaned.is_empty() {
                lines.push((cleaned, marker));
            }
        }
    }
    filter_steps(lines)
}

/// Stage 8 helper: merge a trailing "NNx" pan-dimension fragment with the
/// following "inch…"/"NxN" line.
fn merge_pan_fragments(steps: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(steps.len());
    let mut i = 0;
    while i < steps.len() {
        if i + 1 < steps.len()
            && PAN_FRAGMENT_RE.is_match(&steps[i])
            && PAN_CONTINUATION_RE.is_match(&steps[i + 1])
        {
            let fragment = steps[i].trim_end();
            let next = steps[i + 1].trim_start();
            let joined = if next.starts_with(|c: char| c.is_ascii_digit()) {
                format!("{}{}", fragment, next)
            } else {
                format!("{} {}", fragment, next)
            };
            trace!("Merged pan-dimension fragment into {:?}", joined);
            out.push(joined);
            i += 2;
        } else {
            out.push(steps[i].clone());
            i += 1;
        }
    }
    out
}

/// Run the full step pipeline over the step blob, promoting any step seeds
/// the ingredient pipeline held back.
pub fn extract_steps(blob: &str, step_seeds: &[String], trace_log: &mut Vec<String>) -> Vec<String> {
    let mut steps = filter_steps(explode_and_clean(blob));
    trace_log.push(format!("step direct: {} lines", steps.len()));

    // Low-yield fallback, adopted only when strictly better.
    if steps.len() < 2 && !blob.trim().is_empty() {
        let exploded = explode_sentences(blob);
        if exploded.len() > steps.len() {
            debug!(
                "Adopting sentence-explosion fallback: {} -> {} steps",
                steps.len(),
                exploded.len()
            );
            trace_log.push(format!("step fallback: {} lines", exploded.len()));
            steps = exploded;
        }
    }

    // Promote misplaced instructions found in the ingredients section,
    // cleaned and filtered the same way.
    for seed in step_seeds {
        steps.extend(filter_steps(explode_and_clean(seed)));
    }

    let steps = merge_pan_fragments(steps);

    let mut seen: Vec<String> = Vec::new();
    let mut out: Vec<String> = Vec::new();
    for step in steps {
        let key = step.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(step);
        if out.len() >= MAX_OUTPUT_ITEMS {
            break;
        }
    }
    trace_log.push(format!("step final: {} entries", out.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(blob: &str) -> Vec<String> {
        let mut trace = Vec::new();
        extract_steps(blob, &[], &mut trace)
    }

    #[test]
    fn test_numbered_lines() {
        let steps = extract("1. Mix flour and eggs.\n2. Bake at 350F for 20 minutes.");
        assert_eq!(steps, vec!["Mix flour and eggs.", "Bake at 350F for 20 minutes."]);
    }

    #[test]
    fn test_inline_numbering_single_line() {
        let steps = extract("1. Preheat oven. 2. Mix batter. 3. Bake 25 minutes.");
        assert_eq!(
            steps,
            vec!["Preheat oven.", "Mix batter.", "Bake 25 minutes."]
        );
    }

    #[test]
    fn test_semicolons_become_breaks() {
        let steps = extract("Whisk the eggs; fold in the flour; chill the dough.");
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], "Whisk the eggs");
    }

    #[test]
    fn test_transition_words_after_period() {
        let steps = extract("Mix the batter well. Then pour into the pan. Meanwhile heat the oven.");
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1], "Then pour into the pan.");
    }

    #[test]
    fn test_transition_word_mid_sentence_left_alone() {
        // "then" without a preceding period must not split.
        let steps = extract("Stir the mixture until it thickens and then enjoy.");
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn test_meta_lines_dropped() {
        let steps = extract("Prep time: 10 minutes\nServes: 4\nMix everything and bake well.");
        assert_eq!(steps, vec!["Mix everything and bake well."]);
    }

    #[test]
    fn test_ingredient_leak_dropped() {
        let steps = extract("2 cups flour\nMix the dough and rest it.");
        assert_eq!(steps, vec!["Mix the dough and rest it."]);
    }

    #[test]
    fn test_promotional_noise_dropped() {
        let steps = extract("Follow me for more recipes\nSimmer the sauce for 10 minutes.");
        assert_eq!(steps, vec!["Simmer the sauce for 10 minutes."]);
    }

    #[test]
    fn test_hashtags_and_emoji_stripped() {
        let steps = extract("Bake until golden \u{1F60B} #baking #easy");
        assert_eq!(steps, vec!["Bake until golden"]);
    }

    #[test]
    fn test_low_yield_fallback_explodes_sentences() {
        let steps = extract(
            "Combine the dry mix with the wet mix until smooth and glossy then transfer the batter to a lined tin and bake until a skewer comes out clean and cool on a rack before slicing",
        );
        assert!(steps.len() >= 2, "fallback should split: {:?}", steps);
    }

    #[test]
    fn test_fallback_not_adopted_when_worse() {
        // A single clean imperative line stays a single step.
        let steps = extract("Stir gently.");
        assert_eq!(steps, vec!["Stir gently."]);
    }

    #[test]
    fn test_step_seed_promotion() {
        let mut trace = Vec::new();
        let steps = extract_steps(
            "",
            &["Mix everything in a large bowl.".to_string()],
            &mut trace,
        );
        assert_eq!(steps, vec!["Mix everything in a large bowl."]);
    }

    #[test]
    fn test_seed_with_inline_numbers_is_split() {
        let mut trace = Vec::new();
        let steps = extract_steps(
            "",
            &["1. Preheat oven. 2. Mix batter. 3. Bake 25 minutes.".to_string()],
            &mut trace,
        );
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_pan_fragment_merge() {
        let steps = extract("Pour the batter into a 9x\n13 inch pan and bake well.");
        assert_eq!(steps.len(), 1);
        assert!(steps[0].contains("9x13 inch pan"));
    }

    #[test]
    fn test_dedupe_and_cap() {
        let steps = extract("Mix well.\nMix well.\nMIX WELL.");
        assert_eq!(steps, vec!["Mix well."]);
    }

    #[test]
    fn test_empty_blob() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_dangling_ampersand_removed() {
        let steps = extract("Whisk the eggs &\nFold in sugar gently.");
        assert_eq!(steps[0], "Whisk the eggs");
    }
}
