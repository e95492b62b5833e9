//! # Ingredient Pipeline
//!
//! Turns the ingredient blob into an ordered ingredient list, with optional
//! named sub-sections, through a fixed sequence of lexical stages: line
//! splitting, orphan-line gluing, per-line sanitization, classification,
//! run-on splitting, deduplication, and junk filtering.
//!
//! Classification is a prioritized predicate chain (header-check before
//! ingredient-check), not a grammar. Lines that are neither ingredients nor
//! junk are held as step seeds: misplaced instructions sometimes land in
//! the ingredients section and are promoted by the step pipeline.

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use crate::model::{IngredientCandidate, IngredientSection};
use crate::vocabulary::{
    is_emoji_char, BARE_QUANTITY_RE, CONTINUATION_RE, DANGLING_WARMED_RE, FRACTION_GLYPH_RE,
    LEADING_QUANTITY_RE, LEADING_VERB_RE, LOOSE_NOUN_RE, MAX_GLUE_PASSES, MAX_OUTPUT_ITEMS,
    META_LABEL_RE, MIXED_NUMBER_RE, PINCH_OF_RE, PROMO_RE, SECTION_HEADER_NAMES, SOCIAL_META_RE,
    TEMPERATURE_LINE_RE, TO_TASTE_RE, UNIT_WORD_RE, URL_RE,
};

/// Marker protecting mixed numbers ("1 1/2") while run-on lines are split.
const MIXED_NUMBER_MARKER: char = '\u{1}';

lazy_static! {
    // Cut points for run-on splitting. Each pattern captures the first
    // character of the next segment; the `regex` crate has no lookahead,
    // so cut positions come from capture offsets.
    static ref CUT_COMMA_QUANTITY_RE: Regex =
        Regex::new(r"[,;]\s*([\d½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])")
            .expect("comma-quantity cut pattern should be valid");
    static ref CUT_COMMA_LEAD_PHRASE_RE: Regex = Regex::new(&format!(
        r"(?i)[,;]\s*((?:{})\b)",
        crate::vocabulary::word_alternation(crate::vocabulary::INGREDIENT_LEAD_PHRASES)
    ))
    .expect("comma-lead-phrase cut pattern should be valid");
    static ref CUT_AND_QUANTITY_RE: Regex =
        Regex::new(r"(?i)\s+(?:and|&)\s+([\d½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])")
            .expect("and-quantity cut pattern should be valid");
    static ref CUT_INTERNAL_QUANTITY_RE: Regex = Regex::new(
        r"(?i)[a-zà-ÿ)]\s+((?:\d+/\d+|\d+(?:\.\d+)?)\s*(?:cups?|teaspoons?|tsp|tablespoons?|tbsp|tbs|pints?|quarts?|oz|ounces?|lbs?|pounds?|g|grams?|kg|ml|l|liters?|litres?|cl|dl|sticks?|cloves?|cans?|slices?|pinch(?:es)?|packets?|bags?)\b)"
    )
    .expect("internal quantity cut pattern should be valid");
    static ref CUT_COMMA_CAPITAL_RE: Regex =
        Regex::new(r"[,;]\s+([A-Z][a-zà-ÿ])")
            .expect("comma-capital cut pattern should be valid");

    /// Two ingredients glued by a dash ("1 cup flour - 2 eggs"). The
    /// letter/paren guard keeps ranges ("2 - 3 cups") intact.
    static ref DASH_GLUE_RE: Regex =
        Regex::new(r"[A-Za-zà-ÿ)]\s+-\s+([\d½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])")
            .expect("dash glue pattern should be valid");

    /// Scan error: a line starting "/2" lost its leading 1.
    static ref LEADING_SLASH_TWO_RE: Regex =
        Regex::new(r"^/2\b").expect("leading slash-two pattern should be valid");

    /// Scan error: a leading lone "spoon" that lost its quantity and unit
    /// prefix.
    static ref LEADING_SPOON_RE: Regex =
        Regex::new(r"(?i)^spoon\b").expect("leading spoon pattern should be valid");

    /// Comma split used on header-tagged single-line blobs.
    static ref HEADER_LINE_COMMA_RE: Regex =
        Regex::new(r",\s*([\d½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])")
            .expect("header line comma pattern should be valid");
}

/// Result of the ingredient pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientExtraction {
    /// Ordered accepted ingredient lines.
    pub ingredients: Vec<String>,
    /// Named groups when a sub-section header was seen.
    pub sections: Option<Vec<IngredientSection>>,
    /// Non-ingredient, non-junk lines held for the step pipeline.
    pub step_seeds: Vec<String>,
    /// True when any sanitization repair had to guess.
    pub used_low_confidence_guess: bool,
}

/// Stage 1: split the blob into raw lines. A header-tagged blob with no
/// newlines but commas is a run-on ingredient list and is split at each
/// comma that precedes a quantity token.
fn split_blob(blob: &str, header_tagged: bool) -> Vec<String> {
    if header_tagged && !blob.contains('\n') && blob.contains(',') {
        let segments = split_at_cuts(blob, &collect_cuts(blob, &[(&HEADER_LINE_COMMA_RE, CutKind::AtDelimiter)]));
        if segments.len() > 1 {
            return segments;
        }
    }
    blob.lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Stage 2: glue orphaned fragments back together. A bare quantity merges
/// into the following line, a dangling "warmed/heated to" phrase pulls the
/// next line in, and unbalanced parentheses merge forward until they
/// balance (bounded passes; one alternative can span several lines).
fn glue_orphan_lines(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        if i + 1 < lines.len()
            && (BARE_QUANTITY_RE.is_match(line) || DANGLING_WARMED_RE.is_match(line))
        {
            trace!("Gluing orphan line {:?} into the next line", line);
            out.push(format!("{} {}", line.trim(), lines[i + 1].trim()));
            i += 2;
        } else {
            out.push(line.clone());
            i += 1;
        }
    }

    for _ in 0..MAX_GLUE_PASSES {
        let mut changed = false;
        let mut merged: Vec<String> = Vec::with_capacity(out.len());
        let mut i = 0;
        while i < out.len() {
            let open = out[i].matches('(').count();
            let close = out[i].matches(')').count();
            if open > close && i + 1 < out.len() {
                merged.push(format!("{} {}", out[i].trim(), out[i + 1].trim()));
                i += 2;
                changed = true;
            } else {
                merged.push(out[i].clone());
                i += 1;
            }
        }
        out = merged;
        if !changed {
            break;
        }
    }
    out
}

fn unify_dashes(s: &str) -> String {
    s.replace(['–', '—', '−', '‒', '―'], "-")
}

fn strip_decoration(s: &str) -> String {
    // Markdown emphasis markers can sit anywhere in a scraped line.
    let s = s.replace(['*', '_', '`'], "");
    let s = s.trim_start_matches(|c: char| {
        matches!(c, '-' | '•' | '‣' | '▪' | '◦' | '·' | '>' | '»' | '→' | '~')
            || is_emoji_char(c)
            || c.is_whitespace()
    });
    let s = s.trim_end_matches(|c: char| {
        matches!(c, '-' | '•' | '~') || is_emoji_char(c) || c.is_whitespace()
    });
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_section_header_text(s: &str) -> bool {
    // Social metadata and promotional lines often end in a colon too
    // ("1,204 likes, 88 comments - chef_jane on May 2:"); they are junk,
    // never headers.
    if SOCIAL_META_RE.is_match(s) || PROMO_RE.is_match(s) {
        return false;
    }
    let lower = s.trim_end_matches(':').trim().to_lowercase();
    let name = lower.strip_prefix("for the ").unwrap_or(&lower);
    if s.ends_with(':') {
        // A colon line is a header unless it is a meta label.
        return !META_LABEL_RE.is_match(s);
    }
    SECTION_HEADER_NAMES.contains(&name)
}

/// Stage 3: sanitize one raw line into zero, one, or two candidates.
///
/// Applies dash unification, bullet/emphasis stripping, section header
/// detection, two narrow scan-error repairs, unmatched-parenthesis
/// trimming, and the glued-by-dash split.
fn sanitize_line(line: &str) -> Vec<IngredientCandidate> {
    let mut text = strip_decoration(&unify_dashes(line));
    if text.is_empty() {
        return Vec::new();
    }

    if is_section_header_text(&text) {
        let name = text.trim_end_matches(':').trim().to_string();
        if name.is_empty() {
            return Vec::new();
        }
        return vec![IngredientCandidate::section_header(name)];
    }
    if META_LABEL_RE.is_match(&text) {
        return Vec::new();
    }

    let mut low_confidence = false;
    if LEADING_SLASH_TWO_RE.is_match(&text) {
        text = format!("1{}", text);
    }
    if LEADING_SPOON_RE.is_match(&text) {
        text = LEADING_SPOON_RE.replace(&text, "1 tablespoon").into_owned();
        low_confidence = true;
    }

    if text.ends_with(')') && text.matches(')').count() > text.matches('(').count() {
        text.pop();
        text = text.trim_end().to_string();
    }

    let mut candidates = Vec::new();
    for segment in split_at_cuts(&text, &collect_cuts(&text, &[(&DASH_GLUE_RE, CutKind::AfterGuard)])) {
        let segment = segment.trim().trim_end_matches('-').trim().to_string();
        if segment.is_empty() {
            continue;
        }
        let mut candidate = IngredientCandidate::ingredient(segment);
        candidate.is_low_confidence = low_confidence;
        candidates.push(candidate);
    }
    candidates
}

/// Stage 4 predicate: does this line look like an ingredient?
fn is_ingredient_shaped(text: &str) -> bool {
    if LEADING_QUANTITY_RE.is_match(text)
        || UNIT_WORD_RE.is_match(text)
        || FRACTION_GLYPH_RE.is_match(text)
        || TO_TASTE_RE.is_match(text)
        || PINCH_OF_RE.is_match(text)
    {
        return true;
    }
    // Last resort: strong ingredient vocabulary in a short, unpunctuated,
    // non-imperative line ("fresh basil", "sea salt").
    LOOSE_NOUN_RE.is_match(text)
        && text.split_whitespace().count() <= 5
        && text.len() <= 60
        && !text.contains(['.', '!', '?'])
        && !LEADING_VERB_RE.is_match(text)
}

/// Junk that must never surface as an ingredient even when it carries a
/// quantity token ("1,204 likes", "use code BAKE20 for 20% off").
fn is_junk(text: &str) -> bool {
    SOCIAL_META_RE.is_match(text) || PROMO_RE.is_match(text) || URL_RE.is_match(text)
}

#[derive(Clone, Copy)]
enum CutKind {
    /// Previous segment ends at the match start (delimiter is dropped).
    AtDelimiter,
    /// Previous segment ends after the first matched character (a guard
    /// letter that belongs to the previous segment).
    AfterGuard,
}

/// Collect (prev_end, next_start) cut positions for the given patterns.
/// Group 1 of every pattern marks the start of the next segment.
fn collect_cuts(text: &str, patterns: &[(&Regex, CutKind)]) -> Vec<(usize, usize)> {
    let mut cuts: Vec<(usize, usize)> = Vec::new();
    for (re, kind) in patterns {
        for caps in re.captures_iter(text) {
            let whole = caps.get(0).expect("match should exist");
            let next = caps.get(1).expect("cut patterns capture the next segment");
            let prev_end = match kind {
                CutKind::AtDelimiter => whole.start(),
                CutKind::AfterGuard => whole.start() + text[whole.start()..].chars().next().map_or(1, |c| c.len_utf8()),
            };
            cuts.push((prev_end, next.start()));
        }
    }
    cuts.sort_unstable();
    cuts.dedup_by_key(|c| c.1);
    cuts
}

/// Split `text` at the given cut positions, dropping the delimiters.
fn split_at_cuts(text: &str, cuts: &[(usize, usize)]) -> Vec<String> {
    if cuts.is_empty() {
        return vec![text.to_string()];
    }
    let mut segments = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for &(prev_end, next_start) in cuts {
        if prev_end <= start || next_start >= text.len() {
            continue;
        }
        let piece = text[start..prev_end].trim();
        if !piece.is_empty() {
            segments.push(piece.to_string());
        }
        start = next_start;
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        segments.push(tail.to_string());
    }
    segments
}

/// Stage 5: split a run-on line into separate ingredients. Mixed numbers
/// are protected with an internal marker so "1 1/2" never splits.
fn split_run_on(text: &str) -> Vec<String> {
    let protected = MIXED_NUMBER_RE
        .replace_all(text, format!("$1{}$2", MIXED_NUMBER_MARKER).as_str())
        .into_owned();

    let cuts = collect_cuts(
        &protected,
        &[
            (&CUT_COMMA_QUANTITY_RE, CutKind::AtDelimiter),
            (&CUT_COMMA_LEAD_PHRASE_RE, CutKind::AtDelimiter),
            (&CUT_AND_QUANTITY_RE, CutKind::AtDelimiter),
            (&CUT_INTERNAL_QUANTITY_RE, CutKind::AfterGuard),
            (&CUT_COMMA_CAPITAL_RE, CutKind::AtDelimiter),
        ],
    );

    split_at_cuts(&protected, &cuts)
        .into_iter()
        .map(|s| s.replace(MIXED_NUMBER_MARKER, " ").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Sanitize and split already-located ingredient lines into candidates.
///
/// This is the reusable building block for callers that have found an
/// ingredients section themselves (e.g. a platform adapter that saw an
/// explicit "Ingredients:" label): stage 3 sanitization followed by stage 5
/// run-on splitting, with leading continuation clauses ("and deveined",
/// "minced") folded back into the previous candidate.
pub fn sanitize_and_split_ingredient_candidates(lines: &[String]) -> Vec<IngredientCandidate> {
    let mut out: Vec<IngredientCandidate> = Vec::new();
    for line in lines {
        for candidate in sanitize_line(line) {
            if candidate.is_section_header {
                out.push(candidate);
                continue;
            }
            for segment in split_run_on(&candidate.text) {
                let reattached = attach_continuation(&mut out, &segment);
                if !reattached {
                    let mut c = IngredientCandidate::ingredient(segment);
                    c.is_low_confidence = candidate.is_low_confidence;
                    out.push(c);
                }
            }
        }
    }
    out
}

/// Append a stranded continuation clause to the last real ingredient.
/// Returns false when there is nothing to attach to or the segment is not
/// a continuation.
fn attach_continuation(out: &mut [IngredientCandidate], segment: &str) -> bool {
    if !CONTINUATION_RE.is_match(segment) {
        return false;
    }
    match out.iter_mut().rev().find(|c| !c.is_section_header) {
        Some(prev) => {
            prev.text = format!("{}, {}", prev.text, segment);
            true
        }
        None => false,
    }
}

/// Stage 6: dedupe, re-glue stray numbers, fold temperature fragments into
/// the previous ingredient, cap the list.
fn dedupe_and_final_glue(candidates: Vec<IngredientCandidate>) -> Vec<IngredientCandidate> {
    let mut seen: Vec<String> = Vec::new();
    let mut out: Vec<IngredientCandidate> = Vec::new();
    for c in candidates {
        if c.is_section_header {
            out.push(c);
            continue;
        }
        let key = c.text.to_lowercase();
        if seen.contains(&key) {
            trace!("Dropping duplicate ingredient {:?}", c.text);
            continue;
        }
        seen.push(key);
        out.push(c);
    }

    // A bare quantity can re-appear after run-on splitting; glue it once
    // more, and fold oven-setting fragments into the line they qualify.
    let mut glued: Vec<IngredientCandidate> = Vec::with_capacity(out.len());
    let mut i = 0;
    while i < out.len() {
        let current = &out[i];
        if !current.is_section_header
            && BARE_QUANTITY_RE.is_match(&current.text)
            && i + 1 < out.len()
            && !out[i + 1].is_section_header
        {
            let mut merged = current.clone();
            merged.text = format!("{} {}", current.text, out[i + 1].text);
            merged.is_low_confidence |= out[i + 1].is_low_confidence;
            glued.push(merged);
            i += 2;
            continue;
        }
        if !current.is_section_header && TEMPERATURE_LINE_RE.is_match(&current.text) {
            if let Some(prev) = glued.iter_mut().rev().find(|c| !c.is_section_header) {
                prev.text = format!("{} {}", prev.text, current.text);
                i += 1;
                continue;
            }
        }
        glued.push(current.clone());
        i += 1;
    }

    let mut kept = 0;
    glued.retain(|c| {
        if c.is_section_header {
            return true;
        }
        kept += 1;
        kept <= MAX_OUTPUT_ITEMS
    });
    glued
}

/// Targeted reconciliation: when the caption literally says "salt and
/// pepper to taste" but sanitization produced separate salt/pepper entries,
/// restore the combined idiom. Deliberately narrow; no general pairing.
fn reconcile_salt_and_pepper(candidates: &mut Vec<IngredientCandidate>, original_text: &str) {
    const IDIOM: &str = "salt and pepper to taste";
    if !original_text.to_lowercase().contains(IDIOM) {
        return;
    }
    let is_salt = |t: &str| matches!(t.to_lowercase().trim(), "salt" | "salt to taste");
    let is_pepper = |t: &str| matches!(t.to_lowercase().trim(), "pepper" | "pepper to taste");

    let salt_idx = candidates
        .iter()
        .position(|c| !c.is_section_header && is_salt(&c.text));
    let pepper_idx = candidates
        .iter()
        .position(|c| !c.is_section_header && is_pepper(&c.text));
    if let (Some(si), Some(pi)) = (salt_idx, pepper_idx) {
        debug!("Reconciling separate salt/pepper entries into the combined idiom");
        let insert_at = si.min(pi);
        let remove_first = si.max(pi);
        candidates.remove(remove_first);
        candidates.remove(si.min(pi));
        let already_present = candidates
            .iter()
            .any(|c| !c.is_section_header && c.text.to_lowercase() == IDIOM);
        if !already_present {
            candidates.insert(insert_at, IngredientCandidate::ingredient(IDIOM));
        }
    }
}

/// Stage 7: group candidates into named sections. The flat list is the
/// in-order concatenation of every section's ingredients.
fn assemble_sections(
    candidates: &[IngredientCandidate],
) -> (Vec<String>, Option<Vec<IngredientSection>>) {
    let has_header = candidates.iter().any(|c| c.is_section_header);
    let mut sections: Vec<IngredientSection> = Vec::new();
    let mut current = IngredientSection {
        name: None,
        ingredients: Vec::new(),
    };
    for c in candidates {
        if c.is_section_header {
            if current.name.is_some() || !current.ingredients.is_empty() {
                sections.push(current);
            }
            current = IngredientSection {
                name: Some(c.text.clone()),
                ingredients: Vec::new(),
            };
        } else {
            current.ingredients.push(c.text.clone());
        }
    }
    if current.name.is_some() || !current.ingredients.is_empty() {
        sections.push(current);
    }

    let flat: Vec<String> = sections
        .iter()
        .flat_map(|s| s.ingredients.iter().cloned())
        .collect();
    (flat, has_header.then_some(sections))
}

/// Run the full ingredient pipeline over a blob.
///
/// `header_tagged` is true when the blob came from an explicit ingredients
/// header; `original_text` is the normalized caption, used only by the
/// narrow salt-and-pepper reconciliation.
pub fn extract_ingredients(
    blob: &str,
    header_tagged: bool,
    original_text: &str,
    trace_log: &mut Vec<String>,
) -> IngredientExtraction {
    let lines = split_blob(blob, header_tagged);
    trace_log.push(format!("ingredient split: {} lines", lines.len()));

    let lines = glue_orphan_lines(lines);
    trace_log.push(format!("ingredient glue: {} lines", lines.len()));

    let sanitized: Vec<IngredientCandidate> =
        lines.iter().flat_map(|l| sanitize_line(l)).collect();
    let used_low_confidence_guess = sanitized.iter().any(|c| c.is_low_confidence);

    let mut accepted: Vec<IngredientCandidate> = Vec::new();
    let mut step_seeds: Vec<String> = Vec::new();
    for c in sanitized {
        if c.is_section_header {
            accepted.push(c);
        } else if is_junk(&c.text) {
            trace!("Dropping junk line {:?}", c.text);
        } else if is_ingredient_shaped(&c.text) {
            accepted.push(c);
        } else {
            step_seeds.push(c.text);
        }
    }
    trace_log.push(format!(
        "ingredient classify: {} accepted, {} step seeds",
        accepted.iter().filter(|c| !c.is_section_header).count(),
        step_seeds.len()
    ));

    let mut split: Vec<IngredientCandidate> = Vec::new();
    for c in accepted {
        if c.is_section_header {
            split.push(c);
            continue;
        }
        for segment in split_run_on(&c.text) {
            if !attach_continuation(&mut split, &segment) {
                let mut s = IngredientCandidate::ingredient(segment);
                s.is_low_confidence = c.is_low_confidence;
                split.push(s);
            }
        }
    }

    let mut final_candidates = dedupe_and_final_glue(split);
    final_candidates.retain(|c| c.is_section_header || !is_junk(&c.text));
    reconcile_salt_and_pepper(&mut final_candidates, original_text);

    let (ingredients, sections) = assemble_sections(&final_candidates);
    trace_log.push(format!("ingredient final: {} entries", ingredients.len()));
    debug!(
        "Ingredient pipeline produced {} ingredients ({} seeds)",
        ingredients.len(),
        step_seeds.len()
    );

    IngredientExtraction {
        ingredients,
        sections,
        step_seeds,
        used_low_confidence_guess,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(blob: &str) -> IngredientExtraction {
        let mut trace = Vec::new();
        extract_ingredients(blob, true, blob, &mut trace)
    }

    #[test]
    fn test_plain_labeled_list() {
        let result = extract("1 cup flour\n2 eggs");
        assert_eq!(result.ingredients, vec!["1 cup flour", "2 eggs"]);
        assert!(result.sections.is_none());
        assert!(!result.used_low_confidence_guess);
    }

    #[test]
    fn test_run_on_paragraph() {
        let result =
            extract("1 lb shrimp, peeled and deveined, 2 cloves garlic, minced, 1 tsp salt");
        assert_eq!(
            result.ingredients,
            vec![
                "1 lb shrimp, peeled and deveined",
                "2 cloves garlic, minced",
                "1 tsp salt"
            ]
        );
    }

    #[test]
    fn test_orphaned_number_glue() {
        let result = extract("1\n1/2 cup sugar");
        assert_eq!(result.ingredients, vec!["1 1/2 cup sugar"]);
    }

    #[test]
    fn test_mixed_number_survives_splitting() {
        let result = extract("1 1/2 cups flour, 2 eggs");
        assert_eq!(result.ingredients, vec!["1 1/2 cups flour", "2 eggs"]);
    }

    #[test]
    fn test_parenthesis_balancing_across_lines() {
        let result = extract("1 can tomatoes (or 2 fresh\ntomatoes, chopped)\n1 tsp salt");
        assert_eq!(result.ingredients.len(), 2);
        assert!(result.ingredients[0].contains("(or 2 fresh tomatoes, chopped)"));
    }

    #[test]
    fn test_section_headers_open_groups() {
        let result = extract("2 cups flour\nFor the ganache:\n1 cup cream\n8 oz chocolate");
        let sections = result.sections.expect("header should create sections");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, None);
        assert_eq!(sections[0].ingredients, vec!["2 cups flour"]);
        assert_eq!(sections[1].name.as_deref(), Some("For the ganache"));
        assert_eq!(sections[1].ingredients, vec!["1 cup cream", "8 oz chocolate"]);
        // Flattening the sections reproduces the flat list.
        let flattened: Vec<String> = sections
            .iter()
            .flat_map(|s| s.ingredients.iter().cloned())
            .collect();
        assert_eq!(flattened, result.ingredients);
    }

    #[test]
    fn test_scan_error_repairs() {
        let result = extract("/2 cup sugar");
        assert_eq!(result.ingredients, vec!["1/2 cup sugar"]);
        assert!(!result.used_low_confidence_guess);

        let result = extract("spoon vanilla extract");
        assert_eq!(result.ingredients, vec!["1 tablespoon vanilla extract"]);
        assert!(result.used_low_confidence_guess);
    }

    #[test]
    fn test_unmatched_trailing_paren_trimmed() {
        let result = extract("2 cups flour)");
        assert_eq!(result.ingredients, vec!["2 cups flour"]);
    }

    #[test]
    fn test_dash_glued_ingredients_split() {
        let result = extract("1 cup flour - 2 eggs");
        assert_eq!(result.ingredients, vec!["1 cup flour", "2 eggs"]);
    }

    #[test]
    fn test_range_not_split_by_dash_rule() {
        let result = extract("2 - 3 tbsp olive oil");
        assert_eq!(result.ingredients, vec!["2 - 3 tbsp olive oil"]);
    }

    #[test]
    fn test_misplaced_instruction_becomes_step_seed() {
        let result = extract("2 cups flour\nMix everything in a large bowl.");
        assert_eq!(result.ingredients, vec!["2 cups flour"]);
        assert_eq!(result.step_seeds, vec!["Mix everything in a large bowl."]);
    }

    #[test]
    fn test_junk_lines_dropped() {
        let result = extract("1,204 likes, 88 comments - chef_jane\n2 cups flour\nuse code BAKE20 for 20% off");
        assert_eq!(result.ingredients, vec!["2 cups flour"]);
        assert!(result.step_seeds.is_empty());
    }

    #[test]
    fn test_case_insensitive_dedupe_preserves_order() {
        let result = extract("2 cups flour\n1 tsp salt\n2 CUPS FLOUR");
        assert_eq!(result.ingredients, vec!["2 cups flour", "1 tsp salt"]);
    }

    #[test]
    fn test_salt_and_pepper_reconciliation() {
        let mut trace = Vec::new();
        let original = "Ingredients: 1 lb chicken, salt and pepper to taste";
        // Simulate sanitization having split the idiom apart.
        let result = extract_ingredients("1 lb chicken\nsalt\npepper", true, original, &mut trace);
        assert_eq!(
            result.ingredients,
            vec!["1 lb chicken", "salt and pepper to taste"]
        );
    }

    #[test]
    fn test_reconciliation_needs_the_literal_idiom() {
        let mut trace = Vec::new();
        let original = "1 lb chicken, salt, pepper";
        let result = extract_ingredients("1 lb chicken\nsalt\npepper", true, original, &mut trace);
        assert_eq!(result.ingredients, vec!["1 lb chicken", "salt", "pepper"]);
    }

    #[test]
    fn test_header_tagged_single_line_comma_split() {
        let result = extract("2 cups flour, 1 tsp salt, 3 eggs");
        assert_eq!(result.ingredients, vec!["2 cups flour", "1 tsp salt", "3 eggs"]);
    }

    #[test]
    fn test_output_cap() {
        let blob: Vec<String> = (1..=80).map(|i| format!("{} cups flour batch {}", i, i)).collect();
        let result = extract(&blob.join("\n"));
        assert_eq!(result.ingredients.len(), 60);
    }

    #[test]
    fn test_empty_blob() {
        let result = extract("");
        assert!(result.ingredients.is_empty());
        assert!(result.step_seeds.is_empty());
        assert!(result.sections.is_none());
    }

    #[test]
    fn test_sanitize_and_split_building_block() {
        let lines = vec![
            "**2 cups flour**".to_string(),
            "Ganache:".to_string(),
            "1 cup cream, 8 oz dark chocolate".to_string(),
        ];
        let candidates = sanitize_and_split_ingredient_candidates(&lines);
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].text, "2 cups flour");
        assert!(candidates[1].is_section_header);
        assert_eq!(candidates[2].text, "1 cup cream");
        assert_eq!(candidates[3].text, "8 oz dark chocolate");
    }

    #[test]
    fn test_temperature_fragment_folds_into_previous() {
        let result = extract("1 stick butter\n350 F");
        assert_eq!(result.ingredients.len(), 1);
        assert!(result.ingredients[0].starts_with("1 stick butter"));
    }
}
