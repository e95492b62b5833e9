//! # Title Extractor
//!
//! Scores candidate dish titles taken from the caption, the page title,
//! the description, and caller-supplied fallback text. Runs independently
//! of the ingredient and step pipelines; only the winning string escapes.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::model::{TitleSource, TitleSources};
use crate::normalizer::normalize_caption;
use crate::vocabulary::{
    FOOD_EMOJI, HANDLE_RE, INGREDIENTS_HEADER_RE, LEADING_SOCIAL_META_RE, LEADING_VERB_RE,
    PLATFORM_RE, PROMO_RE, RECIPE_NOUN_RE, TITLE_CUTOFF_TOKENS, UNIT_WORD_RE, URL_RE,
};

/// Minimum score a candidate needs to win.
const MIN_WINNING_SCORE: i32 = 20;

/// Bonus for explicitly quoted phrases.
const QUOTE_BONUS: i32 = 25;

/// How many leading lines of a source are considered.
const MAX_CANDIDATE_LINES: usize = 8;

/// A cutoff token this far into the line marks where the title ends and
/// running text begins.
const LATE_TOKEN_POS: usize = 12;

lazy_static! {
    static ref QUOTED_RE: Regex = Regex::new(r#""([^"\n]{3,100})"|“([^”\n]{3,100})”"#)
        .expect("quoted phrase pattern should be valid");
    static ref CUTOFF_TOKEN_RE: Regex = Regex::new(&format!(
        r"(?i)\s(?:{})\b",
        TITLE_CUTOFF_TOKENS
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|")
    ))
    .expect("cutoff token pattern should be valid");
    /// Common "<title> | Site Name" separators.
    static ref SITE_SUFFIX_RE: Regex = Regex::new(r"\s+[|•·–—-]\s+")
        .expect("site suffix pattern should be valid");
}

#[derive(Debug, Clone)]
struct TitleCandidate {
    text: String,
    score: i32,
    source: TitleSource,
}

/// Trim a caption line down to its title-shaped prefix: leading social
/// metadata goes first, then the line is cut at the first sentence
/// boundary or at a late-occurring sentence-starter token.
fn trim_title_line(line: &str) -> String {
    let line = LEADING_SOCIAL_META_RE.replace(line, "").into_owned();
    let mut cut = line.len();
    if let Some(pos) = line.find(['.', '!', '?']) {
        cut = cut.min(pos);
    }
    if let Some(m) = CUTOFF_TOKEN_RE
        .find_iter(&line)
        .find(|m| m.start() >= LATE_TOKEN_POS)
    {
        cut = cut.min(m.start());
    }
    line[..cut].trim().to_string()
}

fn is_title_case_shape(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
}

/// Score one candidate. Returns `None` for outright rejections.
fn score_candidate(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    let char_len = trimmed.chars().count();
    if char_len < 3 || char_len > 100 {
        return None;
    }
    if URL_RE.is_match(trimmed) || HANDLE_RE.is_match(trimmed) || LEADING_VERB_RE.is_match(trimmed)
    {
        return None;
    }

    let mut score = 0;
    if trimmed.chars().any(|c| FOOD_EMOJI.contains(c)) {
        score += 20;
    }
    if RECIPE_NOUN_RE.is_match(trimmed) {
        score += 30;
    }
    if is_title_case_shape(trimmed) {
        score += 50;
    }
    if trimmed.chars().next().is_some_and(|c| c.is_uppercase()) {
        score += 10;
    }
    let words = trimmed.split_whitespace().count();
    if (2..=6).contains(&words) {
        score += 20;
    }
    if PROMO_RE.is_match(trimmed) {
        score -= 40;
    }
    if PLATFORM_RE.is_match(trimmed) {
        score -= 30;
    }
    if UNIT_WORD_RE.is_match(trimmed) {
        score -= 20;
    }
    if words == 1 {
        score -= 20;
    }
    if words > 8 {
        score -= 20;
    }
    Some(score)
}

fn push_candidate(out: &mut Vec<TitleCandidate>, text: &str, source: TitleSource, bonus: i32) {
    if let Some(score) = score_candidate(text) {
        out.push(TitleCandidate {
            text: text.trim().to_string(),
            score: score + bonus,
            source,
        });
    }
}

fn caption_candidates(caption: &str, out: &mut Vec<TitleCandidate>) {
    let normalized = normalize_caption(caption);
    if normalized.is_empty() {
        return;
    }

    // Quoted phrases carry priority weight.
    for caps in QUOTED_RE.captures_iter(&normalized) {
        if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
            push_candidate(out, m.as_str(), TitleSource::Caption, QUOTE_BONUS);
        }
    }

    // Lines before the ingredients header.
    let cut = INGREDIENTS_HEADER_RE
        .find(&normalized)
        .map_or(normalized.len(), |m| m.start());
    for line in normalized[..cut].lines().take(MAX_CANDIDATE_LINES) {
        let trimmed = trim_title_line(line);
        if !trimmed.is_empty() {
            push_candidate(out, &trimmed, TitleSource::Caption, 0);
        }
    }
}

fn page_title_candidate(page_title: &str, out: &mut Vec<TitleCandidate>) {
    // Strip the "| Site Name" suffix before scoring.
    let stripped = match SITE_SUFFIX_RE.find(page_title) {
        Some(m) => &page_title[..m.start()],
        None => page_title,
    };
    push_candidate(out, stripped.trim(), TitleSource::PageTitle, 0);
}

fn line_candidates(text: &str, source: TitleSource, out: &mut Vec<TitleCandidate>) {
    for line in text.lines().take(MAX_CANDIDATE_LINES) {
        let trimmed = trim_title_line(line);
        if !trimmed.is_empty() {
            push_candidate(out, &trimmed, source, 0);
        }
    }
}

/// Pick the best dish title from the supplied sources, or `None` when no
/// candidate scores high enough. Ties prefer caption over page title over
/// description over fallback text.
pub fn extract_recipe_title(sources: &TitleSources) -> Option<String> {
    let mut candidates: Vec<TitleCandidate> = Vec::new();

    if let Some(caption) = sources.caption {
        caption_candidates(caption, &mut candidates);
    }
    if let Some(page_title) = sources.page_title {
        page_title_candidate(page_title, &mut candidates);
    }
    if let Some(description) = sources.description {
        line_candidates(description, TitleSource::Description, &mut candidates);
    }
    if let Some(text) = sources.text {
        line_candidates(text, TitleSource::Fallback, &mut candidates);
    }

    let winner = candidates
        .into_iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| {
            a.score
                .cmp(&b.score)
                .then_with(|| b.source.cmp(&a.source))
                .then_with(|| ib.cmp(ia))
        })
        .map(|(_, c)| c)?;

    if winner.score >= MIN_WINNING_SCORE {
        debug!(
            "Title winner {:?} (score {}, source {:?})",
            winner.text, winner.score, winner.source
        );
        Some(winner.text)
    } else {
        debug!("No title candidate reached the threshold");
        None
    }
}
