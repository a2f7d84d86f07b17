//! Relevance score of a candidate keyword against a seed term.
//!
//! The score combines, in order:
//! 1. hard vetoes (blank seed, conflicting domains)
//! 2. exact and phrase matches
//! 3. word overlap with context-aware partial credit
//! 4. additive bonuses and a length penalty
//!
//! The result is always within `[0, 100]`.

use serde::Serialize;

use super::context::{has_conflict, resolve_contexts, similarity};

pub const MAX_SCORE: f64 = 100.0;
pub const EXACT_MATCH_SCORE: f64 = 100.0;
pub const PHRASE_MATCH_SCORE: f64 = 90.0;

/// Seed words must be longer than this many characters to count.
const MIN_SEED_WORD_LEN: usize = 2;
/// A contextual match is worth this fraction of an exact word match.
const CONTEXTUAL_MATCH_WEIGHT: f64 = 0.7;
/// Below this overlap ratio the candidate scores zero.
const MIN_OVERLAP_RATIO: f64 = 0.4;

const OVERLAP_WEIGHT: f64 = 60.0;
const SIMILARITY_WEIGHT: f64 = 30.0;
const EXACT_WORD_WEIGHT: f64 = 20.0;

const HIGH_OVERLAP_RATIO: f64 = 0.8;
const HIGH_OVERLAP_BONUS: f64 = 15.0;
const MEDIUM_OVERLAP_RATIO: f64 = 0.6;
const MEDIUM_OVERLAP_BONUS: f64 = 8.0;
const LEADING_WORD_BONUS: f64 = 5.0;

const LONG_RATIO: f64 = 3.0;
const LONG_PENALTY: f64 = 20.0;
const WIDE_RATIO: f64 = 2.0;
const WIDE_PENALTY: f64 = 10.0;

/// Where scoring stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStage {
    EmptySeed,
    Conflict,
    ExactMatch,
    PhraseMatch,
    InsufficientOverlap,
    Weighted,
}

/// Intermediate values of one scoring run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub stage: ScoreStage,
    pub seed_words: usize,
    pub exact_matches: usize,
    pub contextual_matches: usize,
    pub overlap_ratio: f64,
    pub similarity: f64,
    pub bonus: f64,
    pub penalty: f64,
    pub score: f64,
}

impl ScoreBreakdown {
    fn terminal(stage: ScoreStage, score: f64) -> Self {
        Self {
            stage,
            seed_words: 0,
            exact_matches: 0,
            contextual_matches: 0,
            overlap_ratio: 0.0,
            similarity: 0.0,
            bonus: 0.0,
            penalty: 0.0,
            score,
        }
    }
}

/// Relevance of `candidate` to `seed`, within `[0, 100]`.
pub fn score(candidate: &str, seed: &str) -> f64 {
    explain(candidate, seed).score
}

/// Same as [`score`], but keeps every intermediate value.
pub fn explain(candidate: &str, seed: &str) -> ScoreBreakdown {
    if seed.trim().is_empty() {
        return ScoreBreakdown::terminal(ScoreStage::EmptySeed, 0.0);
    }

    if has_conflict(seed, candidate) {
        return ScoreBreakdown::terminal(ScoreStage::Conflict, 0.0);
    }

    let candidate_lower = candidate.to_lowercase();
    let seed_lower = seed.to_lowercase();

    if candidate_lower == seed_lower {
        return ScoreBreakdown::terminal(ScoreStage::ExactMatch, EXACT_MATCH_SCORE);
    }

    if candidate_lower.contains(&seed_lower) {
        return ScoreBreakdown::terminal(ScoreStage::PhraseMatch, PHRASE_MATCH_SCORE);
    }

    let seed_words: Vec<&str> = seed_lower
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_SEED_WORD_LEN)
        .collect();
    let candidate_words: Vec<&str> = candidate_lower.split_whitespace().collect();

    let (exact_matches, contextual_matches) = count_matches(&seed_words, &candidate_words);

    let seed_word_count = seed_words.len();
    let overlap_ratio = if seed_word_count == 0 {
        0.0
    } else {
        (exact_matches as f64 + contextual_matches as f64 * CONTEXTUAL_MATCH_WEIGHT)
            / seed_word_count as f64
    };

    let mut breakdown = ScoreBreakdown {
        stage: ScoreStage::InsufficientOverlap,
        seed_words: seed_word_count,
        exact_matches,
        contextual_matches,
        overlap_ratio,
        similarity: 0.0,
        bonus: 0.0,
        penalty: 0.0,
        score: 0.0,
    };

    if overlap_ratio < MIN_OVERLAP_RATIO {
        return breakdown;
    }

    let similarity = similarity(seed, candidate);
    let exact_ratio = exact_matches as f64 / seed_word_count as f64;

    let mut bonus = 0.0;
    if overlap_ratio >= HIGH_OVERLAP_RATIO {
        bonus += HIGH_OVERLAP_BONUS;
    } else if overlap_ratio >= MEDIUM_OVERLAP_RATIO {
        bonus += MEDIUM_OVERLAP_BONUS;
    }
    if candidate_lower.starts_with(seed_words[0]) {
        bonus += LEADING_WORD_BONUS;
    }

    let length_ratio = candidate.chars().count() as f64 / seed.chars().count() as f64;
    let penalty = if length_ratio > LONG_RATIO {
        LONG_PENALTY
    } else if length_ratio > WIDE_RATIO {
        WIDE_PENALTY
    } else {
        0.0
    };

    let raw = overlap_ratio * OVERLAP_WEIGHT
        + similarity * SIMILARITY_WEIGHT
        + exact_ratio * EXACT_WORD_WEIGHT
        + bonus
        - penalty;

    breakdown.stage = ScoreStage::Weighted;
    breakdown.similarity = similarity;
    breakdown.bonus = bonus;
    breakdown.penalty = penalty;
    breakdown.score = raw.clamp(0.0, MAX_SCORE);
    breakdown
}

/// Counts seed words found verbatim in the candidate, and, for the rest,
/// seed words sharing at least one domain tag with some candidate word.
fn count_matches(seed_words: &[&str], candidate_words: &[&str]) -> (usize, usize) {
    let candidate_contexts: Vec<_> = candidate_words
        .iter()
        .map(|word| resolve_contexts(word))
        .collect();

    let mut exact = 0;
    let mut contextual = 0;

    for seed_word in seed_words {
        if candidate_words.contains(seed_word) {
            exact += 1;
            continue;
        }

        let seed_contexts = resolve_contexts(seed_word);
        let shares_context = candidate_contexts
            .iter()
            .any(|contexts| !seed_contexts.is_disjoint(contexts));
        if shares_context {
            contextual += 1;
        }
    }

    (exact, contextual)
}
