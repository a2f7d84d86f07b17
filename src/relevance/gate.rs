//! Final accept/reject decision for a candidate keyword.
//!
//! Cheap fixed-cost vetoes run first, then the numeric score decides the
//! common case. The textual heuristics below only run for candidates
//! scoring under the threshold.

use serde::Serialize;

use super::category::shares_category;
use super::context::resolve_contexts;
use super::focus::{focus_tags, Focus};
use super::scoring::{explain, ScoreStage};
use super::spam::{
    is_digital_tool_seed, is_digital_tools_phrase, names_tool_brand, names_tool_brand_strict,
    names_workshop_term, spam_kind, SpamKind,
};
use super::vocabulary::LOW_SCORE_CONFLICTS;

/// Under this score, candidates must share a category with the seed.
pub const CATEGORY_CHECK_BELOW: f64 = 40.0;
/// Under this score, the directional context-conflict list applies.
pub const CONTEXT_CHECK_BELOW: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RejectReason {
    EmptySeed,
    ConflictingContext,
    CompoundFocus,
    DigitalToolBrand,
    Spam(SpamKind),
    PhysicalToolTerm,
    CategoryMismatch,
    ContextConflict,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Accepted { score: f64 },
    Rejected { score: f64, reason: RejectReason },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }

    pub fn score(&self) -> f64 {
        match self {
            Verdict::Accepted { score } | Verdict::Rejected { score, .. } => *score,
        }
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            Verdict::Accepted { .. } => None,
            Verdict::Rejected { reason, .. } => Some(*reason),
        }
    }
}

pub fn is_relevant(candidate: &str, seed: &str, threshold: f64) -> bool {
    evaluate(candidate, seed, threshold).is_accepted()
}

/// Runs the full gate and reports why a candidate was dropped.
pub fn evaluate(candidate: &str, seed: &str, threshold: f64) -> Verdict {
    let reject = |score: f64, reason: RejectReason| Verdict::Rejected { score, reason };

    if let Some(reason) = compound_focus_veto(candidate, seed) {
        return reject(0.0, reason);
    }

    let breakdown = explain(candidate, seed);
    let score = breakdown.score;

    // Hard vetoes hold even when the threshold disables score enforcement.
    match breakdown.stage {
        ScoreStage::EmptySeed => return reject(score, RejectReason::EmptySeed),
        ScoreStage::Conflict => return reject(score, RejectReason::ConflictingContext),
        _ => {}
    }

    if score >= threshold {
        return Verdict::Accepted { score };
    }

    if let Some(kind) = spam_kind(candidate) {
        return reject(score, RejectReason::Spam(kind));
    }

    if is_digital_tool_seed(seed)
        && (names_tool_brand_strict(candidate) || names_workshop_term(candidate))
    {
        return reject(score, RejectReason::PhysicalToolTerm);
    }

    if score < CATEGORY_CHECK_BELOW && !shares_category(seed, candidate) {
        return reject(score, RejectReason::CategoryMismatch);
    }

    // Every pair here is also in CONFLICTS, so the hard veto above rejects
    // these candidates first. Kept as the second, directional table.
    if score < CONTEXT_CHECK_BELOW && low_score_context_conflict(candidate, seed) {
        return reject(score, RejectReason::ContextConflict);
    }

    Verdict::Accepted { score }
}

fn compound_focus_veto(candidate: &str, seed: &str) -> Option<RejectReason> {
    let seed_focus = focus_tags(seed);
    if seed_focus.iter().any(Focus::is_digital_primary)
        && focus_tags(candidate).contains(&Focus::PhysicalToolsPrimary)
    {
        return Some(RejectReason::CompoundFocus);
    }

    if is_digital_tools_phrase(seed) && names_tool_brand(candidate) {
        return Some(RejectReason::DigitalToolBrand);
    }

    None
}

fn low_score_context_conflict(candidate: &str, seed: &str) -> bool {
    let seed_contexts = resolve_contexts(seed);
    let candidate_contexts = resolve_contexts(candidate);

    LOW_SCORE_CONFLICTS
        .iter()
        .any(|(s, c)| seed_contexts.contains(s) && candidate_contexts.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_above_threshold() {
        let verdict = evaluate("keyword research tool", "keyword research", 60.0);
        assert_eq!(verdict, Verdict::Accepted { score: 90.0 });
    }

    #[test]
    fn test_compound_focus_veto() {
        let verdict = evaluate("ryobi power drill", "ai design tools", 0.0);
        assert_eq!(verdict.reason(), Some(RejectReason::CompoundFocus));
    }

    #[test]
    fn test_digital_tool_brand_veto() {
        let verdict = evaluate("kobalt", "ai tools", 0.0);
        assert_eq!(verdict.reason(), Some(RejectReason::DigitalToolBrand));
    }

    #[test]
    fn test_spam_below_threshold() {
        let verdict = evaluate("free instagram followers hack", "seo tools", 60.0);
        assert_eq!(
            verdict.reason(),
            Some(RejectReason::Spam(SpamKind::SocialGrowth))
        );
    }

    #[test]
    fn test_category_mismatch() {
        let verdict = evaluate("chicken coop plans", "best seo agency services", 40.0);
        assert_eq!(verdict.reason(), Some(RejectReason::CategoryMismatch));
    }

    #[test]
    fn test_zero_threshold_accepts_unrelated_but_clean() {
        assert!(is_relevant("chicken coop plans", "best seo agency services", 0.0));
    }

    #[test]
    fn test_empty_seed_rejects_everything() {
        assert_eq!(
            evaluate("anything", "  ", 0.0).reason(),
            Some(RejectReason::EmptySeed)
        );
    }

    #[test]
    fn test_physical_tool_term_for_digital_seed() {
        for threshold in [40.0, 60.0, 75.0, 90.0] {
            let verdict = evaluate("stanley knife", "ai design tools", threshold);
            assert_eq!(verdict.reason(), Some(RejectReason::PhysicalToolTerm));
        }
        assert!(is_relevant("stanley knife", "ai design tools", 0.0));
    }

    #[test]
    fn test_low_score_conflicts_hit_hard_veto_first() {
        // (ai, construction) and (design, automotive) from the directional list
        for (candidate, seed) in [("dewalt drill", "chatgpt prompts"), ("car repair", "figma")] {
            for threshold in [0.0, 40.0, 60.0, 75.0, 90.0] {
                assert_eq!(
                    evaluate(candidate, seed, threshold).reason(),
                    Some(RejectReason::ConflictingContext)
                );
            }
        }
    }

    #[test]
    fn test_conflict_rejects_at_zero_threshold() {
        let verdict = evaluate("dewalt drill", "chatgpt prompts", 0.0);
        assert_eq!(verdict.reason(), Some(RejectReason::ConflictingContext));
    }
}
