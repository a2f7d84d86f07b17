use crate::relevance::{
    categorize, evaluate, has_conflict, is_relevant, resolve_contexts, score, Category,
    RejectReason, SpamKind,
};

const THRESHOLDS: [f64; 5] = [0.0, 40.0, 60.0, 75.0, 90.0];

const SAMPLES: &[&str] = &[
    "seo tools",
    "keyword research",
    "design agency",
    "ai design tools",
    "ryobi power drill",
    "chicken coop plans",
    "best seo agency services",
    "free instagram followers hack",
    "Figma templates",
    "café menu design",
    "  padded  ",
    "???",
    "a",
    "is it",
    "machine learning course",
    "car repair near me",
    "bitcoin wallet",
    "dewalt drill",
    "chatgpt prompts",
    "real estate listing",
    "日本語 キーワード",
    "",
];

#[test]
fn test_self_score_is_exact_match() {
    for seed in SAMPLES {
        if seed.trim().is_empty() || has_conflict(seed, seed) {
            continue;
        }
        assert_eq!(score(seed, seed), 100.0, "seed {seed:?}");
    }
}

#[test]
fn test_single_letter_seed_conflicts_with_itself() {
    // "a" is a substring of vocabulary words from conflicting domains
    assert!(has_conflict("a", "a"));
    assert_eq!(score("a", "a"), 0.0);
}

#[test]
fn test_scores_are_bounded() {
    for seed in SAMPLES {
        for candidate in SAMPLES {
            let value = score(candidate, seed);
            assert!(
                (0.0..=100.0).contains(&value),
                "score({candidate:?}, {seed:?}) = {value}"
            );
        }
    }
}

#[test]
fn test_empty_seed_scores_zero() {
    for candidate in SAMPLES {
        assert_eq!(score(candidate, ""), 0.0);
        assert_eq!(score(candidate, "   "), 0.0);
        for threshold in THRESHOLDS {
            assert!(!is_relevant(candidate, "", threshold));
        }
    }
}

#[test]
fn test_conflict_rejects_at_every_threshold() {
    for seed in SAMPLES {
        for candidate in SAMPLES {
            if !has_conflict(seed, candidate) {
                continue;
            }
            assert_eq!(score(candidate, seed), 0.0, "{candidate:?} vs {seed:?}");
            for threshold in THRESHOLDS {
                assert!(
                    !is_relevant(candidate, seed, threshold),
                    "{candidate:?} vs {seed:?} at {threshold}"
                );
            }
        }
    }
}

#[test]
fn test_raising_threshold_never_accepts() {
    for seed in SAMPLES {
        for candidate in SAMPLES {
            let accepted: Vec<bool> = THRESHOLDS
                .iter()
                .map(|t| is_relevant(candidate, seed, *t))
                .collect();
            for pair in accepted.windows(2) {
                assert!(
                    pair[0] || !pair[1],
                    "{candidate:?} vs {seed:?}: {accepted:?}"
                );
            }
        }
    }
}

#[test]
fn test_resolvers_are_deterministic() {
    for text in SAMPLES {
        assert_eq!(categorize(text), categorize(text));
        assert_eq!(resolve_contexts(text), resolve_contexts(text));
    }
}

#[test]
fn test_physical_tool_rejected_for_digital_design_seed() {
    for threshold in THRESHOLDS {
        assert!(!is_relevant("ryobi power drill", "ai design tools", threshold));
    }
    assert_eq!(
        evaluate("ryobi power drill", "ai design tools", 0.0).reason(),
        Some(RejectReason::CompoundFocus)
    );
}

#[test]
fn test_candidate_containing_seed() {
    let verdict = evaluate("keyword research tool", "keyword research", 60.0);
    assert!(verdict.is_accepted());
    assert_eq!(verdict.score(), 90.0);
}

#[test]
fn test_exact_match() {
    assert_eq!(score("design agency", "design agency"), 100.0);
    assert_eq!(score("SEO Tools", "seo tools"), 100.0);
}

#[test]
fn test_spam_rejected() {
    for threshold in [40.0, 60.0, 75.0, 90.0] {
        assert_eq!(
            evaluate("free instagram followers hack", "seo tools", threshold).reason(),
            Some(RejectReason::Spam(SpamKind::SocialGrowth))
        );
    }
}

#[test]
fn test_category_mismatch() {
    assert!(categorize("best seo agency services").contains(&Category::Business));
    assert!(categorize("chicken coop plans").contains(&Category::Animals));

    assert_eq!(
        evaluate("chicken coop plans", "best seo agency services", 40.0).reason(),
        Some(RejectReason::CategoryMismatch)
    );
    assert_eq!(
        evaluate("best seo agency services", "chicken coop plans", 40.0).reason(),
        Some(RejectReason::CategoryMismatch)
    );
}

#[test]
fn test_low_score_accepted_without_filters() {
    // below the threshold, but no filter objects
    let verdict = evaluate("keyword research", "seo tools keyword research", 90.0);
    assert!(verdict.is_accepted());
    assert_eq!(verdict.score(), 55.0);
}

#[test]
fn test_physical_tool_term_rejected_for_digital_seed() {
    for threshold in [40.0, 60.0, 75.0, 90.0] {
        assert_eq!(
            evaluate("stanley knife", "ai design tools", threshold).reason(),
            Some(RejectReason::PhysicalToolTerm)
        );
    }
}

#[test]
fn test_empty_candidate_conflicts_with_tagged_seed() {
    // "" resolves to every tag
    for threshold in THRESHOLDS {
        assert_eq!(
            evaluate("", "chatgpt", threshold).reason(),
            Some(RejectReason::ConflictingContext)
        );
    }
}

#[test]
fn test_conflicting_context_at_zero_threshold() {
    assert_eq!(
        evaluate("dewalt drill", "chatgpt prompts", 0.0).reason(),
        Some(RejectReason::ConflictingContext)
    );
}
