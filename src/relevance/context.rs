//! Context resolution over the static vocabulary, plus the two consumers
//! built directly on top of it: tag similarity and conflict detection.

use std::collections::BTreeSet;

use super::vocabulary::{DomainTag, CONFLICTS, VOCABULARY};

/// Similarity reported when either side resolves to no tags at all.
/// This encodes "no signal", not a measured overlap.
pub const NEUTRAL_SIMILARITY: f64 = 0.5;

/// Returns every tag whose vocabulary intersects `text`.
///
/// Matching is bidirectional substring containment: a vocabulary word found
/// inside the text, or the whole text found inside a vocabulary word. The
/// second direction lets partial words ("graph", "tool") pick up a tag.
/// The empty string is inside every vocabulary word and resolves to all tags.
pub fn resolve_contexts(text: &str) -> BTreeSet<DomainTag> {
    let text = text.to_lowercase();

    VOCABULARY
        .iter()
        .filter(|(_, words)| {
            words
                .iter()
                .any(|word| text.contains(word) || word.contains(text.as_str()))
        })
        .map(|(tag, _)| *tag)
        .collect()
}

/// Jaccard index over the resolved tag sets of `a` and `b`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let left = resolve_contexts(a);
    let right = resolve_contexts(b);

    if left.is_empty() || right.is_empty() {
        return NEUTRAL_SIMILARITY;
    }

    let common = left.intersection(&right).count();
    let total = left.union(&right).count();

    common as f64 / total as f64
}

/// True when the seed and the candidate land on opposite sides of any
/// declared conflict pair, in either direction.
pub fn has_conflict(seed: &str, candidate: &str) -> bool {
    let seed_contexts = resolve_contexts(seed);
    let candidate_contexts = resolve_contexts(candidate);

    contexts_conflict(&seed_contexts, &candidate_contexts)
}

pub(crate) fn contexts_conflict(
    seed_contexts: &BTreeSet<DomainTag>,
    candidate_contexts: &BTreeSet<DomainTag>,
) -> bool {
    CONFLICTS.iter().any(|(a, b)| {
        (seed_contexts.contains(a) && candidate_contexts.contains(b))
            || (seed_contexts.contains(b) && candidate_contexts.contains(a))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_single_word() {
        let contexts = resolve_contexts("Figma");
        assert_eq!(contexts, BTreeSet::from([DomainTag::Design]));
    }

    #[test]
    fn test_resolve_partial_word_matches_vocabulary() {
        // "graph" is a substring of "graphic"
        assert!(resolve_contexts("graph").contains(&DomainTag::Design));
    }

    #[test]
    fn test_resolve_multi_tag() {
        let contexts = resolve_contexts("garage workshop");
        assert!(contexts.contains(&DomainTag::Construction));
        assert!(contexts.contains(&DomainTag::Automotive));
    }

    #[test]
    fn test_resolve_nothing() {
        assert!(resolve_contexts("zzz").is_empty());
        assert!(resolve_contexts("   ").is_empty());
    }

    #[test]
    fn test_resolve_empty_text_matches_every_tag() {
        let contexts = resolve_contexts("");
        assert_eq!(contexts.len(), VOCABULARY.len());
        assert!(has_conflict("chatgpt", ""));
    }

    #[test]
    fn test_similarity_neutral_without_signal() {
        assert_eq!(similarity("zzz", "figma"), NEUTRAL_SIMILARITY);
        assert_eq!(similarity("figma", "qqq"), NEUTRAL_SIMILARITY);
    }

    #[test]
    fn test_similarity_jaccard() {
        assert_eq!(similarity("figma", "photoshop"), 1.0);
        assert_eq!(similarity("figma", "bitcoin"), 0.0);
        // {design} vs {design, finance}
        assert_eq!(similarity("figma", "figma bitcoin"), 0.5);
    }

    #[test]
    fn test_conflict_is_symmetric() {
        assert!(has_conflict("chatgpt", "dewalt"));
        assert!(has_conflict("dewalt", "chatgpt"));
        assert!(!has_conflict("chatgpt", "bitcoin"));
    }
}
