//! Coarse topical classifier driven by whole-word patterns.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Animals,
    Technology,
    Business,
    Design,
    Health,
    Education,
    Finance,
    RealEstate,
    Food,
    Travel,
    /// Fallback when no pattern matches.
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Animals => "animals",
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Design => "design",
            Category::Health => "health",
            Category::Education => "education",
            Category::Finance => "finance",
            Category::RealEstate => "real_estate",
            Category::Food => "food",
            Category::Travel => "travel",
            Category::General => "general",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

static CATEGORY_PATTERNS: Lazy<Vec<(Category, Regex)>> = Lazy::new(|| {
    [
        (
            Category::Animals,
            r"\b(chicken|hen|rooster|coop|farm|barn|animal|pet|livestock|poultry|cattle|horse|pig|sheep|goat|duck|rabbit|feed|vet|veterinary)\b",
        ),
        (
            Category::Technology,
            r"\b(app|software|digital|online|website|tech|computer|mobile|programming|code|development|ai|artificial|intelligence|saas|platform|api)\b",
        ),
        (
            Category::Business,
            r"\b(business|marketing|seo|agency|service|company|professional|corporate|enterprise|consulting|strategy|branding|advertising)\b",
        ),
        (
            Category::Design,
            r"\b(design|creative|graphic|logo|branding|ui|ux|web\s*design|visual|artist|portfolio|typography|color)\b",
        ),
        (
            Category::Health,
            r"\b(health|medical|doctor|clinic|hospital|treatment|medicine|therapy|wellness|fitness|nutrition)\b",
        ),
        (
            Category::Education,
            r"\b(education|school|course|training|learning|study|tutorial|university|college|certification)\b",
        ),
        (
            Category::Finance,
            r"\b(finance|money|investment|loan|credit|bank|insurance|tax|accounting|financial|budget)\b",
        ),
        (
            Category::RealEstate,
            r"\b(real\s*estate|property|house|home|apartment|rent|buy|sell|mortgage|realtor|listing)\b",
        ),
        (
            Category::Food,
            r"\b(food|restaurant|recipe|cooking|chef|kitchen|meal|dining|cuisine|menu)\b",
        ),
        (
            Category::Travel,
            r"\b(travel|vacation|hotel|flight|tourism|trip|destination|booking|resort|cruise)\b",
        ),
    ]
    .into_iter()
    .map(|(category, pattern)| (category, Regex::new(pattern).expect("malformed category regex")))
    .collect()
});

/// Every category whose pattern matches `text`, or `{General}` if none do.
pub fn categorize(text: &str) -> BTreeSet<Category> {
    let text = text.to_lowercase();

    let categories: BTreeSet<Category> = CATEGORY_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&text))
        .map(|(category, _)| *category)
        .collect();

    if categories.is_empty() {
        BTreeSet::from([Category::General])
    } else {
        categories
    }
}

/// True when the two texts share at least one category.
pub fn shares_category(a: &str, b: &str) -> bool {
    !categorize(a).is_disjoint(&categorize(b))
}
