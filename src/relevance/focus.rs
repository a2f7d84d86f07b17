//! Compound-term focus: whether a domain trigger word leads a phrase
//! ("ai tools") or trails it ("tools for ai").

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    AiPrimary,
    AiSecondary,
    DesignPrimary,
    DesignSecondary,
    SoftwarePrimary,
    SoftwareSecondary,
    PhysicalToolsPrimary,
}

impl Focus {
    /// Digital or creative focus that excludes physical-tool candidates.
    pub fn is_digital_primary(&self) -> bool {
        matches!(
            self,
            Focus::AiPrimary | Focus::DesignPrimary | Focus::SoftwarePrimary
        )
    }
}

const AI_TRIGGERS: &str = r"ai|artificial\s*intelligence|machine\s*learning|neural|algorithm";
const DESIGN_TRIGGERS: &str = r"design|graphic|visual|creative|ui|ux";
const SOFTWARE_TRIGGERS: &str = r"software|digital|online|app|platform|tool";

/// Physical tool brands recognised in compound terms.
pub(crate) const TOOL_BRANDS: &str = r"ryobi|dewalt|milwaukee|makita|grizzly|craftsman";

static FOCUS_PATTERNS: Lazy<Vec<(Focus, Regex)>> = Lazy::new(|| {
    let leading = |triggers: &str| format!(r"\b({triggers})\s+\w+");
    let trailing = |triggers: &str| format!(r"\w+\s+({triggers})\b");

    [
        (Focus::AiPrimary, leading(AI_TRIGGERS)),
        (Focus::AiSecondary, trailing(AI_TRIGGERS)),
        (Focus::DesignPrimary, leading(DESIGN_TRIGGERS)),
        (Focus::DesignSecondary, trailing(DESIGN_TRIGGERS)),
        (Focus::SoftwarePrimary, leading(SOFTWARE_TRIGGERS)),
        (Focus::SoftwareSecondary, trailing(SOFTWARE_TRIGGERS)),
        (
            Focus::PhysicalToolsPrimary,
            r"\b(power|hand|construction|workshop|garage)\s+(tool|equipment)\b".to_string(),
        ),
        (Focus::PhysicalToolsPrimary, leading(TOOL_BRANDS)),
    ]
    .into_iter()
    .map(|(focus, pattern)| (focus, Regex::new(&pattern).expect("malformed focus regex")))
    .collect()
});

/// All focus tags carried by `text`. Primary and secondary tags for
/// different domains may appear together.
pub fn focus_tags(text: &str) -> BTreeSet<Focus> {
    let text = text.to_lowercase();

    FOCUS_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&text))
        .map(|(focus, _)| *focus)
        .collect()
}
