//! Spam and off-topic signatures.
//!
//! Matching is existential: the first matching signature is reported, and
//! pattern order never changes whether a text is flagged.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpamKind {
    SocialGrowth,
    GameCheat,
    Adult,
    Gambling,
    CryptoScam,
    MakeMoney,
    Shopping,
    HealthSupplement,
    ClickBait,
    ToolBrand,
    HardwareStore,
    Automotive,
}

static SPAM_PATTERNS: Lazy<Vec<(SpamKind, Regex)>> = Lazy::new(|| {
    [
        (
            SpamKind::SocialGrowth,
            r"\b(free|buy|get|cheap|instant)\s*(followers|likes|views|subscribers|shares)\b",
        ),
        (
            SpamKind::SocialGrowth,
            r"\b(tiktok|instagram|facebook|twitter|youtube|snapchat)\s*(followers|likes|views|bot|hack)\b",
        ),
        (
            SpamKind::SocialGrowth,
            r"\b(social\s*media)\s*(boost|growth|automation|bot)\b",
        ),
        (
            SpamKind::GameCheat,
            r"\b(download|hack|cheat|generator|mod|crack|keygen|serial)\b",
        ),
        (
            SpamKind::GameCheat,
            r"\b(minecraft|fortnite|roblox|pokemon)\s*(hack|cheat|free|generator)\b",
        ),
        (
            SpamKind::GameCheat,
            r"\b(app|software|game)\s*(hack|crack|free|download|generator)\b",
        ),
        (
            SpamKind::Adult,
            r"\b(porn|xxx|adult|sex|nude|naked|escort|dating)\b",
        ),
        (
            SpamKind::Adult,
            r"\b(cam|webcam|live|chat)\s*(girls|boys|sex|adult)\b",
        ),
        (
            SpamKind::Gambling,
            r"\b(casino|gambling|poker|bet|lottery|jackpot)\b",
        ),
        (
            SpamKind::CryptoScam,
            r"\b(crypto|bitcoin|ethereum|forex|trading|investment)\s*(bot|signal|strategy|scam)\b",
        ),
        (
            SpamKind::MakeMoney,
            r"\b(get\s*rich|make\s*money|easy\s*money|passive\s*income)\b",
        ),
        (
            SpamKind::Shopping,
            r"\b(cheap|discount|sale|deals|coupon|promo)\s*(online|buy|shop|store)\b",
        ),
        (
            SpamKind::Shopping,
            r"\b(wholesale|dropshipping|affiliate|mlm|pyramid)\b",
        ),
        (
            SpamKind::HealthSupplement,
            r"\b(lose\s*weight|weight\s*loss|diet\s*pills|supplements)\b",
        ),
        (
            SpamKind::HealthSupplement,
            r"\b(viagra|cialis|pharmacy|pills|medication)\s*(online|cheap|buy)\b",
        ),
        (
            SpamKind::ClickBait,
            r"\b(how\s*to\s*(get|make|earn))\s*(free|easy|fast|quick)\b",
        ),
        (
            SpamKind::ClickBait,
            r"\b(click\s*here|visit\s*now|limited\s*time|act\s*now)\b",
        ),
        (
            SpamKind::MakeMoney,
            r"\b(work\s*from\s*home|make\s*money\s*online|get\s*paid)\b",
        ),
        (
            SpamKind::ToolBrand,
            r"\b(ryobi|dewalt|milwaukee|makita|bosch|craftsman|kobalt|ridgid|grizzly|delta|porter\s*cable|black\s*decker|stanley)\s*(tools?|equipment|drill|saw|wrench)\b",
        ),
        (
            SpamKind::HardwareStore,
            r"\b(drill|hammer|saw|wrench|screwdriver|toolbox|workshop|garage|hardware\s*store|home\s*depot|lowes)\b",
        ),
        (
            SpamKind::Automotive,
            r"\b(car|auto|vehicle|engine|mechanic|automotive|tire|brake|oil\s*change)\b",
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("malformed spam regex")))
    .collect()
});

/// Seeds asking for digital tooling, which get the stricter physical-tool filter.
static DIGITAL_TOOL_SEED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(ai|artificial|digital|software|online)\s+\w*(tool|design|platform)\b")
        .expect("malformed digital tool regex")
});

/// Narrower seed pattern used by the compound-focus veto.
static DIGITAL_TOOLS_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(ai|digital|software|online)\s+\w*tools?\b")
        .expect("malformed digital tools regex")
});

static COMPOUND_TOOL_BRAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(ryobi|dewalt|milwaukee|makita|grizzly|craftsman|kobalt|ridgid|delta|porter|cable)\b")
        .expect("malformed tool brand regex")
});

static STRICT_TOOL_BRAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(ryobi|dewalt|milwaukee|makita|bosch|craftsman|kobalt|ridgid|grizzly|delta|porter|cable|black|decker|stanley|snap|on|klein|husky)\b")
        .expect("malformed strict tool brand regex")
});

static WORKSHOP_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(workshop|garage|construction|hardware|drill|saw|hammer|wrench|screwdriver|power\s*tools|hand\s*tools)\b")
        .expect("malformed workshop regex")
});

/// First spam signature matching `text`, if any.
pub fn spam_kind(text: &str) -> Option<SpamKind> {
    let text = text.to_lowercase();

    SPAM_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&text))
        .map(|(kind, _)| *kind)
}

pub fn is_spam(text: &str) -> bool {
    spam_kind(text).is_some()
}

/// Seed matches "ai/digital/software/online + ...tool(s)".
pub fn is_digital_tools_phrase(seed: &str) -> bool {
    DIGITAL_TOOLS_PHRASE.is_match(&seed.to_lowercase())
}

/// Seed matches "ai/artificial/digital/software/online + ...tool/design/platform".
pub fn is_digital_tool_seed(seed: &str) -> bool {
    DIGITAL_TOOL_SEED.is_match(&seed.to_lowercase())
}

/// Candidate names a well-known physical tool brand.
pub fn names_tool_brand(candidate: &str) -> bool {
    COMPOUND_TOOL_BRAND.is_match(&candidate.to_lowercase())
}

/// Wider brand list used once a seed is known to be about digital tooling.
/// Includes short tokens such as "on" and "snap" from "snap-on".
pub fn names_tool_brand_strict(candidate: &str) -> bool {
    STRICT_TOOL_BRAND.is_match(&candidate.to_lowercase())
}

pub fn names_workshop_term(candidate: &str) -> bool {
    WORKSHOP_TERM.is_match(&candidate.to_lowercase())
}
