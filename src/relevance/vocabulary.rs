//! Static domain vocabulary used by the context resolver.
//!
//! Both tables are plain `'static` data. Nothing in the crate holds a
//! mutable reference to them.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Coarse topical label attached to a piece of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainTag {
    Ai,
    Design,
    Digital,
    Construction,
    Automotive,
    Cooking,
    Fitness,
    Finance,
}

impl DomainTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainTag::Ai => "ai",
            DomainTag::Design => "design",
            DomainTag::Digital => "digital",
            DomainTag::Construction => "construction",
            DomainTag::Automotive => "automotive",
            DomainTag::Cooking => "cooking",
            DomainTag::Fitness => "fitness",
            DomainTag::Finance => "finance",
        }
    }
}

impl Display for DomainTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trigger words per tag, in declaration order. All lowercase.
pub static VOCABULARY: &[(DomainTag, &[&str])] = &[
    (
        DomainTag::Ai,
        &[
            "artificial",
            "intelligence",
            "machine",
            "learning",
            "neural",
            "algorithm",
            "automated",
            "smart",
            "cognitive",
            "generative",
            "chatgpt",
            "openai",
            "llm",
            "gpt",
            "midjourney",
            "stable diffusion",
        ],
    ),
    (
        DomainTag::Design,
        &[
            "graphic",
            "visual",
            "creative",
            "layout",
            "typography",
            "branding",
            "logo",
            "illustration",
            "photoshop",
            "figma",
            "sketch",
            "canva",
            "adobe",
            "ui",
            "ux",
            "interface",
        ],
    ),
    (
        DomainTag::Digital,
        &[
            "software",
            "app",
            "online",
            "web",
            "digital",
            "virtual",
            "cloud",
            "saas",
            "platform",
            "dashboard",
            "api",
            "tech",
            "technology",
        ],
    ),
    (
        DomainTag::Construction,
        &[
            "ryobi",
            "dewalt",
            "milwaukee",
            "makita",
            "bosch",
            "craftsman",
            "kobalt",
            "ridgid",
            "grizzly",
            "delta",
            "porter",
            "cable",
            "drill",
            "saw",
            "hammer",
            "wrench",
            "screwdriver",
            "toolbox",
            "workshop",
            "garage",
            "hardware",
            "power tools",
            "hand tools",
        ],
    ),
    (
        DomainTag::Automotive,
        &[
            "car",
            "auto",
            "vehicle",
            "engine",
            "mechanic",
            "garage",
            "automotive",
            "repair",
            "maintenance",
            "parts",
        ],
    ),
    (
        DomainTag::Cooking,
        &[
            "recipe",
            "kitchen",
            "cooking",
            "baking",
            "chef",
            "food",
            "culinary",
            "ingredient",
            "meal",
        ],
    ),
    (
        DomainTag::Fitness,
        &[
            "workout",
            "exercise",
            "gym",
            "fitness",
            "training",
            "muscle",
            "cardio",
            "strength",
            "health",
        ],
    ),
    (
        DomainTag::Finance,
        &[
            "money",
            "investment",
            "trading",
            "stock",
            "crypto",
            "bitcoin",
            "financial",
            "bank",
            "loan",
            "credit",
        ],
    ),
];

/// Unordered pairs of tags that may not describe the same search intent.
pub static CONFLICTS: &[(DomainTag, DomainTag)] = &[
    (DomainTag::Ai, DomainTag::Construction),
    (DomainTag::Ai, DomainTag::Automotive),
    (DomainTag::Design, DomainTag::Construction),
    (DomainTag::Design, DomainTag::Automotive),
    (DomainTag::Digital, DomainTag::Construction),
    (DomainTag::Digital, DomainTag::Automotive),
];

/// Directional (seed tag, candidate tag) pairs checked by the gate for
/// low-scoring candidates. Narrower than [`CONFLICTS`].
pub static LOW_SCORE_CONFLICTS: &[(DomainTag, DomainTag)] = &[
    (DomainTag::Ai, DomainTag::Construction),
    (DomainTag::Design, DomainTag::Construction),
    (DomainTag::Digital, DomainTag::Construction),
    (DomainTag::Ai, DomainTag::Automotive),
    (DomainTag::Design, DomainTag::Automotive),
];
