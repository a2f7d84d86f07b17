//! Keyword relevance engine.
//!
//! Scores candidate keywords against a seed term and filters out spam and
//! off-topic results. Everything here is pure and synchronous; the static
//! tables are built once and only read afterwards, so all functions can
//! be called from any thread.
//!
//! # Architecture
//!
//! - `vocabulary`: domain tags, trigger words and conflict pairs
//! - `context`: tag resolution, tag similarity, conflict detection
//! - `scoring`: the 0..=100 relevance score
//! - `category`: coarse topical categories
//! - `focus`: compound-term focus (leading vs trailing trigger words)
//! - `spam`: spam signatures and physical-tool filters
//! - `gate`: the final accept/reject decision

mod category;
mod context;
mod focus;
mod gate;
mod scoring;
mod spam;
mod vocabulary;

pub use category::{categorize, shares_category, Category};
pub use context::{has_conflict, resolve_contexts, similarity, NEUTRAL_SIMILARITY};
pub use focus::{focus_tags, Focus};
pub use gate::{evaluate, is_relevant, RejectReason, Verdict};
pub use scoring::{explain, score, ScoreBreakdown, ScoreStage};
pub use spam::{is_spam, spam_kind, SpamKind};
pub use vocabulary::DomainTag;
