//! Ties the keyword provider to the relevance engine.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    keywords::{self, Candidate, KeywordSummary, SortBy, Threshold},
    provider::{fan_out, KeywordRequest, KeywordSource, ResearchMode},
};

/// Keywords shown when no search has been made yet.
pub const DEFAULT_KEYWORDS: [&str; 2] = ["seo tools", "keyword research"];

#[derive(Clone, Debug)]
pub struct ResearchQuery {
    pub request: KeywordRequest,
    pub modes: Vec<ResearchMode>,
    pub threshold: Threshold,
    pub sort: SortBy,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchOutcome {
    pub keywords: Vec<Candidate>,
    pub summary: Option<KeywordSummary>,
}

impl ResearchOutcome {
    pub fn new(mut keywords: Vec<Candidate>, sort: SortBy) -> Self {
        keywords::sort_candidates(&mut keywords, sort);
        let summary = KeywordSummary::from_candidates(&keywords);
        Self { keywords, summary }
    }
}

pub struct Researcher {
    source: Arc<dyn KeywordSource>,
}

impl Researcher {
    pub fn new(source: Arc<dyn KeywordSource>) -> Self {
        Self { source }
    }

    /// Fetches every requested mode in parallel, filters each response
    /// against the seed as it lands, and merges the survivors.
    ///
    /// A blank seed yields an empty outcome without touching the provider.
    pub fn research(&self, query: &ResearchQuery) -> ResearchOutcome {
        let seed = query.request.seed();
        if seed.is_empty() {
            log::debug!("empty seed, skipping provider");
            return ResearchOutcome::default();
        }

        let modes = if query.modes.is_empty() {
            vec![ResearchMode::Ideas]
        } else {
            query.modes.clone()
        };

        let lists = fan_out(self.source.as_ref(), &modes, &query.request, |mode, records| {
            let accepted = keywords::filter_and_score(&records, &seed, query.threshold);
            log::info!(
                "mode={mode} seed={seed:?} accepted {}/{}",
                accepted.len(),
                records.len()
            );
            accepted
        });

        let merged = keywords::merge_candidates(lists.into_iter().map(|(_, list)| list).collect());
        ResearchOutcome::new(merged, query.sort)
    }

    /// The dashboard's landing view: an overview of the default keywords.
    pub fn research_default(
        &self,
        location: &str,
        language: &str,
        threshold: Threshold,
        sort: SortBy,
    ) -> ResearchOutcome {
        let query = ResearchQuery {
            request: KeywordRequest {
                keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
                location: location.to_string(),
                language: language.to_string(),
                limit: 0,
            },
            modes: vec![ResearchMode::Overview],
            threshold,
            sort,
        };
        self.research(&query)
    }
}
