use std::sync::{Arc, Mutex};

use crate::errors::{AppError, AppResult};
use crate::keywords::{RawRecord, SortBy, Threshold};
use crate::provider::{KeywordRequest, KeywordSource, ResearchMode};
use crate::research::{ResearchQuery, Researcher, DEFAULT_KEYWORDS};

/// Serves canned keywords per mode and records what it was asked.
#[derive(Default)]
struct CannedSource {
    requests: Mutex<Vec<(ResearchMode, KeywordRequest)>>,
}

fn rows(keywords: &[(&str, f64)]) -> Vec<RawRecord> {
    keywords
        .iter()
        .map(|(keyword, volume)| {
            serde_json::from_value(serde_json::json!({
                "keyword": keyword,
                "keyword_info": {"search_volume": volume},
            }))
            .unwrap()
        })
        .collect()
}

impl KeywordSource for CannedSource {
    fn fetch(&self, mode: ResearchMode, request: &KeywordRequest) -> AppResult<Vec<RawRecord>> {
        self.requests.lock().unwrap().push((mode, request.clone()));

        match mode {
            ResearchMode::Ideas => Ok(rows(&[
                ("seo tools", 5000.0),
                ("best seo tools", 1200.0),
                ("free instagram followers hack", 90000.0),
            ])),
            ResearchMode::Related => Ok(rows(&[("SEO Tools", 5000.0), ("seo tools online", 300.0)])),
            ResearchMode::Questions => Err(AppError::Provider {
                status_code: 50000,
                message: "Internal Error".to_string(),
            }),
            ResearchMode::LongTail => Ok(vec![]),
            ResearchMode::Overview => Ok(rows(&[
                ("seo tools", 5000.0),
                ("keyword research", 8000.0),
            ])),
        }
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

fn query(keywords: &[&str], modes: Vec<ResearchMode>) -> ResearchQuery {
    ResearchQuery {
        request: KeywordRequest {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            location: "United States".to_string(),
            language: "English".to_string(),
            limit: 20,
        },
        modes,
        threshold: Threshold::default(),
        sort: SortBy::Relevance,
    }
}

#[test]
fn test_research_merges_modes() {
    let source = Arc::new(CannedSource::default());
    let researcher = Researcher::new(source.clone());

    let outcome = researcher.research(&query(
        &["seo tools"],
        vec![ResearchMode::Ideas, ResearchMode::Related, ResearchMode::Questions],
    ));

    let keywords: Vec<&str> = outcome.keywords.iter().map(|c| c.keyword.as_str()).collect();
    assert_eq!(keywords.len(), 3);
    assert_eq!(keywords[0].to_lowercase(), "seo tools");
    assert!(keywords.contains(&"best seo tools"));
    assert!(keywords.contains(&"seo tools online"));

    let summary = outcome.summary.unwrap();
    assert_eq!(summary.total_keywords, 3);
    assert_eq!(summary.total_volume, 6500);

    assert_eq!(source.requests.lock().unwrap().len(), 3);
}

#[test]
fn test_research_failure_is_empty() {
    let researcher = Researcher::new(Arc::new(CannedSource::default()));

    let outcome = researcher.research(&query(&["seo tools"], vec![ResearchMode::Questions]));

    assert!(outcome.keywords.is_empty());
    assert_eq!(outcome.summary, None);
}

#[test]
fn test_blank_seed_skips_provider() {
    let source = Arc::new(CannedSource::default());
    let researcher = Researcher::new(source.clone());

    let outcome = researcher.research(&query(&["  ", ""], vec![ResearchMode::Ideas]));

    assert!(outcome.keywords.is_empty());
    assert!(source.requests.lock().unwrap().is_empty());
}

#[test]
fn test_no_modes_defaults_to_ideas() {
    let source = Arc::new(CannedSource::default());
    let researcher = Researcher::new(source.clone());

    researcher.research(&query(&["seo tools"], vec![]));

    let requests = source.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, ResearchMode::Ideas);
}

#[test]
fn test_research_default_overview() {
    let source = Arc::new(CannedSource::default());
    let researcher = Researcher::new(source.clone());

    let outcome =
        researcher.research_default("United States", "English", Threshold::default(), SortBy::Volume);

    let requests = source.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, ResearchMode::Overview);
    assert_eq!(requests[0].1.keywords, DEFAULT_KEYWORDS.to_vec());

    assert_eq!(outcome.keywords.len(), 2);
    assert_eq!(outcome.keywords[0].keyword, "keyword research");
}
