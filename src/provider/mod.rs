pub mod client;
pub mod types;

pub use client::{Credentials, DataForSeoClient, DEFAULT_BASE_URL};
pub use types::{parse_records, ProviderResponse, RecordsInput};

use serde::{Deserialize, Serialize};
use std::{fmt::Display, thread};

use crate::{errors::AppResult, keywords::RawRecord};

/// Which provider endpoint produces the candidate keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResearchMode {
    /// Keyword ideas for the seed
    Ideas,
    /// Keywords related to the seed
    Related,
    /// Question-style keywords (what, how, why...)
    Questions,
    /// Keywords of three words or more
    LongTail,
    /// Metrics for the given keywords themselves
    Overview,
}

impl Display for ResearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResearchMode::Ideas => "ideas",
            ResearchMode::Related => "related",
            ResearchMode::Questions => "questions",
            ResearchMode::LongTail => "long-tail",
            ResearchMode::Overview => "overview",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordRequest {
    pub keywords: Vec<String>,
    pub location: String,
    pub language: String,
    pub limit: u32,
}

impl KeywordRequest {
    /// All keywords joined by a space, used as the relevance seed.
    pub fn seed(&self) -> String {
        self.keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Anything able to return raw keyword rows for a research mode.
pub trait KeywordSource: Send + Sync {
    fn fetch(&self, mode: ResearchMode, request: &KeywordRequest) -> AppResult<Vec<RawRecord>>;

    /// Name of this source for logging.
    fn name(&self) -> &'static str;
}

/// Runs one request per mode in parallel and hands each response to
/// `process` on the thread that fetched it, as soon as it arrives.
///
/// A failed request, or a worker that panicked, is logged and processed
/// as an empty list. There are no retries and nothing is cancelled.
pub fn fan_out<S, T, F>(
    source: &S,
    modes: &[ResearchMode],
    request: &KeywordRequest,
    process: F,
) -> Vec<(ResearchMode, T)>
where
    S: KeywordSource + ?Sized,
    T: Send,
    F: Fn(ResearchMode, Vec<RawRecord>) -> T + Sync,
{
    let process = &process;

    thread::scope(|s| {
        let handles: Vec<_> = modes
            .iter()
            .map(|&mode| {
                s.spawn(move || {
                    let name = source.name();
                    let records = match source.fetch(mode, request) {
                        Ok(records) => {
                            log::info!("source={name} mode={mode} outcome=success items={}", records.len());
                            records
                        }
                        Err(e) => {
                            log::warn!("source={name} mode={mode} outcome=error err={e}");
                            vec![]
                        }
                    };
                    (mode, process(mode, records))
                })
            })
            .collect();

        handles
            .into_iter()
            .zip(modes)
            .map(|(handle, &mode)| match handle.join() {
                Ok(result) => result,
                Err(_) => {
                    log::warn!("source={} mode={mode} outcome=panic", source.name());
                    (mode, process(mode, vec![]))
                }
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Stub {
        calls: AtomicUsize,
    }

    impl KeywordSource for Stub {
        fn fetch(&self, mode: ResearchMode, _: &KeywordRequest) -> AppResult<Vec<RawRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match mode {
                ResearchMode::Related => Err(AppError::invalid_input("boom")),
                ResearchMode::LongTail => panic!("worker died"),
                _ => Ok(vec![RawRecord {
                    keyword: Some(mode.to_string()),
                    ..Default::default()
                }]),
            }
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn request() -> KeywordRequest {
        KeywordRequest {
            keywords: vec!["seo".into(), " tools ".into(), "".into()],
            location: "United States".into(),
            language: "English".into(),
            limit: 10,
        }
    }

    #[test]
    fn test_seed_joins_keywords() {
        assert_eq!(request().seed(), "seo tools");
    }

    #[test]
    fn test_fan_out_runs_every_mode() {
        let stub = Stub {
            calls: AtomicUsize::new(0),
        };
        let modes = [ResearchMode::Ideas, ResearchMode::Related, ResearchMode::Questions];

        let results = fan_out(&stub, &modes, &request(), |_, records| records.len());

        assert_eq!(stub.calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            results,
            vec![
                (ResearchMode::Ideas, 1),
                (ResearchMode::Related, 0),
                (ResearchMode::Questions, 1),
            ]
        );
    }

    #[test]
    fn test_fan_out_keeps_panicked_mode() {
        let stub = Stub {
            calls: AtomicUsize::new(0),
        };
        let modes = [ResearchMode::LongTail, ResearchMode::Ideas];

        let results = fan_out(&stub, &modes, &request(), |_, records| records.len());

        assert_eq!(results, vec![(ResearchMode::LongTail, 0), (ResearchMode::Ideas, 1)]);
    }
}
