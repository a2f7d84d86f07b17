use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display, str::FromStr};

use crate::{errors::AppError, relevance};

/// One keyword row as returned by the data provider.
///
/// Every field is optional. The related-keywords endpoint nests the same
/// fields one level deeper under `keyword_data`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_info: Option<KeywordInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_properties: Option<KeywordProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_data: Option<Box<RawRecord>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordInfo {
    #[serde(default)]
    pub search_volume: Option<f64>,
    #[serde(default)]
    pub cpc: Option<f64>,
    #[serde(default)]
    pub competition: Option<f64>,
    #[serde(default)]
    pub search_volume_trend: Option<VolumeTrend>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeTrend {
    #[serde(default)]
    pub monthly: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordProperties {
    #[serde(default)]
    pub keyword_difficulty: Option<f64>,
}

impl RawRecord {
    /// The record holding the actual keyword fields.
    fn source(&self) -> &RawRecord {
        match (&self.keyword, &self.keyword_data) {
            (None, Some(inner)) => inner.source(),
            _ => self,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    fn from_monthly(monthly: f64) -> Self {
        if monthly > 0.0 {
            Trend::Up
        } else if monthly < 0.0 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

/// A keyword with its metrics, ready for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub keyword: String,
    pub search_volume: u64,
    pub cpc: f64,
    pub competition: f64,
    pub difficulty: f64,
    pub trend: Trend,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

impl Candidate {
    /// Missing or non-finite metrics become zero.
    pub fn from_raw(record: &RawRecord) -> Self {
        let record = record.source();
        let info = record.keyword_info.clone().unwrap_or_default();
        let metric = |value: Option<f64>| value.filter(|v| v.is_finite()).unwrap_or(0.0);

        Candidate {
            keyword: record.keyword.clone().unwrap_or_default(),
            search_volume: metric(info.search_volume).max(0.0) as u64,
            cpc: metric(info.cpc),
            competition: metric(info.competition),
            difficulty: metric(
                record
                    .keyword_properties
                    .as_ref()
                    .and_then(|p| p.keyword_difficulty),
            ),
            trend: Trend::from_monthly(metric(
                info.search_volume_trend.and_then(|t| t.monthly),
            )),
            relevance_score: None,
        }
    }
}

/// Minimum relevance score a candidate needs to skip the heuristic filters.
///
/// Only the values offered by the dashboard are accepted. Zero disables
/// score enforcement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Threshold(u8);

impl Threshold {
    pub const ALLOWED: [u8; 5] = [0, 40, 60, 75, 90];

    pub fn value(&self) -> f64 {
        self.0 as f64
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold(60)
    }
}

impl TryFrom<u8> for Threshold {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&value) {
            Ok(Threshold(value))
        } else {
            Err(AppError::InvalidThreshold(value))
        }
    }
}

impl From<Threshold> for u8 {
    fn from(value: Threshold) -> Self {
        value.0
    }
}

impl FromStr for Threshold {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| AppError::invalid_input(format!("threshold must be a number, got {s:?}")))?;
        Threshold::try_from(value)
    }
}

impl Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Highest relevance first
    #[default]
    Relevance,
    /// Highest search volume first
    Volume,
    /// Easiest first
    Difficulty,
    /// Highest cost-per-click first
    Cpc,
}

pub fn sort_candidates(candidates: &mut [Candidate], sort_by: SortBy) {
    use std::cmp::Ordering;

    let desc = |a: f64, b: f64| b.partial_cmp(&a).unwrap_or(Ordering::Equal);

    match sort_by {
        SortBy::Relevance => candidates.sort_by(|a, b| {
            desc(
                a.relevance_score.unwrap_or_default(),
                b.relevance_score.unwrap_or_default(),
            )
        }),
        SortBy::Volume => candidates.sort_by(|a, b| b.search_volume.cmp(&a.search_volume)),
        SortBy::Difficulty => candidates.sort_by(|a, b| {
            a.difficulty
                .partial_cmp(&b.difficulty)
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::Cpc => candidates.sort_by(|a, b| desc(a.cpc, b.cpc)),
    }
}

/// Scores every record against `seed` and keeps the ones passing the
/// relevance gate, best first.
///
/// Records whose keyword is blank after trimming are dropped before
/// scoring.
pub fn filter_and_score(records: &[RawRecord], seed: &str, threshold: Threshold) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = records
        .iter()
        .map(Candidate::from_raw)
        .filter_map(|mut candidate| {
            let text = candidate.keyword.trim();
            if text.is_empty() {
                return None;
            }

            let verdict = relevance::evaluate(text, seed, threshold.value());
            if let Some(reason) = verdict.reason() {
                log::debug!("rejected keyword={text:?} seed={seed:?} reason={reason:?}");
                return None;
            }

            candidate.relevance_score = Some(verdict.score());
            Some(candidate)
        })
        .collect();

    log::debug!(
        "seed={seed:?} threshold={threshold} kept {}/{} records",
        candidates.len(),
        records.len()
    );

    sort_candidates(&mut candidates, SortBy::Relevance);
    candidates
}

/// Merges several accepted lists, keeping the best-scored copy of each
/// keyword (case-insensitive).
pub fn merge_candidates(lists: Vec<Vec<Candidate>>) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for candidate in lists.into_iter().flatten() {
        let key = candidate.keyword.trim().to_lowercase();
        match index.get(&key) {
            Some(&at) => {
                let existing = &mut merged[at];
                if candidate.relevance_score.unwrap_or_default()
                    > existing.relevance_score.unwrap_or_default()
                {
                    *existing = candidate;
                }
            }
            None => {
                index.insert(key, merged.len());
                merged.push(candidate);
            }
        }
    }

    sort_candidates(&mut merged, SortBy::Relevance);
    merged
}

/// Volume above which a keyword counts as high volume.
const HIGH_VOLUME: u64 = 1000;
/// Competition below which a keyword counts as low competition.
const LOW_COMPETITION: f64 = 0.3;
const EASY_DIFFICULTY: f64 = 30.0;
const HARD_DIFFICULTY: f64 = 70.0;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendCounts {
    pub up: usize,
    pub down: usize,
    pub stable: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyDistribution {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

/// Aggregate metrics over a result list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSummary {
    pub total_keywords: usize,
    pub total_volume: u64,
    pub avg_cpc: f64,
    pub avg_difficulty: f64,
    pub avg_competition: f64,
    pub trend_counts: TrendCounts,
    pub difficulty_distribution: DifficultyDistribution,
    pub high_volume_keywords: usize,
    pub low_competition_keywords: usize,
}

impl KeywordSummary {
    /// `None` for an empty list.
    pub fn from_candidates(candidates: &[Candidate]) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }

        let count = candidates.len() as f64;
        let mut trend_counts = TrendCounts::default();
        let mut difficulty_distribution = DifficultyDistribution::default();

        for candidate in candidates {
            match candidate.trend {
                Trend::Up => trend_counts.up += 1,
                Trend::Down => trend_counts.down += 1,
                Trend::Stable => trend_counts.stable += 1,
            }

            if candidate.difficulty <= EASY_DIFFICULTY {
                difficulty_distribution.easy += 1;
            } else if candidate.difficulty <= HARD_DIFFICULTY {
                difficulty_distribution.medium += 1;
            } else {
                difficulty_distribution.hard += 1;
            }
        }

        Some(KeywordSummary {
            total_keywords: candidates.len(),
            total_volume: candidates.iter().map(|c| c.search_volume).sum(),
            avg_cpc: candidates.iter().map(|c| c.cpc).sum::<f64>() / count,
            avg_difficulty: candidates.iter().map(|c| c.difficulty).sum::<f64>() / count,
            avg_competition: candidates.iter().map(|c| c.competition).sum::<f64>() / count,
            trend_counts,
            difficulty_distribution,
            high_volume_keywords: candidates
                .iter()
                .filter(|c| c.search_volume > HIGH_VOLUME)
                .count(),
            low_competition_keywords: candidates
                .iter()
                .filter(|c| c.competition < LOW_COMPETITION)
                .count(),
        })
    }
}
