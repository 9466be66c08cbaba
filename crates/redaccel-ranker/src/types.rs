use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::scorer::engagement_score;

/// Threads at most this many days old count as recent.
pub const RECENT_WINDOW_DAYS: i64 = 14;

/// Bodies are truncated to this many characters on ingest and before
/// relevance checks.
pub const BODY_SNIPPET_CHARS: usize = 500;

/// A thread as returned by a source, before any derived fields are computed.
#[derive(Debug, Clone)]
pub struct RawCandidate {
    /// Canonical thread URL. Unique key within one ranking request.
    pub url: String,
    pub title: String,
    pub body: String,
    /// Source group label (subreddit name).
    pub group: String,
    pub author: String,
    /// Raw popularity counter (upvote score).
    pub popularity: i64,
    /// Raw discussion counter (comment count).
    pub discussion: i64,
    pub created_at: DateTime<Utc>,
}

/// Keyword-level search metrics from the traffic collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TrafficEstimate {
    pub estimated_traffic: u64,
    pub search_volume: u64,
    pub difficulty: f64,
}

/// A scored thread. Built once per fetch and not mutated after ranking.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateItem {
    pub url: String,
    pub title: String,
    pub body: String,
    pub group: String,
    pub author: String,
    pub popularity: i64,
    pub discussion: i64,
    pub created_at: DateTime<Utc>,
    pub age_days: i64,
    pub is_recent: bool,
    pub engagement: i64,
    /// Estimated monthly search visits. `0` when enrichment is off or failed.
    pub search_traffic: u64,
    pub search_volume: Option<u64>,
    pub difficulty: Option<f64>,
}

impl CandidateItem {
    /// Derive age, recency and engagement from a raw source record.
    #[must_use]
    pub fn from_raw(raw: RawCandidate, now: DateTime<Utc>) -> Self {
        let age_days = (now - raw.created_at).num_days();
        let engagement = engagement_score(raw.popularity, raw.discussion);
        let body = if raw.body.chars().count() > BODY_SNIPPET_CHARS {
            raw.body.chars().take(BODY_SNIPPET_CHARS).collect()
        } else {
            raw.body
        };

        Self {
            url: raw.url,
            title: raw.title,
            body,
            group: raw.group,
            author: raw.author,
            popularity: raw.popularity,
            discussion: raw.discussion,
            created_at: raw.created_at,
            age_days,
            is_recent: age_days <= RECENT_WINDOW_DAYS,
            engagement,
            search_traffic: 0,
            search_volume: None,
            difficulty: None,
        }
    }

    pub(crate) fn apply_traffic(&mut self, estimate: &TrafficEstimate) {
        self.search_traffic = estimate.estimated_traffic;
        self.search_volume = Some(estimate.search_volume);
        self.difficulty = Some(estimate.difficulty);
    }
}

/// Top-N threads for one keyword, best first.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    pub keyword: String,
    /// Name of the source that produced the candidates; `None` when every
    /// source came back empty.
    pub source: Option<String>,
    pub items: Vec<CandidateItem>,
}

impl RankedResult {
    #[must_use]
    pub fn empty(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            source: None,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
