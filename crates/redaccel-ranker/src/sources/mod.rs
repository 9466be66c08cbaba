//! Candidate source abstractions and priority-ordered fallback.

mod reddit;
mod reddit_helpers;

pub use reddit::{RedditOAuthSource, RedditPublicSource};

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::RankerError;
use crate::relevance::candidate_is_relevant;
use crate::scorer::passes_engagement_gate;
use crate::types::{CandidateItem, RawCandidate};

/// A place candidate threads can be fetched from.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Short stable name used in logs and in [`crate::RankedResult::source`].
    fn name(&self) -> &'static str;

    /// Fetch up to `limit` raw candidates for `keyword`.
    async fn fetch_candidates(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<RawCandidate>, RankerError>;
}

/// Try `sources` in order and return the first one that yields at least one
/// candidate surviving the relevance filter and engagement gate.
///
/// Source errors are logged and treated as an empty result. Returns `None`
/// if every source fails or comes back empty.
pub(crate) async fn collect_candidates(
    sources: &[Box<dyn CandidateSource>],
    keyword: &str,
    limit: usize,
    now: DateTime<Utc>,
) -> Option<(&'static str, Vec<CandidateItem>)> {
    for source in sources {
        let raw = match source.fetch_candidates(keyword, limit).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    keyword,
                    source = source.name(),
                    error = %e,
                    "candidate fetch failed"
                );
                continue;
            }
        };

        let fetched = raw.len();
        let candidates = filter_candidates(raw, keyword, now);

        tracing::debug!(
            keyword,
            source = source.name(),
            fetched,
            kept = candidates.len(),
            "filtered candidates"
        );

        if candidates.is_empty() {
            tracing::info!(
                keyword,
                source = source.name(),
                "source yielded no candidates; trying next source"
            );
            continue;
        }

        return Some((source.name(), candidates));
    }

    None
}

/// Drop off-topic and low-engagement threads and collapse duplicate URLs
/// (first occurrence wins). Fetch order is preserved.
pub(crate) fn filter_candidates(
    raw: Vec<RawCandidate>,
    keyword: &str,
    now: DateTime<Utc>,
) -> Vec<CandidateItem> {
    let mut seen_urls: HashSet<String> = HashSet::new();
    raw.into_iter()
        .filter(|r| candidate_is_relevant(&r.title, &r.body, keyword))
        .map(|r| CandidateItem::from_raw(r, now))
        .filter(|item| passes_engagement_gate(item.is_recent, item.engagement))
        .filter(|item| seen_urls.insert(item.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn raw(url: &str, title: &str, popularity: i64, age_days: i64) -> RawCandidate {
        RawCandidate {
            url: url.to_string(),
            title: title.to_string(),
            body: String::new(),
            group: "rust".to_string(),
            author: "ferris".to_string(),
            popularity,
            discussion: 0,
            created_at: Utc::now() - Duration::days(age_days),
        }
    }

    struct Fixed {
        name: &'static str,
        result: Result<Vec<RawCandidate>, String>,
    }

    #[async_trait]
    impl CandidateSource for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch_candidates(
            &self,
            _keyword: &str,
            _limit: usize,
        ) -> Result<Vec<RawCandidate>, RankerError> {
            self.result.clone().map_err(RankerError::Reddit)
        }
    }

    #[test]
    fn filter_drops_irrelevant_and_low_engagement() {
        let now = Utc::now();
        let kept = filter_candidates(
            vec![
                raw("a", "rust tool review", 10, 1),
                raw("b", "rust tool question", 9, 1),
                raw("c", "python notebook", 500, 1),
                raw("d", "old rust tool thread", 5, 40),
                raw("e", "old rust tool thread", 4, 40),
            ],
            "rust tool",
            now,
        );
        let urls: Vec<&str> = kept.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "d"]);
    }

    #[test]
    fn filter_collapses_duplicate_urls() {
        let kept = filter_candidates(
            vec![
                raw("dup", "rust tool one", 50, 1),
                raw("dup", "rust tool two", 80, 1),
            ],
            "rust tool",
            Utc::now(),
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "rust tool one");
    }

    #[tokio::test]
    async fn first_source_with_results_wins() {
        let sources: Vec<Box<dyn CandidateSource>> = vec![
            Box::new(Fixed {
                name: "primary",
                result: Ok(vec![raw("p", "rust tool", 20, 1)]),
            }),
            Box::new(Fixed {
                name: "secondary",
                result: Ok(vec![raw("s", "rust tool", 20, 1)]),
            }),
        ];
        let (name, items) = collect_candidates(&sources, "rust tool", 10, Utc::now())
            .await
            .unwrap();
        assert_eq!(name, "primary");
        assert_eq!(items[0].url, "p");
    }

    #[tokio::test]
    async fn falls_through_on_error_and_on_empty() {
        let sources: Vec<Box<dyn CandidateSource>> = vec![
            Box::new(Fixed {
                name: "broken",
                result: Err("boom".to_string()),
            }),
            Box::new(Fixed {
                name: "filtered_out",
                result: Ok(vec![raw("x", "unrelated", 1_000, 1)]),
            }),
            Box::new(Fixed {
                name: "last",
                result: Ok(vec![raw("l", "rust tool", 20, 1)]),
            }),
        ];
        let (name, items) = collect_candidates(&sources, "rust tool", 10, Utc::now())
            .await
            .unwrap();
        assert_eq!(name, "last");
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn all_sources_failing_yields_none() {
        let sources: Vec<Box<dyn CandidateSource>> = vec![Box::new(Fixed {
            name: "broken",
            result: Err("boom".to_string()),
        })];
        assert!(collect_candidates(&sources, "rust tool", 10, Utc::now())
            .await
            .is_none());
    }
}
