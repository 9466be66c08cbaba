//! Ranking pipeline orchestration.

use std::time::Duration;

use chrono::{DateTime, Utc};

use redaccel_core::AppConfig;

use crate::error::RankerError;
use crate::scorer::rank_candidates;
use crate::sources::{collect_candidates, CandidateSource, RedditOAuthSource, RedditPublicSource};
use crate::traffic::{KeywordTrafficClient, TrafficEstimator};
use crate::types::{CandidateItem, RankedResult};

/// Minimum pool size requested from a source regardless of `top_n`.
const MIN_FETCH_LIMIT: usize = 400;

/// Ranks discussion threads for a keyword.
///
/// Sources are tried in the order given; the first to yield a surviving
/// candidate is used. Traffic enrichment is optional and bounded by its own
/// timeout.
pub struct Ranker {
    sources: Vec<Box<dyn CandidateSource>>,
    traffic: Option<Box<dyn TrafficEstimator>>,
    traffic_timeout: Duration,
}

impl Ranker {
    #[must_use]
    pub fn new(
        sources: Vec<Box<dyn CandidateSource>>,
        traffic: Option<Box<dyn TrafficEstimator>>,
        traffic_timeout: Duration,
    ) -> Self {
        Self {
            sources,
            traffic,
            traffic_timeout,
        }
    }

    /// Public Reddit search first, OAuth search second (when credentials are
    /// configured), keyword traffic enrichment when a token is configured.
    ///
    /// # Errors
    ///
    /// Returns [`RankerError::Http`] if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, RankerError> {
        let mut sources: Vec<Box<dyn CandidateSource>> =
            vec![Box::new(RedditPublicSource::new(config)?)];
        if let Some(oauth) = RedditOAuthSource::from_config(config)? {
            sources.push(Box::new(oauth));
        }

        let traffic = KeywordTrafficClient::from_config(config)?
            .map(|client| Box::new(client) as Box<dyn TrafficEstimator>);
        if traffic.is_none() {
            tracing::info!("no traffic API token configured; ranking by engagement only");
        }

        Ok(Self::new(
            sources,
            traffic,
            Duration::from_secs(config.traffic_timeout_secs),
        ))
    }

    /// Top `top_n` threads for `keyword`, best first.
    ///
    /// Never fails: source errors fall through to the next source and an
    /// empty result is returned when all of them come back empty.
    pub async fn rank(
        &self,
        keyword: &str,
        top_n: usize,
        prioritize_traffic: bool,
    ) -> RankedResult {
        self.rank_at(keyword, top_n, prioritize_traffic, Utc::now()).await
    }

    /// [`Ranker::rank`] with an explicit clock for age calculations.
    pub async fn rank_at(
        &self,
        keyword: &str,
        top_n: usize,
        prioritize_traffic: bool,
        now: DateTime<Utc>,
    ) -> RankedResult {
        let fetch_limit = top_n.saturating_mul(10).max(MIN_FETCH_LIMIT);

        let Some((source, mut candidates)) =
            collect_candidates(&self.sources, keyword, fetch_limit, now).await
        else {
            tracing::warn!(keyword, "all candidate sources came back empty");
            return RankedResult::empty(keyword);
        };

        if prioritize_traffic {
            self.enrich(keyword, &mut candidates).await;
        }

        let pool = candidates.len();
        let items = rank_candidates(candidates, top_n);

        tracing::info!(
            keyword,
            source,
            pool,
            returned = items.len(),
            "ranked candidates"
        );

        RankedResult {
            keyword: keyword.to_string(),
            source: Some(source.to_string()),
            items,
        }
    }

    /// Apply the keyword traffic estimate to every candidate. Any failure,
    /// including a timeout, leaves the traffic term at zero.
    async fn enrich(&self, keyword: &str, candidates: &mut [CandidateItem]) {
        let Some(estimator) = &self.traffic else {
            return;
        };

        match tokio::time::timeout(self.traffic_timeout, estimator.get_traffic_estimate(keyword))
            .await
        {
            Ok(Ok(Some(estimate))) => {
                tracing::debug!(
                    keyword,
                    estimated_traffic = estimate.estimated_traffic,
                    search_volume = estimate.search_volume,
                    "applying traffic estimate"
                );
                for candidate in candidates.iter_mut() {
                    candidate.apply_traffic(&estimate);
                }
            }
            Ok(Ok(None)) => {
                tracing::debug!(keyword, "no traffic data for keyword");
            }
            Ok(Err(e)) => {
                tracing::warn!(keyword, error = %e, "traffic enrichment failed");
            }
            Err(_) => {
                tracing::warn!(
                    keyword,
                    timeout_secs = self.traffic_timeout.as_secs(),
                    "traffic enrichment timed out"
                );
            }
        }
    }
}
