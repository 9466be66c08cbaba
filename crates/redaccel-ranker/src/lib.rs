//! Thread ranking for redaccel.
//!
//! Collects candidate discussion threads from Reddit (public search first,
//! OAuth search as fallback), keeps the ones that are on-topic and have enough
//! engagement, optionally enriches them with a keyword-level search-traffic
//! estimate, and returns the top N by a composite score.

pub mod error;
pub mod pipeline;
pub mod relevance;
pub mod scorer;
pub mod sources;
pub mod traffic;
pub mod types;

pub use error::RankerError;
pub use pipeline::Ranker;
pub use relevance::{candidate_is_relevant, is_relevant};
pub use scorer::{engagement_score, passes_engagement_gate, rank_candidates, rank_score};
pub use sources::{CandidateSource, RedditOAuthSource, RedditPublicSource};
pub use traffic::{KeywordTrafficClient, TrafficEstimator};
pub use types::{CandidateItem, RankedResult, RawCandidate, TrafficEstimate};
