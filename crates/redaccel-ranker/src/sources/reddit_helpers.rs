//! Reddit listing decoding and post-to-candidate conversion.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{RawCandidate, BODY_SNIPPET_CHARS};

/// Reddit search listing wrapper.
#[derive(Debug, Deserialize)]
pub(super) struct Listing {
    pub(super) data: ListingData,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListingData {
    #[serde(default)]
    pub(super) children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Post {
    pub(super) data: PostData,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PostData {
    pub(super) title: Option<String>,
    pub(super) selftext: Option<String>,
    pub(super) permalink: Option<String>,
    pub(super) subreddit: Option<String>,
    pub(super) author: Option<String>,
    pub(super) score: Option<i64>,
    pub(super) num_comments: Option<i64>,
    pub(super) created_utc: Option<f64>,
}

/// Convert every usable post in a listing, keeping listing order and stopping
/// at `limit`.
pub(super) fn listing_to_candidates(
    listing: Listing,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<RawCandidate> {
    listing
        .data
        .children
        .into_iter()
        .filter_map(|post| to_raw_candidate(post.data, now))
        .take(limit)
        .collect()
}

/// Posts without a permalink or title are skipped. A missing timestamp is
/// treated as `now`.
pub(super) fn to_raw_candidate(post: PostData, now: DateTime<Utc>) -> Option<RawCandidate> {
    let permalink = post.permalink.filter(|p| !p.trim().is_empty())?;
    let title = post
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())?;

    let body = match post.selftext.as_deref() {
        Some(text) if text != "[deleted]" && text != "[removed]" => {
            text.chars().take(BODY_SNIPPET_CHARS).collect()
        }
        _ => String::new(),
    };

    let created_at = post
        .created_utc
        .and_then(timestamp_to_datetime)
        .unwrap_or(now);

    Some(RawCandidate {
        url: format!("https://reddit.com{permalink}"),
        title,
        body,
        group: post.subreddit.unwrap_or_else(|| "unknown".to_string()),
        author: post.author.unwrap_or_else(|| "[unknown]".to_string()),
        popularity: post.score.unwrap_or(0),
        discussion: post.num_comments.unwrap_or(0),
        created_at,
    })
}

fn timestamp_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = secs.trunc() as i64;
    DateTime::from_timestamp(whole, 0)
}
