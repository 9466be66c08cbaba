//! Engagement scoring, the minimum-engagement gate and the composite rank.

use crate::types::CandidateItem;

/// Recent threads need at least this much engagement to be kept.
pub const RECENT_MIN_ENGAGEMENT: i64 = 10;
/// Older threads need at least this much engagement to be kept.
pub const OLDER_MIN_ENGAGEMENT: i64 = 5;
/// Weight applied to the search-traffic estimate in [`rank_score`].
pub const TRAFFIC_WEIGHT: f64 = 3.0;
/// Multiplier applied to engagement for recent threads.
pub const RECENCY_BONUS: f64 = 1.2;

/// `popularity + 2 * discussion`.
#[must_use]
pub fn engagement_score(popularity: i64, discussion: i64) -> i64 {
    popularity.saturating_add(discussion.saturating_mul(2))
}

/// Returns `true` if a thread has enough engagement for its age bracket.
#[must_use]
pub fn passes_engagement_gate(is_recent: bool, engagement: i64) -> bool {
    let min = if is_recent {
        RECENT_MIN_ENGAGEMENT
    } else {
        OLDER_MIN_ENGAGEMENT
    };
    engagement >= min
}

/// `traffic * 3.0 + engagement * recency_bonus`.
#[must_use]
pub fn rank_score(item: &CandidateItem) -> f64 {
    let bonus = if item.is_recent { RECENCY_BONUS } else { 1.0 };
    #[allow(clippy::cast_precision_loss)]
    let (traffic, engagement) = (item.search_traffic as f64, item.engagement as f64);
    traffic * TRAFFIC_WEIGHT + engagement * bonus
}

/// Sort by [`rank_score`] descending and keep the first `top_n`.
///
/// The sort is stable: equal scores keep their fetch order.
#[must_use]
pub fn rank_candidates(items: Vec<CandidateItem>, top_n: usize) -> Vec<CandidateItem> {
    let mut scored: Vec<(f64, CandidateItem)> = items
        .into_iter()
        .map(|item| (rank_score(&item), item))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(top_n);
    scored.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn item(url: &str, engagement: i64, is_recent: bool, traffic: u64) -> CandidateItem {
        CandidateItem {
            url: url.to_string(),
            title: String::new(),
            body: String::new(),
            group: "test".to_string(),
            author: "tester".to_string(),
            popularity: engagement,
            discussion: 0,
            created_at: Utc::now(),
            age_days: if is_recent { 1 } else { 30 },
            is_recent,
            engagement,
            search_traffic: traffic,
            search_volume: None,
            difficulty: None,
        }
    }

    fn urls(items: &[CandidateItem]) -> Vec<&str> {
        items.iter().map(|i| i.url.as_str()).collect()
    }

    #[test]
    fn engagement_counts_discussion_twice() {
        assert_eq!(engagement_score(100, 10), 120);
        assert_eq!(engagement_score(0, 0), 0);
    }

    #[test]
    fn engagement_is_strictly_increasing_in_popularity() {
        for popularity in 0..50 {
            assert!(engagement_score(popularity + 1, 7) > engagement_score(popularity, 7));
        }
    }

    #[test]
    fn recent_gate_boundary() {
        assert!(passes_engagement_gate(true, 10));
        assert!(!passes_engagement_gate(true, 9));
    }

    #[test]
    fn older_gate_boundary() {
        assert!(passes_engagement_gate(false, 5));
        assert!(!passes_engagement_gate(false, 4));
    }

    #[test]
    fn rank_score_applies_recency_bonus() {
        let recent = item("a", 100, true, 0);
        let old = item("b", 100, false, 0);
        assert!((rank_score(&recent) - 120.0).abs() < 1e-9);
        assert!((rank_score(&old) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn traffic_dominates_engagement() {
        let with_traffic = item("traffic", 10, false, 50);
        let popular = item("popular", 140, false, 0);
        assert!((rank_score(&with_traffic) - 160.0).abs() < 1e-9);
        let ranked = rank_candidates(vec![popular, with_traffic], 10);
        assert_eq!(urls(&ranked), vec!["traffic", "popular"]);
    }

    #[test]
    fn ties_preserve_input_order() {
        let items = vec![
            item("first", 50, false, 0),
            item("second", 50, false, 0),
            item("third", 50, false, 0),
        ];
        let ranked = rank_candidates(items, 10);
        assert_eq!(urls(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn ranking_is_deterministic() {
        let items = vec![
            item("a", 12, true, 0),
            item("b", 30, false, 2),
            item("c", 12, true, 0),
            item("d", 90, false, 0),
        ];
        let first = rank_candidates(items.clone(), 4);
        let second = rank_candidates(items, 4);
        assert_eq!(urls(&first), urls(&second));
        assert_eq!(urls(&first), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn truncates_to_top_n() {
        let items = (0..5).map(|i| item(&i.to_string(), i, false, 0)).collect();
        let ranked = rank_candidates(items, 2);
        assert_eq!(urls(&ranked), vec!["4", "3"]);
    }

    #[test]
    fn top_n_larger_than_pool_returns_everything() {
        let ranked = rank_candidates(vec![item("only", 20, false, 0)], 10);
        assert_eq!(ranked.len(), 1);
    }
}
