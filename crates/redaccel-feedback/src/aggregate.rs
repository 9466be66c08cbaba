//! Per-persona and overall reduction over simulated observations.

use std::collections::{BTreeMap, HashSet};

use crate::types::{
    round_to, AggregatedFeedback, CohortStats, ObservationRecord, SentimentCounts,
};

/// Insights and recommendations kept after de-duplication.
pub const TOP_K_STRINGS: usize = 10;

/// Reduce `observations` into cohort and overall statistics.
///
/// An empty input yields [`AggregatedFeedback::empty`].
#[must_use]
pub fn aggregate(observations: Vec<ObservationRecord>) -> AggregatedFeedback {
    if observations.is_empty() {
        tracing::warn!("no observations to aggregate");
        return AggregatedFeedback::empty();
    }

    let mut sentiment_counts = SentimentCounts::default();
    let mut intent_sum = 0.0;
    let mut by_persona: BTreeMap<_, (SentimentCounts, f64)> = BTreeMap::new();

    for obs in &observations {
        sentiment_counts.record(obs.sentiment);
        intent_sum += obs.purchase_intent;
        let (counts, sum) = by_persona.entry(obs.persona).or_default();
        counts.record(obs.sentiment);
        *sum += obs.purchase_intent;
    }

    let cohorts = by_persona
        .into_iter()
        .map(|(persona, (sentiment, sum))| {
            let count = sentiment.total();
            #[allow(clippy::cast_precision_loss)]
            let mean_purchase_intent = sum / count as f64;
            (
                persona,
                CohortStats {
                    count,
                    mean_purchase_intent,
                    sentiment,
                },
            )
        })
        .collect();

    let total = observations.len() as u64;
    #[allow(clippy::cast_precision_loss)]
    let mean_purchase_intent = round_to(intent_sum / total as f64, 2);

    let key_insights = top_unique(observations.iter().flat_map(|o| o.insights.iter()));
    let recommendations =
        top_unique(observations.iter().flat_map(|o| o.recommendations.iter()));

    AggregatedFeedback {
        total_observations: total,
        cohorts,
        mean_purchase_intent,
        sentiment_counts,
        sentiment_percentages: sentiment_counts.percentages(),
        key_insights,
        recommendations,
        observations,
    }
}

fn top_unique<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|s| !s.trim().is_empty())
        .filter(|s| seen.insert(s.as_str()))
        .take(TOP_K_STRINGS)
        .cloned()
        .collect()
}
