//! Extrapolation of a small observed sample to a target population.
//!
//! Counts are multiplied by `target / original` and truncated. Means are
//! scale-invariant and copied. Sentiment percentages are recomputed from the
//! scaled counts so they stay consistent with them. The observation list is
//! filled with jittered copies of the real observations for display.

use rand::Rng;

use crate::types::{
    AggregatedFeedback, CohortStats, ObservationRecord, ScaledFeedback, Sentiment,
};

/// Upper bound on synthetic copies produced from one real observation.
pub const MAX_VARIATIONS_PER_OBSERVATION: u64 = 200;
/// Relative purchase-intent jitter applied to each copy.
pub const INTENT_JITTER: f64 = 0.10;
/// Chance that a copy reports a different sentiment than its source.
pub const SENTIMENT_FLIP_PROBABILITY: f64 = 0.10;

/// Scale `feedback` to `target` observations.
///
/// When `feedback` is empty or `target` is zero nothing is scaled and the
/// input is returned with a scale factor of `1.0`.
pub fn scale_feedback<R: Rng + ?Sized>(
    feedback: AggregatedFeedback,
    target: u64,
    rng: &mut R,
) -> ScaledFeedback {
    let original = feedback.total_observations;
    if original == 0 || target == 0 {
        tracing::warn!(original, target, "skipping scaling");
        return ScaledFeedback::unscaled(feedback);
    }

    #[allow(clippy::cast_precision_loss)]
    let scale_factor = target as f64 / original as f64;

    let cohorts = feedback
        .cohorts
        .iter()
        .map(|(persona, stats)| {
            let scaled = CohortStats {
                count: crate::types::scale_count(stats.count, target, original),
                mean_purchase_intent: stats.mean_purchase_intent,
                sentiment: stats.sentiment.scaled(target, original),
            };
            (*persona, scaled)
        })
        .collect();

    let sentiment_counts = feedback.sentiment_counts.scaled(target, original);
    let sentiment_percentages = if sentiment_counts.total() > 0 {
        sentiment_counts.percentages()
    } else {
        // Shrinking below one per category truncates everything to zero.
        feedback.sentiment_percentages
    };

    let observations = synthetic_observations(&feedback.observations, target, rng);

    tracing::debug!(
        original,
        target,
        scale_factor,
        synthetic = observations.len(),
        "scaled feedback"
    );

    ScaledFeedback {
        original_sample_size: original,
        scale_factor,
        feedback: AggregatedFeedback {
            total_observations: target,
            cohorts,
            mean_purchase_intent: feedback.mean_purchase_intent,
            sentiment_counts,
            sentiment_percentages,
            key_insights: feedback.key_insights,
            recommendations: feedback.recommendations,
            observations,
        },
    }
}

fn synthetic_observations<R: Rng + ?Sized>(
    originals: &[ObservationRecord],
    target: u64,
    rng: &mut R,
) -> Vec<ObservationRecord> {
    if originals.is_empty() {
        return Vec::new();
    }
    let per_original = (target / originals.len() as u64).clamp(1, MAX_VARIATIONS_PER_OBSERVATION);
    let target = usize::try_from(target).unwrap_or(usize::MAX);

    let mut out = Vec::new();
    'outer: for original in originals {
        for _ in 0..per_original {
            if out.len() == target {
                break 'outer;
            }
            out.push(vary(original, rng));
        }
    }
    out
}

fn vary<R: Rng + ?Sized>(original: &ObservationRecord, rng: &mut R) -> ObservationRecord {
    let jitter = rng.random_range(-INTENT_JITTER..=INTENT_JITTER);
    let intent = (original.purchase_intent * (1.0 + jitter)).trunc().clamp(0.0, 100.0);

    let sentiment = if rng.random_bool(SENTIMENT_FLIP_PROBABILITY) {
        flip_sentiment(original.sentiment, rng)
    } else {
        original.sentiment
    };

    ObservationRecord {
        sentiment,
        purchase_intent: intent,
        is_variation: true,
        ..original.clone()
    }
}

/// One of the two other categories, chosen uniformly.
fn flip_sentiment<R: Rng + ?Sized>(from: Sentiment, rng: &mut R) -> Sentiment {
    let others: Vec<Sentiment> = Sentiment::ALL.into_iter().filter(|s| *s != from).collect();
    others[rng.random_range(0..others.len())]
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::aggregate::aggregate;
    use crate::persona::Persona;

    fn sample() -> AggregatedFeedback {
        aggregate(vec![
            ObservationRecord::new(Persona::EarlyAdopter, Sentiment::Positive, 80.0),
            ObservationRecord::new(Persona::EarlyAdopter, Sentiment::Positive, 70.0),
            ObservationRecord::new(Persona::Skeptic, Sentiment::Negative, 20.0),
        ])
    }

    #[test]
    fn empty_feedback_is_returned_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let scaled = scale_feedback(AggregatedFeedback::empty(), 1200, &mut rng);
        assert!(scaled.is_empty());
        assert!((scaled.scale_factor - 1.0).abs() < f64::EPSILON);
        assert_eq!(scaled.feedback.total_observations, 0);
    }

    #[test]
    fn counts_scale_with_truncation() {
        let mut rng = StdRng::seed_from_u64(7);
        let scaled = scale_feedback(sample(), 1000, &mut rng);

        assert_eq!(scaled.original_sample_size, 3);
        assert_eq!(scaled.feedback.total_observations, 1000);
        assert!((scaled.scale_factor - 1000.0 / 3.0).abs() < 1e-9);
        // 2 * 1000 / 3 = 666.67 -> 666, 1 * 1000 / 3 -> 333
        assert_eq!(scaled.feedback.cohorts[&Persona::EarlyAdopter].count, 666);
        assert_eq!(scaled.feedback.cohorts[&Persona::Skeptic].count, 333);
        assert_eq!(scaled.feedback.sentiment_counts.positive, 666);
        assert_eq!(scaled.feedback.sentiment_counts.negative, 333);
    }

    #[test]
    fn scaled_cohorts_never_exceed_target_and_percentages_sum_to_100() {
        let mut rng = StdRng::seed_from_u64(42);
        for target in [1_u64, 7, 10, 99, 1200, 5000] {
            let scaled = scale_feedback(sample(), target, &mut rng);
            let cohort_total: u64 = scaled.feedback.cohorts.values().map(|c| c.count).sum();
            assert!(cohort_total <= target, "target {target}");
            let sum = scaled.feedback.sentiment_percentages.sum();
            assert!((sum - 100.0).abs() <= 0.1 + 1e-9, "target {target}: {sum}");
        }
    }

    #[test]
    fn means_are_copied() {
        let agg = sample();
        let mean = agg.mean_purchase_intent;
        let mut rng = StdRng::seed_from_u64(3);
        let scaled = scale_feedback(agg, 600, &mut rng);
        assert!((scaled.feedback.mean_purchase_intent - mean).abs() < f64::EPSILON);
        assert!(
            (scaled.feedback.cohorts[&Persona::EarlyAdopter].mean_purchase_intent - 75.0).abs()
                < 1e-9
        );
    }

    #[test]
    fn synthetic_list_is_truncated_to_target() {
        let mut rng = StdRng::seed_from_u64(11);
        let scaled = scale_feedback(sample(), 300, &mut rng);
        assert_eq!(scaled.feedback.observations.len(), 300);
        assert!(scaled.feedback.observations.iter().all(|o| o.is_variation));
    }

    #[test]
    fn synthetic_copies_are_capped_per_observation() {
        let mut rng = StdRng::seed_from_u64(5);
        let scaled = scale_feedback(sample(), 1200, &mut rng);
        // 3 originals * 200 cap
        assert_eq!(scaled.feedback.observations.len(), 600);
    }

    #[test]
    fn jittered_intent_stays_within_ten_percent() {
        let mut rng = StdRng::seed_from_u64(9);
        let scaled = scale_feedback(sample(), 600, &mut rng);
        for obs in &scaled.feedback.observations {
            assert!((0.0..=100.0).contains(&obs.purchase_intent));
            if obs.persona == Persona::Skeptic {
                assert!((18.0..=22.0).contains(&obs.purchase_intent), "{}", obs.purchase_intent);
            }
        }
    }

    #[test]
    fn flipped_sentiment_is_always_a_different_category() {
        let mut rng = StdRng::seed_from_u64(17);
        for from in Sentiment::ALL {
            let mut seen = std::collections::HashSet::new();
            for _ in 0..200 {
                let to = flip_sentiment(from, &mut rng);
                assert_ne!(to, from);
                seen.insert(to);
            }
            assert_eq!(seen.len(), 2, "both other categories should appear for {from:?}");
        }
    }

    #[test]
    fn varied_copies_flip_about_ten_percent_of_the_time() {
        let original = ObservationRecord::new(Persona::PowerUser, Sentiment::Neutral, 50.0);
        let mut rng = StdRng::seed_from_u64(23);
        let mut flips = 0;
        for _ in 0..1_000 {
            let copy = vary(&original, &mut rng);
            assert!(copy.is_variation);
            assert_eq!(copy.persona, original.persona);
            if copy.sentiment != original.sentiment {
                flips += 1;
            }
        }
        // about 100 expected at a 10% flip chance
        assert!((50..=160).contains(&flips), "flips {flips}");
    }

    #[test]
    fn some_copies_flip_sentiment() {
        let mut rng = StdRng::seed_from_u64(21);
        let scaled = scale_feedback(sample(), 600, &mut rng);
        let skeptics: Vec<_> = scaled
            .feedback
            .observations
            .iter()
            .filter(|o| o.persona == Persona::Skeptic)
            .collect();
        let flipped = skeptics
            .iter()
            .filter(|o| o.sentiment != Sentiment::Negative)
            .count();
        // 200 copies at 10% flip chance
        assert!(flipped > 0 && flipped < 60, "flipped {flipped}");
    }
}
