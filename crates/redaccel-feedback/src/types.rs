use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;
use crate::persona::Persona;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Case-insensitive parse. Anything unrecognized counts as neutral.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

/// One simulated feedback unit.
#[derive(Debug, Clone, Serialize)]
pub struct ObservationRecord {
    pub persona: Persona,
    pub sentiment: Sentiment,
    /// Purchase intent in `[0, 100]`.
    pub purchase_intent: f64,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub likes: Vec<String>,
    pub concerns: Vec<String>,
    /// `true` for jittered copies produced by scaling.
    pub is_variation: bool,
}

impl ObservationRecord {
    #[must_use]
    pub fn new(persona: Persona, sentiment: Sentiment, purchase_intent: f64) -> Self {
        Self {
            persona,
            sentiment,
            purchase_intent: purchase_intent.clamp(0.0, 100.0),
            insights: Vec::new(),
            recommendations: Vec::new(),
            likes: Vec::new(),
            concerns: Vec::new(),
            is_variation: false,
        }
    }
}

/// The product being evaluated.
#[derive(Debug, Clone, Default)]
pub struct ProductContext {
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    pub pricing: Option<String>,
    pub target_audience: Option<String>,
}

impl ProductContext {
    /// # Errors
    ///
    /// Returns [`FeedbackError::InvalidProduct`] if the name or description is
    /// blank or no feature is listed.
    pub fn validate(&self) -> Result<(), FeedbackError> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err(FeedbackError::InvalidProduct(
                "product name and description are required".to_string(),
            ));
        }
        if self.features.iter().all(|f| f.trim().is_empty()) {
            return Err(FeedbackError::InvalidProduct(
                "at least one product feature is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative
    }

    /// Each count multiplied by `numerator / denominator`, truncated.
    ///
    /// Integer arithmetic keeps the truncation exact. `denominator` must be
    /// non-zero.
    #[must_use]
    pub fn scaled(&self, numerator: u64, denominator: u64) -> Self {
        Self {
            positive: scale_count(self.positive, numerator, denominator),
            neutral: scale_count(self.neutral, numerator, denominator),
            negative: scale_count(self.negative, numerator, denominator),
        }
    }

    /// Percent of total per category, rounded to one decimal. All zero when
    /// there are no counts.
    #[must_use]
    pub fn percentages(&self) -> SentimentPercentages {
        let total = self.total();
        if total == 0 {
            return SentimentPercentages::default();
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = |n: u64| round_to(n as f64 / total as f64 * 100.0, 1);
        SentimentPercentages {
            positive: pct(self.positive),
            neutral: pct(self.neutral),
            negative: pct(self.negative),
        }
    }
}

pub(crate) fn scale_count(count: u64, numerator: u64, denominator: u64) -> u64 {
    let scaled = u128::from(count) * u128::from(numerator) / u128::from(denominator);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentPercentages {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentPercentages {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }
}

/// Per-persona summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortStats {
    pub count: u64,
    pub mean_purchase_intent: f64,
    pub sentiment: SentimentCounts,
}

/// Summary over a set of observations.
///
/// `total_observations == 0` marks the "no feedback" result: cohorts are
/// empty and every percentage is zero.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedFeedback {
    pub total_observations: u64,
    pub cohorts: BTreeMap<Persona, CohortStats>,
    pub mean_purchase_intent: f64,
    pub sentiment_counts: SentimentCounts,
    pub sentiment_percentages: SentimentPercentages,
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub observations: Vec<ObservationRecord>,
}

impl AggregatedFeedback {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_observations: 0,
            cohorts: BTreeMap::new(),
            mean_purchase_intent: 0.0,
            sentiment_counts: SentimentCounts::default(),
            sentiment_percentages: SentimentPercentages::default(),
            key_insights: Vec::new(),
            recommendations: Vec::new(),
            observations: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_observations == 0
    }

    /// Share of positive sentiment in `[0, 1]`.
    #[must_use]
    pub fn positive_fraction(&self) -> f64 {
        self.sentiment_percentages.positive / 100.0
    }
}

/// An [`AggregatedFeedback`] extrapolated to a target population.
///
/// `original_sample_size` is the number of real observations behind the
/// projection; `scale_factor` is `target / original_sample_size`, or `1.0`
/// when scaling was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct ScaledFeedback {
    pub original_sample_size: u64,
    pub scale_factor: f64,
    #[serde(flatten)]
    pub feedback: AggregatedFeedback,
}

impl ScaledFeedback {
    /// Wrap unscaled feedback, e.g. when there is nothing to scale.
    #[must_use]
    pub fn unscaled(feedback: AggregatedFeedback) -> Self {
        Self {
            original_sample_size: feedback.total_observations,
            scale_factor: 1.0,
            feedback,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.original_sample_size == 0
    }
}
