//! MRR/ARR projection from scaled feedback and pricing tiers.

use serde::Serialize;

use redaccel_core::PricingTier;

use crate::error::FeedbackError;
use crate::types::ScaledFeedback;

/// Conversion rate at 100% mean purchase intent.
pub const MAX_BASE_CONVERSION_RATE: f64 = 0.10;
/// Sentiment multiplier at zero positive sentiment.
pub const SENTIMENT_MULTIPLIER_FLOOR: f64 = 0.7;
/// Added to the floor at 100% positive sentiment.
pub const SENTIMENT_MULTIPLIER_RANGE: f64 = 0.6;
/// Real observations needed for full confidence.
pub const FULL_CONFIDENCE_SAMPLE: u64 = 30;

pub const MONTH_3_GROWTH: f64 = 1.15;
pub const MONTH_6_GROWTH: f64 = 1.35;
pub const MONTH_12_GROWTH: f64 = 1.70;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierProjection {
    pub tier: String,
    pub price: f64,
    pub allocation_percent: f64,
    pub conversions: f64,
    pub mrr: f64,
}

/// MRR at fixed heuristic multiples of month 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthProjection {
    pub month_1: f64,
    pub month_3: f64,
    pub month_6: f64,
    pub month_12: f64,
}

impl GrowthProjection {
    #[must_use]
    pub fn from_month_1(mrr: f64) -> Self {
        Self {
            month_1: mrr,
            month_3: mrr * MONTH_3_GROWTH,
            month_6: mrr * MONTH_6_GROWTH,
            month_12: mrr * MONTH_12_GROWTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MrrEstimate {
    pub target_market_size: u64,
    pub base_conversion_rate: f64,
    pub sentiment_multiplier: f64,
    pub adjusted_conversion_rate: f64,
    /// `total_conversions / target_market_size * 100`.
    pub conversion_rate_percent: f64,
    pub total_conversions: f64,
    pub tiers: Vec<TierProjection>,
    pub total_mrr: f64,
    /// 0 to 100.
    pub confidence_score: f64,
    pub growth: GrowthProjection,
    pub sample_size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrEstimate {
    pub annual: f64,
    pub monthly_breakdown: GrowthProjection,
}

impl MrrEstimate {
    #[must_use]
    pub fn to_arr(&self) -> ArrEstimate {
        ArrEstimate {
            annual: self.total_mrr * 12.0,
            monthly_breakdown: self.growth,
        }
    }
}

/// `min(100, observations / 30 * 100)`.
#[must_use]
pub fn confidence_score(observations: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let ratio = observations as f64 / FULL_CONFIDENCE_SAMPLE as f64;
    (ratio * 100.0).min(100.0)
}

/// Project monthly revenue for `target_market_size` prospects.
///
/// Tier allocations are used as given and are not required to sum to 100.
/// Confidence is based on the real sample size, not the scaled population.
///
/// # Errors
///
/// Returns [`FeedbackError::NoPricingTiers`] if `tiers` is empty, or
/// [`FeedbackError::InvalidConversionRate`] if the override is not a finite
/// rate in `[0, 1]`.
pub fn project_revenue(
    feedback: &ScaledFeedback,
    tiers: &[PricingTier],
    target_market_size: u64,
    conversion_rate_override: Option<f64>,
) -> Result<MrrEstimate, FeedbackError> {
    if tiers.is_empty() {
        return Err(FeedbackError::NoPricingTiers);
    }

    let base_conversion_rate = match conversion_rate_override {
        Some(rate) if !rate.is_finite() || !(0.0..=1.0).contains(&rate) => {
            return Err(FeedbackError::InvalidConversionRate(rate));
        }
        Some(rate) => rate,
        None => feedback.feedback.mean_purchase_intent / 100.0 * MAX_BASE_CONVERSION_RATE,
    };

    let sentiment_multiplier = SENTIMENT_MULTIPLIER_FLOOR
        + feedback.feedback.positive_fraction() * SENTIMENT_MULTIPLIER_RANGE;
    let adjusted_conversion_rate = base_conversion_rate * sentiment_multiplier;

    #[allow(clippy::cast_precision_loss)]
    let market = target_market_size as f64;
    let total_conversions = market * adjusted_conversion_rate;

    let tiers: Vec<TierProjection> = tiers
        .iter()
        .map(|tier| {
            let conversions = total_conversions * tier.allocation_percent / 100.0;
            TierProjection {
                tier: tier.name.clone(),
                price: tier.price,
                allocation_percent: tier.allocation_percent,
                conversions,
                mrr: conversions * tier.price,
            }
        })
        .collect();
    let total_mrr: f64 = tiers.iter().map(|t| t.mrr).sum();

    let conversion_rate_percent = if target_market_size > 0 {
        total_conversions / market * 100.0
    } else {
        0.0
    };

    let sample_size = feedback.original_sample_size;
    let estimate = MrrEstimate {
        target_market_size,
        base_conversion_rate,
        sentiment_multiplier,
        adjusted_conversion_rate,
        conversion_rate_percent,
        total_conversions,
        tiers,
        total_mrr,
        confidence_score: confidence_score(sample_size),
        growth: GrowthProjection::from_month_1(total_mrr),
        sample_size,
    };

    tracing::debug!(
        target_market_size,
        total_mrr = estimate.total_mrr,
        confidence = estimate.confidence_score,
        "projected revenue"
    );

    Ok(estimate)
}
