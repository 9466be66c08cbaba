//! Synthetic product feedback for redaccel.
//!
//! Runs simulated observations across a fixed catalog of personas with a
//! bounded worker pool, aggregates sentiment and purchase intent per persona
//! and overall, scales the small sample to a target population, and projects
//! MRR/ARR from the result.

pub mod aggregate;
pub mod chat;
pub mod error;
pub mod persona;
pub mod pipeline;
pub mod revenue;
pub mod scale;
pub mod simulate;
pub mod types;

pub use aggregate::aggregate;
pub use chat::ChatObservationClient;
pub use error::FeedbackError;
pub use persona::{Persona, PersonaDefinition, PriceSensitivity};
pub use pipeline::FeedbackSimulator;
pub use revenue::{confidence_score, project_revenue, ArrEstimate, GrowthProjection, MrrEstimate};
pub use scale::scale_feedback;
pub use simulate::{simulate_observations, ObservationGenerator};
pub use types::{
    AggregatedFeedback, CohortStats, ObservationRecord, ProductContext, ScaledFeedback, Sentiment,
    SentimentCounts, SentimentPercentages,
};

pub use redaccel_core::PricingTier;
