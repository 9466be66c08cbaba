//! Simulate, aggregate and scale in one call.

use std::time::Duration;

use redaccel_core::AppConfig;

use crate::aggregate::aggregate;
use crate::chat::ChatObservationClient;
use crate::error::FeedbackError;
use crate::persona::Persona;
use crate::scale::scale_feedback;
use crate::simulate::{simulate_observations, ObservationGenerator};
use crate::types::{ProductContext, ScaledFeedback};

pub struct FeedbackSimulator {
    generator: Box<dyn ObservationGenerator>,
    max_concurrent: usize,
    call_timeout: Duration,
    max_per_persona: usize,
}

impl FeedbackSimulator {
    #[must_use]
    pub fn new(
        generator: Box<dyn ObservationGenerator>,
        max_concurrent: usize,
        call_timeout: Duration,
        max_per_persona: usize,
    ) -> Self {
        Self {
            generator,
            max_concurrent: max_concurrent.max(1),
            call_timeout,
            max_per_persona: max_per_persona.max(1),
        }
    }

    /// Chat-completions generator with pool limits from config.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::MissingApiKey`] if no API key is configured,
    /// or [`FeedbackError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, FeedbackError> {
        let generator = ChatObservationClient::from_config(config)?;
        Ok(Self::new(
            Box::new(generator),
            config.max_concurrent_observations,
            Duration::from_secs(config.observation_timeout_secs),
            config.max_observations_per_persona,
        ))
    }

    /// Run `per_persona` observations for each of `personas` (all six when
    /// empty), aggregate them and scale the result to `target_population`.
    ///
    /// `per_persona` is capped at the configured maximum. Failed observations
    /// are dropped. If none are requested or none succeed the returned
    /// feedback is empty and unscaled.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::InvalidProduct`] if `product` fails
    /// validation.
    pub async fn aggregate_and_scale(
        &self,
        product: &ProductContext,
        personas: &[Persona],
        per_persona: usize,
        target_population: u64,
    ) -> Result<ScaledFeedback, FeedbackError> {
        product.validate()?;

        let personas: Vec<Persona> = if personas.is_empty() {
            Persona::ALL.to_vec()
        } else {
            let mut unique = personas.to_vec();
            unique.sort_unstable();
            unique.dedup();
            unique
        };

        let per_persona = per_persona.min(self.max_per_persona);
        tracing::info!(
            product = %product.name,
            personas = personas.len(),
            per_persona,
            max_concurrent = self.max_concurrent,
            "simulating feedback"
        );

        let observations = simulate_observations(
            self.generator.as_ref(),
            product,
            &personas,
            per_persona,
            self.max_concurrent,
            self.call_timeout,
        )
        .await;

        let aggregated = aggregate(observations);
        let mut rng = rand::rng();
        Ok(scale_feedback(aggregated, target_population, &mut rng))
    }
}
