//! Bounded concurrent dispatch of observation calls.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use crate::error::FeedbackError;
use crate::persona::{Persona, PersonaDefinition};
use crate::types::{ObservationRecord, ProductContext};

/// Produces one simulated observation for a persona.
#[async_trait]
pub trait ObservationGenerator: Send + Sync {
    async fn simulate_observation(
        &self,
        persona: &'static PersonaDefinition,
        product: &ProductContext,
    ) -> Result<ObservationRecord, FeedbackError>;
}

/// Run `per_persona` observations for each persona with at most
/// `max_concurrent` calls in flight, each bounded by `call_timeout`.
///
/// Failed and timed-out calls are logged and left out. Results come back in
/// dispatch order (persona, then index).
pub async fn simulate_observations(
    generator: &dyn ObservationGenerator,
    product: &ProductContext,
    personas: &[Persona],
    per_persona: usize,
    max_concurrent: usize,
    call_timeout: Duration,
) -> Vec<ObservationRecord> {
    let tasks: Vec<(Persona, usize)> = personas
        .iter()
        .flat_map(|p| (0..per_persona).map(move |i| (*p, i)))
        .collect();
    let requested = tasks.len();

    let results: Vec<Option<ObservationRecord>> = stream::iter(tasks)
        .map(|(persona, index)| async move {
            let call = generator.simulate_observation(persona.definition(), product);
            match tokio::time::timeout(call_timeout, call).await {
                Ok(Ok(record)) => Some(record),
                Ok(Err(e)) => {
                    tracing::warn!(persona = %persona, index, error = %e, "observation failed");
                    None
                }
                Err(_) => {
                    tracing::warn!(
                        persona = %persona,
                        index,
                        timeout_secs = call_timeout.as_secs_f64(),
                        "observation timed out"
                    );
                    None
                }
            }
        })
        .buffered(max_concurrent.max(1))
        .collect()
        .await;

    let observations: Vec<ObservationRecord> = results.into_iter().flatten().collect();
    if observations.len() < requested {
        tracing::warn!(
            requested,
            succeeded = observations.len(),
            "some observations were dropped"
        );
    }
    observations
}
