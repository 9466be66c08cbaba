//! Keyword search-traffic enrichment.
//!
//! The estimate is keyword-level: every thread ranked for a keyword receives
//! the same value. Enrichment is best-effort and never aborts ranking.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use redaccel_core::AppConfig;

use crate::error::RankerError;
use crate::types::TrafficEstimate;

/// Share of searchers that click through to top results.
const CLICK_THROUGH_RATE: f64 = 0.15;
/// Share of those clicks a ranking Reddit thread can expect.
const THREAD_CLICK_SHARE: f64 = 0.03;

#[async_trait]
pub trait TrafficEstimator: Send + Sync {
    /// `Ok(None)` means no data is available for the keyword.
    async fn get_traffic_estimate(
        &self,
        keyword: &str,
    ) -> Result<Option<TrafficEstimate>, RankerError>;
}

/// Client for a keywords-explorer style metrics API.
pub struct KeywordTrafficClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl KeywordTrafficClient {
    /// Returns `None` when no API token is configured.
    ///
    /// # Errors
    ///
    /// Returns [`RankerError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, RankerError> {
        match config.traffic_api_token.as_deref() {
            Some(token) => Self::with_base_url(
                Some(token),
                config.http_timeout_secs,
                &config.traffic_api_base_url,
            )
            .map(Some),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns [`RankerError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        token: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, RankerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }
}

#[async_trait]
impl TrafficEstimator for KeywordTrafficClient {
    async fn get_traffic_estimate(
        &self,
        keyword: &str,
    ) -> Result<Option<TrafficEstimate>, RankerError> {
        let Some(token) = self.token.as_deref() else {
            return Ok(None);
        };

        let response = self
            .client
            .get(format!("{}/keywords-explorer", self.base_url))
            .query(&[
                ("keyword", keyword),
                ("token", token),
                ("output", "json"),
                ("mode", "exact"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RankerError::Traffic(format!(
                "keyword metrics request failed with status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|e| RankerError::Deserialize {
                context: format!("keyword metrics for '{keyword}'"),
                source: e,
            })?;

        Ok(parse_keyword_metrics(&payload))
    }
}

/// Metrics come either as a top-level `metrics` object or as the first entry
/// of a `keywords` array, depending on API plan.
pub(crate) fn parse_keyword_metrics(payload: &Value) -> Option<TrafficEstimate> {
    let metrics = payload.get("metrics").or_else(|| {
        payload
            .get("keywords")
            .and_then(Value::as_array)
            .and_then(|kws| kws.first())
    })?;

    if !metrics.is_object() {
        return None;
    }

    let search_volume = number_as_u64(metrics.get("search_volume"));
    let difficulty = metrics
        .get("keyword_difficulty")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    Some(TrafficEstimate {
        estimated_traffic: estimate_traffic(search_volume),
        search_volume,
        difficulty,
    })
}

/// `trunc(search_volume * 0.15 * 0.03)`.
#[must_use]
pub fn estimate_traffic(search_volume: u64) -> u64 {
    if search_volume == 0 {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let estimate = (search_volume as f64 * CLICK_THROUGH_RATE * THREAD_CLICK_SHARE) as u64;
    estimate
}

fn number_as_u64(value: Option<&Value>) -> u64 {
    match value {
        Some(v) => v.as_u64().unwrap_or_else(|| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let fallback = v.as_f64().filter(|f| *f > 0.0).map_or(0, |f| f as u64);
            fallback
        }),
        None => 0,
    }
}
