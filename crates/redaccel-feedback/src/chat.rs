//! Observation generator backed by an OpenAI-compatible chat completions API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use redaccel_core::AppConfig;

use crate::error::FeedbackError;
use crate::persona::PersonaDefinition;
use crate::simulate::ObservationGenerator;
use crate::types::{ObservationRecord, ProductContext, Sentiment};

const SYSTEM_PROMPT: &str = "You simulate realistic user feedback. Be concise and direct.";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 400;
/// Features beyond this many are left out of the prompt.
const PROMPT_FEATURE_LIMIT: usize = 5;

pub struct ChatObservationClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl ChatObservationClient {
    /// # Errors
    ///
    /// Returns [`FeedbackError::MissingApiKey`] if `OPENAI_API_KEY` is not
    /// configured, or [`FeedbackError::Http`] if the client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, FeedbackError> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .ok_or_else(|| FeedbackError::MissingApiKey("OPENAI_API_KEY".to_string()))?;
        Self::with_base_url(
            api_key,
            &config.openai_model,
            config.observation_timeout_secs,
            &config.openai_base_url,
        )
    }

    /// # Errors
    ///
    /// Returns [`FeedbackError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, FeedbackError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl ObservationGenerator for ChatObservationClient {
    async fn simulate_observation(
        &self,
        persona: &'static PersonaDefinition,
        product: &ProductContext,
    ) -> Result<ObservationRecord, FeedbackError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(persona, product) },
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedbackError::Generator(format!(
                "chat completion failed with status {}",
                response.status()
            )));
        }

        let text = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| FeedbackError::Deserialize {
                context: "chat completion response".to_string(),
                source: e,
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| FeedbackError::Generator("chat completion had no content".to_string()))?;

        let reply: Value =
            serde_json::from_str(&content).map_err(|e| FeedbackError::Deserialize {
                context: format!("{} feedback", persona.name),
                source: e,
            })?;

        Ok(parse_feedback(persona, &reply))
    }
}

pub(crate) fn build_prompt(persona: &PersonaDefinition, product: &ProductContext) -> String {
    let features = product
        .features
        .iter()
        .take(PROMPT_FEATURE_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        "You are a {} persona: {}\nTraits: {}\n\nProduct: {}\nDescription: {}\nFeatures: {}\n",
        persona.name,
        persona.description,
        persona.traits.join(", "),
        product.name,
        product.description,
        features,
    );
    if let Some(pricing) = product.pricing.as_deref() {
        prompt.push_str(&format!("Pricing: {pricing}\n"));
    }
    if let Some(audience) = product.target_audience.as_deref() {
        prompt.push_str(&format!("Target Audience: {audience}\n"));
    }
    prompt.push_str(&format!(
        "\nProvide feedback as this persona. Return JSON:\n\
         {{\n  \"persona\": \"{}\",\n  \"overall_sentiment\": \"positive|neutral|negative\",\n  \
         \"overall_purchase_intent\": 0-100,\n  \"key_insights\": [\"insight1\", \"insight2\"],\n  \
         \"recommendations\": [\"rec1\", \"rec2\"],\n  \"likes\": [\"like1\", \"like2\"],\n  \
         \"concerns\": [\"concern1\"]\n}}",
        persona.name
    ));
    prompt
}

/// Missing or malformed fields degrade to neutral / zero / empty.
pub(crate) fn parse_feedback(persona: &PersonaDefinition, reply: &Value) -> ObservationRecord {
    let sentiment = reply
        .get("overall_sentiment")
        .and_then(Value::as_str)
        .map_or(Sentiment::Neutral, Sentiment::parse_lenient);

    let intent = reply
        .get("overall_purchase_intent")
        .and_then(|v| {
            v.as_f64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        })
        .unwrap_or(0.0);

    let mut record = ObservationRecord::new(persona.persona, sentiment, intent);
    record.insights = string_list(reply, "key_insights");
    record.recommendations = string_list(reply, "recommendations");
    record.likes = string_list(reply, "likes");
    record.concerns = string_list(reply, "concerns");
    record
}

fn string_list(reply: &Value, key: &str) -> Vec<String> {
    reply
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
