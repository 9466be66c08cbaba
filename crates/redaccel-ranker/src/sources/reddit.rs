//! Reddit search sources: unauthenticated JSON search and client-credentials
//! OAuth search.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use redaccel_core::AppConfig;

use super::reddit_helpers::{listing_to_candidates, Listing};
use super::CandidateSource;
use crate::error::RankerError;
use crate::types::RawCandidate;

const PUBLIC_BASE_URL: &str = "https://www.reddit.com";
const OAUTH_AUTH_BASE_URL: &str = "https://www.reddit.com";
const OAUTH_API_BASE_URL: &str = "https://oauth.reddit.com";

/// Reddit caps a single search page at 100 results.
const PAGE_LIMIT: usize = 100;

fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client, RankerError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

fn search_params(keyword: &str, limit: usize) -> Vec<(&'static str, String)> {
    vec![
        ("q", keyword.to_string()),
        ("sort", "hot".to_string()),
        ("t", "year".to_string()),
        ("limit", limit.min(PAGE_LIMIT).to_string()),
        ("type", "link".to_string()),
    ]
}

async fn decode_listing(
    response: reqwest::Response,
    context: &str,
) -> Result<Listing, RankerError> {
    if !response.status().is_success() {
        return Err(RankerError::Reddit(format!(
            "{context} failed with status {}",
            response.status()
        )));
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| RankerError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Reddit's public `search.json` endpoint. Needs no credentials but may be
/// rate limited.
pub struct RedditPublicSource {
    client: Client,
    base_url: String,
}

impl RedditPublicSource {
    /// # Errors
    ///
    /// Returns [`RankerError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, RankerError> {
        Self::with_base_url(
            &config.reddit_user_agent,
            config.http_timeout_secs,
            PUBLIC_BASE_URL,
        )
    }

    /// Point the source at a different host (for tests with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`RankerError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        user_agent: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, RankerError> {
        Ok(Self {
            client: build_client(user_agent, timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CandidateSource for RedditPublicSource {
    fn name(&self) -> &'static str {
        "reddit_public"
    }

    async fn fetch_candidates(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<RawCandidate>, RankerError> {
        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&search_params(keyword, limit))
            .send()
            .await?;

        let listing = decode_listing(response, "public Reddit search").await?;
        Ok(listing_to_candidates(listing, limit, Utc::now()))
    }
}

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit's authenticated search, used when the public endpoint yields
/// nothing. A fresh application-only token is exchanged on every fetch.
pub struct RedditOAuthSource {
    client: Client,
    client_id: String,
    client_secret: String,
    auth_base_url: String,
    api_base_url: String,
}

impl RedditOAuthSource {
    /// Returns `None` when Reddit credentials are not configured.
    ///
    /// # Errors
    ///
    /// Returns [`RankerError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, RankerError> {
        let Some((client_id, client_secret)) = config.reddit_credentials() else {
            return Ok(None);
        };
        Self::with_base_urls(
            client_id,
            client_secret,
            &config.reddit_user_agent,
            config.http_timeout_secs,
            OAUTH_AUTH_BASE_URL,
            OAUTH_API_BASE_URL,
        )
        .map(Some)
    }

    /// # Errors
    ///
    /// Returns [`RankerError::Http`] if the HTTP client cannot be built.
    pub fn with_base_urls(
        client_id: &str,
        client_secret: &str,
        user_agent: &str,
        timeout_secs: u64,
        auth_base_url: &str,
        api_base_url: &str,
    ) -> Result<Self, RankerError> {
        Ok(Self {
            client: build_client(user_agent, timeout_secs)?,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            auth_base_url: auth_base_url.trim_end_matches('/').to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_token(&self) -> Result<String, RankerError> {
        let response = self
            .client
            .post(format!("{}/api/v1/access_token", self.auth_base_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RankerError::Reddit(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| RankerError::Reddit(format!("token parse error: {e}")))?;

        Ok(token.access_token)
    }
}

#[async_trait]
impl CandidateSource for RedditOAuthSource {
    fn name(&self) -> &'static str {
        "reddit_oauth"
    }

    async fn fetch_candidates(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<RawCandidate>, RankerError> {
        let token = self.fetch_token().await?;

        let response = self
            .client
            .get(format!("{}/search", self.api_base_url))
            .bearer_auth(token)
            .query(&search_params(keyword, limit))
            .send()
            .await?;

        let listing = decode_listing(response, "OAuth Reddit search").await?;
        Ok(listing_to_candidates(listing, limit, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_cap_limit_at_page_size() {
        let params = search_params("rust tool", 400);
        assert!(params.contains(&("limit", "100".to_string())));
        assert!(params.contains(&("sort", "hot".to_string())));
        assert!(params.contains(&("q", "rust tool".to_string())));
    }

    #[test]
    fn oauth_source_absent_without_credentials() {
        let config = test_config(None, None);
        assert!(RedditOAuthSource::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn oauth_source_present_with_credentials() {
        let config = test_config(Some("id"), Some("secret"));
        assert!(RedditOAuthSource::from_config(&config).unwrap().is_some());
    }

    fn test_config(id: Option<&str>, secret: Option<&str>) -> AppConfig {
        AppConfig {
            env: redaccel_core::Environment::Test,
            log_level: "debug".to_string(),
            http_timeout_secs: 5,
            traffic_timeout_secs: 5,
            reddit_user_agent: "redaccel-test/0.1".to_string(),
            reddit_client_id: id.map(str::to_string),
            reddit_client_secret: secret.map(str::to_string),
            traffic_api_token: None,
            traffic_api_base_url: "http://localhost".to_string(),
            openai_api_key: None,
            openai_base_url: "http://localhost".to_string(),
            openai_model: "test".to_string(),
            observation_timeout_secs: 5,
            max_concurrent_observations: 2,
            max_observations_per_persona: 3,
            target_population: 100,
            pricing_path: std::path::PathBuf::from("pricing.yaml"),
        }
    }
}
