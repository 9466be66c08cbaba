use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub traffic_timeout_secs: u64,
    pub reddit_user_agent: String,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub traffic_api_token: Option<String>,
    pub traffic_api_base_url: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub observation_timeout_secs: u64,
    pub max_concurrent_observations: usize,
    pub max_observations_per_persona: usize,
    pub target_population: u64,
    pub pricing_path: PathBuf,
}

impl AppConfig {
    /// Reddit OAuth credentials, if both halves are set and not the
    /// `.env.example` placeholder.
    #[must_use]
    pub fn reddit_credentials(&self) -> Option<(&str, &str)> {
        let id = self.reddit_client_id.as_deref()?;
        let secret = self.reddit_client_secret.as_deref()?;
        if id.trim().is_empty() || secret.trim().is_empty() || id.contains("your_client_id_here")
        {
            return None;
        }
        Some((id, secret))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("traffic_timeout_secs", &self.traffic_timeout_secs)
            .field("reddit_user_agent", &self.reddit_user_agent)
            .field(
                "reddit_client_id",
                &self.reddit_client_id.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "reddit_client_secret",
                &self.reddit_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "traffic_api_token",
                &self.traffic_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("traffic_api_base_url", &self.traffic_api_base_url)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("observation_timeout_secs", &self.observation_timeout_secs)
            .field(
                "max_concurrent_observations",
                &self.max_concurrent_observations,
            )
            .field(
                "max_observations_per_persona",
                &self.max_observations_per_persona,
            )
            .field("target_population", &self.target_population)
            .field("pricing_path", &self.pricing_path)
            .finish()
    }
}
